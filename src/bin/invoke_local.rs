use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use oauth_client_notifier::{
    config::PagerDutyConfig,
    local,
    state::AppState,
    utils::{logging, AppError, ProcessorResponse},
};

#[derive(Parser)]
#[command(name = "invoke-local")]
#[command(about = "Run one OAuth client event from a JSON file through the notifier")]
struct Args {
    /// Path to a file holding one JSON event envelope
    event_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    let _guard = logging::init_logging();

    match run(&args).await {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render response");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Local invocation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<ProcessorResponse, AppError> {
    let config = PagerDutyConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    local::invoke_from_file(&state.processor, &args.event_file).await
}
