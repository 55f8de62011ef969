pub mod incident;
pub mod oauth_client;
