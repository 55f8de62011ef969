//! OAuth client deletion events
//!
//! Classifies change events and files a PagerDuty incident for deletions.

pub mod dto;
pub mod handler;
pub mod service;

pub use dto::{EventClassification, OAuthClientDeletion};
pub use handler::handle_oauth_client_event;
pub use service::EventProcessor;
