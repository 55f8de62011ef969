//! Incident management (PagerDuty)
//!
//! Builds incident requests and files them through the PagerDuty REST API.

pub mod client;
pub mod dto;
pub mod service;

pub use client::{IncidentClient, IncidentClientTrait, IncidentError, PagerDutyClient};
pub use dto::{Incident, IncidentRequest};
pub use service::create_incident;
