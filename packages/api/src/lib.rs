//! Server API functions for the FixFlow workshop tracker.
//!
//! This crate contains all shared fullstack server functions for:
//! - Job intake and board listing
//! - Status changes with notification decisions
//! - AI-assisted entry triage

mod jobs;

// Re-export all server functions
pub use jobs::*;

#[cfg(feature = "server")]
mod init;

#[cfg(feature = "server")]
pub use init::*;

// Re-export core types for convenience
pub use fixflow_core::{
    Customer, CustomerId, Device, DeviceId, DeviceType, Job, JobEvent, JobId, JobStatus, Urgency,
};
