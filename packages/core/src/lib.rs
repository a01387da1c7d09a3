//! Core domain types for the FixFlow workshop tracker.
//!
//! This crate contains shared types used across all packages:
//! - Customer and Device, deduped by their natural keys (phone, serial)
//! - Job, JobStatus and Urgency for repair work orders
//! - Events describing observable state changes

mod customer;
mod device;
mod events;
mod job;

pub use customer::{Customer, CustomerId};
pub use device::{Device, DeviceId, DeviceType};
pub use events::JobEvent;
pub use job::{Job, JobId, JobStatus, ParseEnumError, Urgency};
