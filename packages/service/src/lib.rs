//! Workflow layer for the FixFlow workshop tracker.
//!
//! This crate holds the business rules between the API surface and the
//! repositories:
//! - intake: validate raw input, dedupe customer/device, log the job
//! - transitions: apply status changes (any-to-any, no-op aware)
//! - notifications: decide whether a change reaches the customer, with
//!   deterministic rules first and the AI judge only for ambiguous moves

mod error;
mod intake;
mod notify;
mod transition;
mod whatsapp;

pub use error::{FieldError, ServiceError, ValidationErrors};
pub use intake::{IntakeRequest, JobDraft, apply_ai_suggestion, intake};
pub use notify::{Notification, NotifyContext, decide};
pub use transition::{StatusChange, Transition, change_status, transition};
pub use whatsapp::whatsapp_link;
