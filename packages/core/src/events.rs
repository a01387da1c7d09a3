//! Event types describing observable state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CustomerId, Job, JobId, JobStatus};

/// Events emitted by the workflow layer as jobs move through the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JobEvent {
    /// A new job was logged through intake.
    JobCreated { job: Job, timestamp: DateTime<Utc> },
    /// A job moved to a different workflow status.
    JobStatusChanged {
        job_id: JobId,
        old_status: JobStatus,
        new_status: JobStatus,
        timestamp: DateTime<Utc>,
    },
    /// A customer notification was drafted for a job.
    CustomerNotified {
        job_id: JobId,
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },
}

impl JobEvent {
    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            JobEvent::JobCreated { timestamp, .. } => *timestamp,
            JobEvent::JobStatusChanged { timestamp, .. } => *timestamp,
            JobEvent::CustomerNotified { timestamp, .. } => *timestamp,
        }
    }

    /// Get the job ID associated with this event.
    pub fn job_id(&self) -> JobId {
        match self {
            JobEvent::JobCreated { job, .. } => job.id,
            JobEvent::JobStatusChanged { job_id, .. } => *job_id,
            JobEvent::CustomerNotified { job_id, .. } => *job_id,
        }
    }

    /// Get a short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            JobEvent::JobCreated { job, .. } => {
                format!("Job {} created ({})", job.id, job.urgency)
            }
            JobEvent::JobStatusChanged {
                job_id, new_status, ..
            } => format!("Job {} -> {}", job_id, new_status.as_str()),
            JobEvent::CustomerNotified { job_id, .. } => {
                format!("Customer notified for job {}", job_id)
            }
        }
    }
}
