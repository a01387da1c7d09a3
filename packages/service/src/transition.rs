//! Status transition engine.
//!
//! The board allows any-to-any moves; there is no validation matrix. The
//! engine's one rule is that a no-op request changes nothing and triggers
//! nothing downstream.

use chrono::Utc;
use db::repositories::{CustomerRepository, DeviceRepository, JobRepository};
use fixflow_core::{Job, JobEvent, JobId, JobStatus};

use ai::NotifyJudge;

use crate::notify::{Notification, NotifyContext, decide};
use crate::whatsapp::whatsapp_link;
use crate::ServiceError;

/// Result of applying a status change to an in-memory job.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The job after the change.
    pub job: Job,
    /// The status before the change.
    pub previous: JobStatus,
    /// False when the requested status was already current.
    pub changed: bool,
}

/// Apply a requested status to a job.
///
/// Never rejects; any status is reachable from any other. When the request
/// matches the current status the job is returned untouched, timestamps
/// included.
pub fn transition(mut job: Job, requested: JobStatus) -> Transition {
    let previous = job.status;

    if requested == previous {
        return Transition {
            job,
            previous,
            changed: false,
        };
    }

    job.status = requested;
    job.updated_at = Utc::now();

    Transition {
        job,
        previous,
        changed: true,
    }
}

/// Full outcome of a persisted status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The job after the change.
    pub job: Job,
    /// The status before the change.
    pub previous: JobStatus,
    /// False when the request was a no-op.
    pub changed: bool,
    /// The notification decision for this change.
    pub notification: Notification,
    /// Deep link for sending the message, when one was drafted.
    pub whatsapp_url: Option<String>,
    /// Events describing what happened, in order.
    pub events: Vec<JobEvent>,
}

/// Change a job's status and run the notification policy.
///
/// Loads the job, applies [`transition`], persists the new status when it
/// actually changed, then decides whether the customer should hear about
/// it. A no-op request performs no writes and produces no notification.
pub async fn change_status<J: NotifyJudge>(
    job_id: JobId,
    requested: JobStatus,
    judge: &J,
) -> Result<StatusChange, ServiceError> {
    let current = JobRepository::get(job_id).await?;
    let applied = transition(current, requested);

    if !applied.changed {
        return Ok(StatusChange {
            job: applied.job,
            previous: applied.previous,
            changed: false,
            notification: Notification::none(),
            whatsapp_url: None,
            events: Vec::new(),
        });
    }

    let job = JobRepository::update_status(job_id, requested).await?;
    let customer = CustomerRepository::get(job.customer_id).await?;
    let device = DeviceRepository::get(job.device_id).await?;

    let mut events = vec![JobEvent::JobStatusChanged {
        job_id,
        old_status: applied.previous,
        new_status: requested,
        timestamp: Utc::now(),
    }];

    let ctx = NotifyContext {
        customer_name: customer.name.clone(),
        device_model: device.model.clone(),
        cost: job.cost,
        job_id: job.id.to_string(),
    };
    let notification = decide(applied.previous, requested, &ctx, judge).await;

    let whatsapp_url = notification
        .message
        .as_deref()
        .map(|message| whatsapp_link(&customer.phone, message));

    if notification.should_notify {
        events.push(JobEvent::CustomerNotified {
            job_id,
            customer_id: customer.id,
            timestamp: Utc::now(),
        });
    }

    for event in &events {
        tracing::info!("{}", event.description());
    }

    Ok(StatusChange {
        job,
        previous: applied.previous,
        changed: true,
        notification,
        whatsapp_url,
        events,
    })
}
