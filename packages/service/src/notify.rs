//! Notification decision policy.
//!
//! Deterministic rules first, AI judgment second. Only one branch is
//! ambiguous enough to consult the judge: a job moving to "Waiting". Every
//! judge failure degrades to "do not notify" so a status change can never
//! fail on the notification path.

use ai::{JudgeRequest, JudgeVerdict, NotifyJudge};
use fixflow_core::JobStatus;
use serde::{Deserialize, Serialize};

/// Job context the policy needs to draft a message.
#[derive(Debug, Clone)]
pub struct NotifyContext {
    pub customer_name: String,
    pub device_model: String,
    pub cost: f64,
    pub job_id: String,
}

/// Outcome of the notification policy for one status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Whether the customer should be messaged.
    pub should_notify: bool,
    /// The message text; present exactly when `should_notify` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Notification {
    /// The silent outcome.
    pub fn none() -> Self {
        Self {
            should_notify: false,
            message: None,
        }
    }

    fn with_message(text: String) -> Self {
        Self {
            should_notify: true,
            message: Some(text),
        }
    }
}

/// Decide whether a status change should be messaged to the customer.
///
/// - No-op changes never notify.
/// - "Ready" and "Done" always notify with the templated completion message.
/// - "To Do" is internal movement and never notifies.
/// - Anything else defers to the judge; a decline, an empty draft, or a
///   failure all mean no notification.
pub async fn decide<J: NotifyJudge>(
    previous: JobStatus,
    new: JobStatus,
    ctx: &NotifyContext,
    judge: &J,
) -> Notification {
    if new == previous {
        return Notification::none();
    }

    if new.is_customer_facing() {
        return Notification::with_message(completion_message(new, ctx));
    }

    if new == JobStatus::ToDo {
        return Notification::none();
    }

    let request = JudgeRequest {
        previous_status: previous,
        new_status: new,
        customer_name: ctx.customer_name.clone(),
        device: ctx.device_model.clone(),
        cost: ctx.cost,
        job_id: ctx.job_id.clone(),
    };

    match judge.judge(&request).await {
        Ok(JudgeVerdict {
            notify: true,
            draft: Some(draft),
        }) if !draft.trim().is_empty() => Notification::with_message(draft),
        Ok(_) => Notification::none(),
        Err(err) => {
            tracing::warn!("notification judge failed for job {}: {}", ctx.job_id, err);
            Notification::none()
        }
    }
}

/// Fixed template for the two customer-facing statuses.
fn completion_message(status: JobStatus, ctx: &NotifyContext) -> String {
    match status {
        JobStatus::Ready => format!(
            "Hi {}, your {} is repaired and ready for pickup. Total cost: ${:.2}. Reference: {}.",
            ctx.customer_name, ctx.device_model, ctx.cost, ctx.job_id
        ),
        _ => format!(
            "Hi {}, the repair on your {} is complete. Total cost: ${:.2}. Reference: {}. Thank you for choosing us!",
            ctx.customer_name, ctx.device_model, ctx.cost, ctx.job_id
        ),
    }
}
