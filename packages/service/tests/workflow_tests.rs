mod common;

use std::error::Error;

use ai::{AiError, JudgeRequest, JudgeVerdict, NotifyJudge};
use db::repositories::CustomerRepository;
use fixflow_core::{JobEvent, JobId, JobStatus, Urgency};
use service::{IntakeRequest, ServiceError, change_status, intake};

/// Judge that always answers with the same verdict.
struct StaticJudge(JudgeVerdict);

impl NotifyJudge for StaticJudge {
    async fn judge(&self, _request: &JudgeRequest) -> Result<JudgeVerdict, AiError> {
        Ok(self.0.clone())
    }
}

/// Judge that always fails, standing in for an unreachable provider.
struct FailingJudge;

impl NotifyJudge for FailingJudge {
    async fn judge(&self, _request: &JudgeRequest) -> Result<JudgeVerdict, AiError> {
        Err(AiError::Request("provider unreachable".into()))
    }
}

fn declining_judge() -> StaticJudge {
    StaticJudge(JudgeVerdict {
        notify: false,
        draft: None,
    })
}

fn request(phone: &str, serial: &str) -> IntakeRequest {
    IntakeRequest {
        customer_name: "John Doe".to_string(),
        customer_phone: phone.to_string(),
        customer_email: Some("john.doe@example.com".to_string()),
        device_serial: serial.to_string(),
        device_model: "iPhone 13".to_string(),
        issue_description: "Screen cracked after a drop, touch intermittent".to_string(),
        tags: vec!["screen_replacement".to_string()],
        urgency: "high".to_string(),
    }
}

#[tokio::test]
async fn intake_creates_job_in_initial_state() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let job = intake(request("123-456-7890", "SN12345678")).await?;

    assert_eq!(job.status, JobStatus::ToDo);
    assert_eq!(job.cost, 0.0);
    assert_eq!(job.urgency, Urgency::High);
    assert_eq!(job.tags, vec!["screen_replacement".to_string()]);
    assert_eq!(job.created_at, job.updated_at);

    Ok(())
}

#[tokio::test]
async fn intake_dedupes_customer_by_phone() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let first = intake(request("123-456-7890", "SN-A")).await?;
    let before = CustomerRepository::get_by_phone("123-456-7890").await?.unwrap();

    let mut second_request = request("123-456-7890", "SN-B");
    second_request.customer_name = "Johnny D".to_string();
    let second = intake(second_request).await?;

    let after = CustomerRepository::get_by_phone("123-456-7890").await?.unwrap();

    assert_eq!(first.customer_id, second.customer_id);
    assert_eq!(before.id, after.id);
    assert_eq!(after.name, "John Doe");
    assert_eq!(CustomerRepository::count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn intake_reuses_device_and_keeps_original_owner() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let johns_job = intake(request("123-456-7890", "SN12345678")).await?;

    // Same serial arrives under a different customer's intake.
    let mut janes_request = request("098-765-4321", "SN12345678");
    janes_request.customer_name = "Jane Smith".to_string();
    let janes_job = intake(janes_request).await?;

    assert_eq!(janes_job.device_id, johns_job.device_id);
    // The job belongs to Jane, the device still to John.
    assert_ne!(janes_job.customer_id, johns_job.customer_id);
    let device = db::repositories::DeviceRepository::get(janes_job.device_id).await?;
    assert_eq!(device.customer_id, johns_job.customer_id);

    Ok(())
}

#[tokio::test]
async fn intake_rejects_short_description() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let mut bad = request("123-456-7890", "SN12345678");
    bad.issue_description = "no power.".to_string();

    let result = intake(bad).await;
    match result {
        Err(ServiceError::Validation(errors)) => {
            assert!(!errors.for_field("issue_description").is_empty());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn change_status_to_ready_notifies_with_link() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let job = intake(request("+1 (234) 567-8900", "SN12345678")).await?;

    let outcome = change_status(job.id, JobStatus::Ready, &FailingJudge).await?;

    assert!(outcome.changed);
    assert_eq!(outcome.previous, JobStatus::ToDo);
    assert_eq!(outcome.job.status, JobStatus::Ready);
    assert!(outcome.notification.should_notify);

    let message = outcome.notification.message.as_deref().unwrap();
    assert!(message.contains("John Doe"));
    assert!(message.contains("iPhone 13"));
    assert!(message.contains("0.00"));

    let url = outcome.whatsapp_url.unwrap();
    assert!(url.starts_with("https://wa.me/12345678900?text="));

    assert_eq!(outcome.events.len(), 2);
    assert!(matches!(
        outcome.events[0],
        JobEvent::JobStatusChanged {
            old_status: JobStatus::ToDo,
            new_status: JobStatus::Ready,
            ..
        }
    ));
    assert!(matches!(outcome.events[1], JobEvent::CustomerNotified { .. }));

    Ok(())
}

#[tokio::test]
async fn change_status_no_op_skips_writes_and_notification() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let job = intake(request("123-456-7890", "SN12345678")).await?;

    let outcome = change_status(job.id, JobStatus::ToDo, &FailingJudge).await?;

    assert!(!outcome.changed);
    assert!(!outcome.notification.should_notify);
    assert!(outcome.whatsapp_url.is_none());
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.job.updated_at, job.updated_at);

    Ok(())
}

#[tokio::test]
async fn change_status_to_waiting_respects_declining_judge() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let job = intake(request("123-456-7890", "SN12345678")).await?;

    let outcome = change_status(job.id, JobStatus::Waiting, &declining_judge()).await?;

    assert!(outcome.changed);
    assert_eq!(outcome.job.status, JobStatus::Waiting);
    assert!(!outcome.notification.should_notify);
    assert!(outcome.whatsapp_url.is_none());
    assert_eq!(outcome.events.len(), 1);

    Ok(())
}

#[tokio::test]
async fn change_status_to_waiting_uses_judge_draft() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let job = intake(request("123-456-7890", "SN12345678")).await?;

    let judge = StaticJudge(JudgeVerdict {
        notify: true,
        draft: Some("We've ordered parts for your iPhone 13.".to_string()),
    });
    let outcome = change_status(job.id, JobStatus::Waiting, &judge).await?;

    assert!(outcome.notification.should_notify);
    assert_eq!(
        outcome.notification.message.as_deref(),
        Some("We've ordered parts for your iPhone 13.")
    );
    assert!(outcome.whatsapp_url.is_some());

    Ok(())
}

#[tokio::test]
async fn change_status_unknown_job_is_not_found() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    let result = change_status(JobId::new(), JobStatus::Done, &FailingJudge).await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));

    Ok(())
}
