mod common;

use std::error::Error;

use fixflow_core::{DeviceType, Job, JobId, JobStatus, Urgency};

use db::repositories::{CustomerRepository, DeviceRepository, JobRepository, NewCustomer, NewDevice};
use db::{DbError, repositories::JobFilter};

fn new_customer(name: &str, phone: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
    }
}

fn new_device(serial: &str, model: &str) -> NewDevice {
    NewDevice {
        serial_number: serial.to_string(),
        model: model.to_string(),
        device_type: DeviceType::Phone,
    }
}

#[tokio::test]
async fn test_repositories() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    // CustomerRepository: upsert creates, then dedupes by phone
    let john = CustomerRepository::upsert(new_customer("John Doe", "123-456-7890")).await?;
    assert_eq!(john.name, "John Doe");

    let looked_up = CustomerRepository::get_by_phone("123-456-7890").await?;
    assert_eq!(looked_up.as_ref().map(|c| c.id), Some(john.id));

    // Same phone under a different name returns the original record unchanged
    let dupe = CustomerRepository::upsert(new_customer("J. Doe", "123-456-7890")).await?;
    assert_eq!(dupe.id, john.id);
    assert_eq!(dupe.name, "John Doe");

    let still_there = CustomerRepository::get_by_phone("123-456-7890").await?;
    assert_eq!(still_there.map(|c| c.id), Some(john.id));

    assert_eq!(CustomerRepository::count().await?, 1);

    let by_id = CustomerRepository::get(john.id).await?;
    assert_eq!(by_id.phone, "123-456-7890");

    let missing_phone = CustomerRepository::get_by_phone("000").await?;
    assert!(missing_phone.is_none());

    // DeviceRepository: upsert creates, then dedupes by serial
    let phone = DeviceRepository::upsert(new_device("SN12345678", "iPhone 13"), &john).await?;
    assert_eq!(phone.customer_id, john.id);
    assert_eq!(phone.device_type, DeviceType::Phone);

    let by_serial = DeviceRepository::get_by_serial("SN12345678").await?;
    assert_eq!(by_serial.map(|d| d.id), Some(phone.id));

    // Same serial submitted under a different customer: the record is
    // reused and ownership stays with the original customer.
    let jane = CustomerRepository::upsert(new_customer("Jane Smith", "098-765-4321")).await?;
    let resubmitted =
        DeviceRepository::upsert(new_device("SN12345678", "iPhone 13 Pro"), &jane).await?;
    assert_eq!(resubmitted.id, phone.id);
    assert_eq!(resubmitted.customer_id, john.id);
    assert_eq!(resubmitted.model, "iPhone 13");

    let johns_devices = DeviceRepository::list_for_customer(john.id).await?;
    assert_eq!(johns_devices.len(), 1);
    let janes_devices = DeviceRepository::list_for_customer(jane.id).await?;
    assert!(janes_devices.is_empty());

    // JobRepository: create/get round-trip lands in the initial state
    let job = Job::new(john.id, phone.id, "Screen cracked after a drop, touch intermittent")
        .with_urgency(Urgency::High)
        .with_tags(vec!["screen_replacement".to_string()]);
    let created = JobRepository::create(&job).await?;
    assert_eq!(created.status, JobStatus::ToDo);
    assert_eq!(created.cost, 0.0);

    let loaded = JobRepository::get(job.id).await?;
    assert_eq!(loaded.id, job.id);
    assert_eq!(loaded.status, JobStatus::ToDo);
    assert_eq!(loaded.cost, 0.0);
    assert_eq!(loaded.urgency, Urgency::High);
    assert_eq!(loaded.tags, vec!["screen_replacement".to_string()]);
    assert_eq!(loaded.created_at, loaded.updated_at);

    // JobRepository: status updates touch updated_at
    let updated = JobRepository::update_status(job.id, JobStatus::Waiting).await?;
    assert_eq!(updated.status, JobStatus::Waiting);
    assert!(updated.updated_at >= updated.created_at);

    let reloaded = JobRepository::get(job.id).await?;
    assert_eq!(reloaded.status, JobStatus::Waiting);

    let missing = JobRepository::update_status(JobId::new(), JobStatus::Done).await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));

    // JobRepository: list filters
    let second = Job::new(jane.id, phone.id, "Battery only lasts a couple of hours");
    JobRepository::create(&second).await?;

    let all = JobRepository::list(JobFilter::default()).await?;
    assert_eq!(all.len(), 2);

    let waiting = JobRepository::list(JobFilter {
        status: Some(JobStatus::Waiting),
        ..Default::default()
    })
    .await?;
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].id, job.id);

    let janes_jobs = JobRepository::list(JobFilter {
        customer_id: Some(jane.id),
        ..Default::default()
    })
    .await?;
    assert_eq!(janes_jobs.len(), 1);
    assert_eq!(janes_jobs[0].id, second.id);

    let high = JobRepository::list(JobFilter {
        urgency: Some(Urgency::High),
        ..Default::default()
    })
    .await?;
    assert_eq!(high.len(), 1);

    let limited = JobRepository::list(JobFilter {
        limit: Some(1),
        ..Default::default()
    })
    .await?;
    assert_eq!(limited.len(), 1);

    Ok(())
}
