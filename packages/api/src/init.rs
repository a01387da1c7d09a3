//! Server initialization for the FixFlow workshop tracker.

use db::repositories::{
    CustomerRepository, DeviceRepository, JobRepository, NewCustomer, NewDevice,
};
use db::{DbConfig, DbError, init as init_db};
use fixflow_core::{DeviceType, Job, JobStatus, Urgency};

/// Initialize the FixFlow backend.
///
/// This should be called once at server startup before handling requests.
pub async fn init_fixflow() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Initializing FixFlow...");

    // File-backed storage when a data dir is configured, in-memory otherwise
    let db_config = match std::env::var("FIXFLOW_DATA_DIR") {
        Ok(dir) => DbConfig::file(format!("{}/surrealdb", dir)),
        Err(_) => DbConfig::memory(),
    };

    init_db(db_config).await?;

    // Seed demo workshop data when starting empty
    if CustomerRepository::count().await? == 0 {
        tracing::info!("Seeding demo workshop data...");
        if let Err(e) = seed_demo_data().await {
            tracing::warn!("Failed to seed demo data: {}", e);
        }
    }

    tracing::info!("FixFlow initialized");
    Ok(())
}

/// Demo customers, devices, and jobs for a fresh database.
async fn seed_demo_data() -> Result<(), DbError> {
    let john = CustomerRepository::upsert(NewCustomer {
        name: "John Doe".to_string(),
        phone: "123-456-7890".to_string(),
        email: Some("john.doe@example.com".to_string()),
    })
    .await?;
    let jane = CustomerRepository::upsert(NewCustomer {
        name: "Jane Smith".to_string(),
        phone: "098-765-4321".to_string(),
        email: Some("jane.smith@example.com".to_string()),
    })
    .await?;
    let peter = CustomerRepository::upsert(NewCustomer {
        name: "Peter Jones".to_string(),
        phone: "555-555-5555".to_string(),
        email: Some("peter.jones@example.com".to_string()),
    })
    .await?;

    let iphone = DeviceRepository::upsert(
        NewDevice {
            serial_number: "SN12345678".to_string(),
            model: "iPhone 13".to_string(),
            device_type: DeviceType::Phone,
        },
        &john,
    )
    .await?;
    let macbook = DeviceRepository::upsert(
        NewDevice {
            serial_number: "SN87654321".to_string(),
            model: "MacBook Pro 16\"".to_string(),
            device_type: DeviceType::Laptop,
        },
        &jane,
    )
    .await?;
    let ipad = DeviceRepository::upsert(
        NewDevice {
            serial_number: "SN55555555".to_string(),
            model: "iPad Air".to_string(),
            device_type: DeviceType::Tablet,
        },
        &peter,
    )
    .await?;
    let galaxy = DeviceRepository::upsert(
        NewDevice {
            serial_number: "SN99999999".to_string(),
            model: "Galaxy S22".to_string(),
            device_type: DeviceType::Phone,
        },
        &john,
    )
    .await?;

    let cracked_screen = Job::new(
        john.id,
        iphone.id,
        "Screen is cracked after a drop. The touch functionality is intermittent.",
    )
    .with_urgency(Urgency::High)
    .with_tags(vec![
        "screen_replacement".to_string(),
        "impact_damage".to_string(),
    ])
    .with_cost(250.0);
    JobRepository::create(&cracked_screen).await?;

    let no_power = Job::new(
        jane.id,
        macbook.id,
        "Laptop is not turning on. No lights, no sounds. Was working fine yesterday.",
    )
    .with_urgency(Urgency::High)
    .with_tags(vec!["no_power".to_string(), "diagnostics".to_string()])
    .with_cost(75.0);
    JobRepository::create(&no_power).await?;

    let battery = Job::new(
        peter.id,
        ipad.id,
        "Customer wants a new battery. Current one only lasts a couple of hours.",
    )
    .with_urgency(Urgency::Medium)
    .with_tags(vec!["battery_replacement".to_string()])
    .with_cost(150.0);
    JobRepository::create(&battery).await?;
    JobRepository::update_status(battery.id, JobStatus::Waiting).await?;

    let charging_port = Job::new(
        john.id,
        galaxy.id,
        "Device is ready for pickup. Replaced the charging port.",
    )
    .with_urgency(Urgency::Low)
    .with_tags(vec!["charging_port".to_string(), "soldering".to_string()])
    .with_cost(95.0);
    JobRepository::create(&charging_port).await?;
    JobRepository::update_status(charging_port.id, JobStatus::Ready).await?;

    tracing::info!("Seeded 3 customers, 4 devices, 4 jobs");
    Ok(())
}
