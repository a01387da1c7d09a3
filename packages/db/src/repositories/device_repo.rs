//! Device repository for lookups and create-if-absent by serial number.

use chrono::{DateTime, Utc};
use fixflow_core::{Customer, CustomerId, Device, DeviceId, DeviceType};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::{DbError, get_db};

/// Repository for device persistence operations.
pub struct DeviceRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct DeviceRecord {
    id: Option<Thing>,
    serial_number: String,
    model: String,
    device_type: DeviceType,
    customer_id: String,
    created_at: DateTime<Utc>,
}

impl DeviceRecord {
    fn record_id(&self) -> DeviceId {
        let id_str = self.id.as_ref().map(|t| t.id.to_raw()).unwrap_or_default();
        DeviceId::parse(&id_str).unwrap_or_else(|_| DeviceId::new())
    }

    fn into_device(self, device_id: DeviceId) -> Device {
        let customer_id =
            CustomerId::parse(&self.customer_id).unwrap_or_else(|_| CustomerId::new());
        Device {
            id: device_id,
            serial_number: self.serial_number,
            model: self.model,
            device_type: self.device_type,
            customer_id,
            created_at: self.created_at,
        }
    }
}

/// Struct for creating devices - omits datetime fields to use SurrealDB defaults.
#[derive(Debug, Clone, Serialize)]
struct DeviceCreate {
    serial_number: String,
    model: String,
    device_type: DeviceType,
    customer_id: String,
}

/// Input for [`DeviceRepository::upsert`].
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub serial_number: String,
    pub model: String,
    pub device_type: DeviceType,
}

impl DeviceRepository {
    /// Get a device by ID.
    pub async fn get(id: DeviceId) -> Result<Device, DbError> {
        let db = get_db()?;

        let record: Option<DeviceRecord> = db.select(("device", id.to_string())).await?;

        record
            .map(|r| r.into_device(id))
            .ok_or_else(|| DbError::NotFound(format!("Device not found: {}", id)))
    }

    /// Look up a device by serial number.
    pub async fn get_by_serial(serial: &str) -> Result<Option<Device>, DbError> {
        let db = get_db()?;
        let serial_owned = serial.to_string();

        let mut result = db
            .query("SELECT * FROM device WHERE serial_number = $serial LIMIT 1")
            .bind(("serial", serial_owned))
            .await?;

        let records: Vec<DeviceRecord> = result.take(0)?;

        Ok(records.into_iter().next().map(|r| {
            let device_id = r.record_id();
            r.into_device(device_id)
        }))
    }

    /// Resolve a device by serial number, creating the record when absent.
    ///
    /// An existing device is returned unchanged. Ownership stays with the
    /// customer attached at creation time even when the serial shows up
    /// under a different customer's intake. The unique serial index makes
    /// the create atomic; a losing create re-reads and returns the winner.
    pub async fn upsert(input: NewDevice, owner: &Customer) -> Result<Device, DbError> {
        if let Some(existing) = Self::get_by_serial(&input.serial_number).await? {
            return Ok(existing);
        }

        let device_id = DeviceId::new();
        let create_data = DeviceCreate {
            serial_number: input.serial_number.clone(),
            model: input.model,
            device_type: input.device_type,
            customer_id: owner.id.to_string(),
        };

        let db = get_db()?;
        let created: Result<Option<DeviceRecord>, surrealdb::Error> = db
            .create(("device", device_id.to_string()))
            .content(create_data)
            .await;

        match created {
            Ok(record) => record
                .map(|r| r.into_device(device_id))
                .ok_or_else(|| DbError::Query("Failed to create device".into())),
            Err(err) => match Self::get_by_serial(&input.serial_number).await? {
                Some(winner) => Ok(winner),
                None => Err(err.into()),
            },
        }
    }

    /// List devices owned by a customer.
    pub async fn list_for_customer(customer_id: CustomerId) -> Result<Vec<Device>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM device WHERE customer_id = $customer_id ORDER BY created_at ASC")
            .bind(("customer_id", customer_id.to_string()))
            .await?;

        let records: Vec<DeviceRecord> = result.take(0)?;

        Ok(records
            .into_iter()
            .map(|r| {
                let device_id = r.record_id();
                r.into_device(device_id)
            })
            .collect())
    }
}
