//! Device domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::CustomerId;

/// Unique identifier for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub Ulid);

impl DeviceId {
    /// Create a new unique device ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a device ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of device on the bench.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Phone,
    Laptop,
    Tablet,
    #[default]
    Other,
}

impl DeviceType {
    /// Get the wire string for this device type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Phone => "phone",
            DeviceType::Laptop => "laptop",
            DeviceType::Tablet => "tablet",
            DeviceType::Other => "other",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Phone => write!(f, "Phone"),
            DeviceType::Laptop => write!(f, "Laptop"),
            DeviceType::Tablet => write!(f, "Tablet"),
            DeviceType::Other => write!(f, "Other"),
        }
    }
}

/// A physical unit brought in for repair.
///
/// The serial number is the natural key: one record per physical device,
/// reused across every job for that unit. The owning customer is attached
/// when the record is first created and never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier for this device.
    pub id: DeviceId,
    /// Manufacturer serial number; natural key, unique.
    pub serial_number: String,
    /// Model name, e.g. "iPhone 13".
    pub model: String,
    /// Device category.
    pub device_type: DeviceType,
    /// The customer who owns this device.
    pub customer_id: CustomerId,
    /// When the device was first recorded.
    pub created_at: DateTime<Utc>,
}

impl Device {
    /// Create a new device record owned by the given customer.
    pub fn new(
        serial_number: impl Into<String>,
        model: impl Into<String>,
        customer_id: CustomerId,
    ) -> Self {
        Self {
            id: DeviceId::new(),
            serial_number: serial_number.into(),
            model: model.into(),
            device_type: DeviceType::default(),
            customer_id,
            created_at: Utc::now(),
        }
    }

    /// Set the device type.
    pub fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }
}
