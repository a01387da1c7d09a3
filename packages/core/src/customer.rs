//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub Ulid);

impl CustomerId {
    /// Create a new unique customer ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a customer ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer of the workshop.
///
/// The phone number is the natural key: intake dedupes customers by phone,
/// so one person keeps one record across any number of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for this customer.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Contact phone number; natural key for dedupe.
    pub phone: String,
    /// Contact email, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the customer was first recorded.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer record.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            created_at: Utc::now(),
        }
    }

    /// Set the email for this customer.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
