//! Customer repository for lookups and create-if-absent by phone.

use chrono::{DateTime, Utc};
use fixflow_core::{Customer, CustomerId};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::{DbError, get_db};

/// Repository for customer persistence operations.
pub struct CustomerRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct CustomerRecord {
    id: Option<Thing>,
    name: String,
    phone: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl CustomerRecord {
    fn record_id(&self) -> CustomerId {
        let id_str = self.id.as_ref().map(|t| t.id.to_raw()).unwrap_or_default();
        CustomerId::parse(&id_str).unwrap_or_else(|_| CustomerId::new())
    }

    fn into_customer(self, customer_id: CustomerId) -> Customer {
        Customer {
            id: customer_id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Struct for creating customers - omits datetime fields to use SurrealDB defaults.
#[derive(Debug, Clone, Serialize)]
struct CustomerCreate {
    name: String,
    phone: String,
    email: Option<String>,
}

/// Input for [`CustomerRepository::upsert`].
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl CustomerRepository {
    /// Get a customer by ID.
    pub async fn get(id: CustomerId) -> Result<Customer, DbError> {
        let db = get_db()?;

        let record: Option<CustomerRecord> = db.select(("customer", id.to_string())).await?;

        record
            .map(|r| r.into_customer(id))
            .ok_or_else(|| DbError::NotFound(format!("Customer not found: {}", id)))
    }

    /// Look up a customer by phone number.
    pub async fn get_by_phone(phone: &str) -> Result<Option<Customer>, DbError> {
        let db = get_db()?;
        let phone_owned = phone.to_string();

        let mut result = db
            .query("SELECT * FROM customer WHERE phone = $phone LIMIT 1")
            .bind(("phone", phone_owned))
            .await?;

        let records: Vec<CustomerRecord> = result.take(0)?;

        Ok(records.into_iter().next().map(|r| {
            let customer_id = r.record_id();
            r.into_customer(customer_id)
        }))
    }

    /// Resolve a customer by phone, creating the record when absent.
    ///
    /// An existing customer is returned unchanged; the submitted name and
    /// email are ignored in that case. The unique phone index makes the
    /// create atomic: when a concurrent intake wins the race, the losing
    /// create re-reads and returns the winner.
    pub async fn upsert(input: NewCustomer) -> Result<Customer, DbError> {
        if let Some(existing) = Self::get_by_phone(&input.phone).await? {
            return Ok(existing);
        }

        let customer_id = CustomerId::new();
        let create_data = CustomerCreate {
            name: input.name,
            phone: input.phone.clone(),
            email: input.email,
        };

        let db = get_db()?;
        let created: Result<Option<CustomerRecord>, surrealdb::Error> = db
            .create(("customer", customer_id.to_string()))
            .content(create_data)
            .await;

        match created {
            Ok(record) => record
                .map(|r| r.into_customer(customer_id))
                .ok_or_else(|| DbError::Query("Failed to create customer".into())),
            Err(err) => match Self::get_by_phone(&input.phone).await? {
                Some(winner) => Ok(winner),
                None => Err(err.into()),
            },
        }
    }

    /// Count all customers.
    pub async fn count() -> Result<u64, DbError> {
        let db = get_db()?;

        let mut result = db.query("SELECT count() FROM customer GROUP ALL").await?;

        #[derive(Deserialize)]
        struct CountResult {
            count: i64,
        }

        let counts: Vec<CountResult> = result.take(0)?;

        Ok(counts.first().map(|c| c.count as u64).unwrap_or(0))
    }
}
