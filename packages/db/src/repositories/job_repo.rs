//! Job repository for CRUD operations.

use chrono::{DateTime, Utc};
use fixflow_core::{CustomerId, DeviceId, Job, JobId, JobStatus, Urgency};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::{DbError, get_db};

/// Repository for job persistence operations.
pub struct JobRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct JobRecord {
    id: Option<Thing>,
    customer_id: String,
    device_id: String,
    description: String,
    status: JobStatus,
    urgency: Urgency,
    #[serde(default)]
    tags: Vec<String>,
    cost: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRecord {
    fn record_id(&self) -> JobId {
        let id_str = self.id.as_ref().map(|t| t.id.to_raw()).unwrap_or_default();
        JobId::parse(&id_str).unwrap_or_else(|_| JobId::new())
    }

    fn into_job(self, job_id: JobId) -> Job {
        let customer_id =
            CustomerId::parse(&self.customer_id).unwrap_or_else(|_| CustomerId::new());
        let device_id = DeviceId::parse(&self.device_id).unwrap_or_else(|_| DeviceId::new());
        Job {
            id: job_id,
            customer_id,
            device_id,
            description: self.description,
            status: self.status,
            urgency: self.urgency,
            tags: self.tags,
            cost: self.cost,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Struct for creating jobs - omits datetime fields to use SurrealDB defaults.
#[derive(Debug, Clone, Serialize)]
struct JobCreate {
    customer_id: String,
    device_id: String,
    description: String,
    status: JobStatus,
    urgency: Urgency,
    tags: Vec<String>,
    cost: f64,
}

/// Filter options for listing jobs.
#[derive(Debug, Default, Clone)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub urgency: Option<Urgency>,
    pub customer_id: Option<CustomerId>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl JobRepository {
    /// Create a new job in the database.
    pub async fn create(job: &Job) -> Result<Job, DbError> {
        let db = get_db()?;

        let create_data = JobCreate {
            customer_id: job.customer_id.to_string(),
            device_id: job.device_id.to_string(),
            description: job.description.clone(),
            status: job.status,
            urgency: job.urgency,
            tags: job.tags.clone(),
            cost: job.cost,
        };

        let record: Option<JobRecord> = db
            .create(("job", job.id.to_string()))
            .content(create_data)
            .await?;

        record
            .map(|r| r.into_job(job.id))
            .ok_or_else(|| DbError::Query("Failed to create job".into()))
    }

    /// Get a job by ID.
    pub async fn get(id: JobId) -> Result<Job, DbError> {
        let db = get_db()?;

        let record: Option<JobRecord> = db.select(("job", id.to_string())).await?;

        record
            .map(|r| r.into_job(id))
            .ok_or_else(|| DbError::NotFound(format!("Job not found: {}", id)))
    }

    /// Update a job's status, touching `updated_at`.
    pub async fn update_status(id: JobId, status: JobStatus) -> Result<Job, DbError> {
        let db = get_db()?;

        // Use SurrealQL to set updated_at with time::now()
        let mut result = db
            .query("UPDATE type::thing('job', $id) SET status = $status, updated_at = time::now() RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("status", status))
            .await?;

        let records: Vec<JobRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .map(|r| r.into_job(id))
            .ok_or_else(|| DbError::NotFound(format!("Job not found: {}", id)))
    }

    /// List jobs with optional filtering, newest first.
    pub async fn list(filter: JobFilter) -> Result<Vec<Job>, DbError> {
        let db = get_db()?;

        let mut conditions = Vec::new();
        let mut bindings: Vec<(&str, serde_json::Value)> = Vec::new();

        if let Some(status) = &filter.status {
            conditions.push("status = $status");
            bindings.push(("status", serde_json::json!(status.as_str())));
        }

        if let Some(urgency) = &filter.urgency {
            conditions.push("urgency = $urgency");
            bindings.push(("urgency", serde_json::json!(urgency.as_str())));
        }

        if let Some(customer_id) = &filter.customer_id {
            conditions.push("customer_id = $customer_id");
            bindings.push(("customer_id", serde_json::json!(customer_id.to_string())));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = filter
            .limit
            .map(|l| format!("LIMIT {}", l))
            .unwrap_or_default();

        let offset_clause = filter
            .offset
            .map(|o| format!("START {}", o))
            .unwrap_or_default();

        let query = format!(
            "SELECT * FROM job {} ORDER BY created_at DESC {} {}",
            where_clause, limit_clause, offset_clause
        );

        let mut result = db.query(&query);

        for (name, value) in bindings {
            result = result.bind((name, value));
        }

        let mut response = result.await?;
        let records: Vec<JobRecord> = response.take(0)?;

        Ok(records
            .into_iter()
            .map(|r| {
                let job_id = r.record_id();
                r.into_job(job_id)
            })
            .collect())
    }
}
