//! Job domain types for repair work orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

use crate::{CustomerId, DeviceId};

/// Unique identifier for a job, using ULID for chronological sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Ulid);

impl JobId {
    /// Create a new unique job ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a job ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a workflow enum fails to parse from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Triage urgency for a job.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl Urgency {
    /// Get the wire string for this urgency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(ParseEnumError {
                kind: "urgency",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a job.
///
/// The board reads left to right: To Do -> Waiting -> Ready -> Done. Any
/// status is reachable from any other; only the forward moves carry business
/// meaning, and there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is logged and waiting for a technician.
    #[default]
    ToDo,
    /// Job is blocked, typically on parts or a customer decision.
    Waiting,
    /// Device is repaired and ready for pickup.
    Ready,
    /// Job is finished and handed back.
    Done,
}

impl JobStatus {
    /// All statuses in board order.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::ToDo,
        JobStatus::Waiting,
        JobStatus::Ready,
        JobStatus::Done,
    ];

    /// Get the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::ToDo => "to_do",
            JobStatus::Waiting => "waiting",
            JobStatus::Ready => "ready",
            JobStatus::Done => "done",
        }
    }

    /// Human-readable label as shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::ToDo => "To Do",
            JobStatus::Waiting => "Waiting",
            JobStatus::Ready => "Ready",
            JobStatus::Done => "Done",
        }
    }

    /// Whether this status marks the job as repaired or handed back, the
    /// two moves that always reach the customer.
    pub fn is_customer_facing(&self) -> bool {
        matches!(self, JobStatus::Ready | JobStatus::Done)
    }
}

impl std::str::FromStr for JobStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_do" => Ok(JobStatus::ToDo),
            "waiting" => Ok(JobStatus::Waiting),
            "ready" => Ok(JobStatus::Ready),
            "done" => Ok(JobStatus::Done),
            other => Err(ParseEnumError {
                kind: "job status",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A job is a single repair work order for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for this job.
    pub id: JobId,
    /// The customer who brought the device in.
    pub customer_id: CustomerId,
    /// The device being repaired.
    pub device_id: DeviceId,
    /// Free-text description of the issue.
    pub description: String,
    /// Current workflow status.
    pub status: JobStatus,
    /// Triage urgency.
    pub urgency: Urgency,
    /// Issue tags from triage or manual entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Quoted repair cost; non-negative.
    pub cost: f64,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job in the initial "To Do" status with zero cost.
    pub fn new(
        customer_id: CustomerId,
        device_id: DeviceId,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            customer_id,
            device_id,
            description: description.into(),
            status: JobStatus::ToDo,
            urgency: Urgency::default(),
            tags: Vec::new(),
            cost: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the urgency for this job.
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Add tags to this job.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the quoted cost for this job.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}
