//! Job management server functions.

use dioxus::prelude::*;
use fixflow_core::{Job, JobStatus};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use fixflow_core::JobId;

/// The notification judge, wired from the environment at first use.
#[cfg(feature = "server")]
static JUDGE: std::sync::LazyLock<ai::ConfiguredJudge> =
    std::sync::LazyLock::new(ai::ConfiguredJudge::from_env);

/// Request type for logging a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeJobRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub device_serial: String,
    pub device_model: String,
    pub issue_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub urgency: String,
}

/// Response type for a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeResponse {
    pub job: Job,
    pub previous_status: JobStatus,
    pub changed: bool,
    pub should_notify: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub whatsapp_url: Option<String>,
}

/// Response type for AI-assisted entry triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryAssistResponse {
    pub tags: Vec<String>,
    pub urgency: String,
    pub summary: String,
}

/// Log a new job from raw intake input.
#[post("/api/jobs/intake")]
pub async fn intake_job(request: IntakeJobRequest) -> Result<Job, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use service::ServiceError;

        let request = service::IntakeRequest {
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            device_serial: request.device_serial,
            device_model: request.device_model,
            issue_description: request.issue_description,
            tags: request.tags,
            urgency: request.urgency,
        };

        service::intake(request).await.map_err(|e| match e {
            ServiceError::Validation(errors) => {
                ServerFnError::new(format!("Invalid input: {}", errors))
            }
            other => ServerFnError::new(other.to_string()),
        })
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Change a job's status, running the notification policy.
#[post("/api/jobs/:id/status")]
pub async fn update_job_status(
    id: String,
    status: String,
) -> Result<StatusChangeResponse, ServerFnError> {
    #[cfg(feature = "server")]
    {
        let job_id = JobId::parse(&id)
            .map_err(|e| ServerFnError::new(format!("Invalid job ID: {}", e)))?;

        let requested: JobStatus = status
            .parse()
            .map_err(|e| ServerFnError::new(format!("Invalid status: {}", e)))?;

        let outcome = service::change_status(job_id, requested, &*JUDGE)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

        Ok(StatusChangeResponse {
            job: outcome.job,
            previous_status: outcome.previous,
            changed: outcome.changed,
            should_notify: outcome.notification.should_notify,
            message: outcome.notification.message,
            whatsapp_url: outcome.whatsapp_url,
        })
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Get a job by ID.
#[get("/api/jobs/:id")]
pub async fn get_job(id: String) -> Result<Option<Job>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::DbError;
        use db::repositories::JobRepository;

        let job_id = JobId::parse(&id)
            .map_err(|e| ServerFnError::new(format!("Invalid job ID: {}", e)))?;

        match JobRepository::get(job_id).await {
            Ok(job) => Ok(Some(job)),
            Err(DbError::NotFound(_)) => Ok(None),
            Err(e) => Err(ServerFnError::new(format!("Database error: {}", e))),
        }
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// List jobs for the board, newest first.
#[get("/api/jobs")]
pub async fn list_jobs(
    status: Option<String>,
    limit: Option<usize>,
) -> Result<Vec<Job>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::{JobFilter, JobRepository};

        let status = status
            .map(|s| s.parse::<JobStatus>())
            .transpose()
            .map_err(|e| ServerFnError::new(format!("Invalid status: {}", e)))?;

        let filter = JobFilter {
            status,
            limit: Some(limit.unwrap_or(100)),
            ..Default::default()
        };

        JobRepository::list(filter)
            .await
            .map_err(|e| ServerFnError::new(format!("Database error: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Triage an issue description into tags, urgency, and a summary.
#[post("/api/ai/assist")]
pub async fn assist_entry(issue_description: String) -> Result<EntryAssistResponse, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use ai::{AiConfig, AiError};

        let config =
            AiConfig::from_env().map_err(|e| ServerFnError::new(e.to_string()))?;

        match ai::suggest_entry(&config, &issue_description).await {
            Ok(suggestion) => Ok(EntryAssistResponse {
                tags: suggestion.tags,
                urgency: suggestion.urgency.to_string(),
                summary: suggestion.summary,
            }),
            Err(AiError::DescriptionTooShort) => Err(ServerFnError::new(
                "Please provide a more detailed description.",
            )),
            Err(e) => {
                tracing::error!("AI assistance failed: {}", e);
                Err(ServerFnError::new(
                    "Failed to get AI assistance. Please try again.",
                ))
            }
        }
    }

    #[cfg(not(feature = "server"))]
    {
        Err(ServerFnError::new("Server-only function"))
    }
}
