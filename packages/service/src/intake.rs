//! Job intake: validate raw form input, resolve-or-create the customer and
//! device by their natural keys, then log the job in "To Do".

use chrono::Utc;
use db::repositories::{
    CustomerRepository, DeviceRepository, JobRepository, NewCustomer, NewDevice,
};
use fixflow_core::{DeviceType, Job, JobEvent, Urgency};
use serde::{Deserialize, Serialize};

use ai::EntrySuggestion;

use crate::{ServiceError, ValidationErrors};

/// Minimum length for a usable issue description.
const MIN_DESCRIPTION_LEN: usize = 10;

/// Raw intake input as it arrives from the new-job form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeRequest {
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

impl IntakeRequest {
    /// Check every field, collecting all failures rather than stopping at
    /// the first. Returns the parsed urgency on success.
    fn validate(&self) -> Result<Urgency, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.customer_name.trim().is_empty() {
            errors.push("customer_name", "Customer name is required");
        }
        if self.customer_phone.trim().is_empty() {
            errors.push("customer_phone", "Customer phone is required");
        }
        if let Some(email) = self.email() {
            if !email.contains('@') {
                errors.push("customer_email", "Invalid email address");
            }
        }
        if self.device_serial.trim().is_empty() {
            errors.push("device_serial", "Device serial is required");
        }
        if self.device_model.trim().is_empty() {
            errors.push("device_model", "Device model is required");
        }
        if self.issue_description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            errors.push("issue_description", "Please provide a detailed description");
        }

        let urgency = match self.urgency.parse::<Urgency>() {
            Ok(urgency) => urgency,
            Err(_) => {
                errors.push("urgency", "Urgency must be low, medium, or high");
                Urgency::default()
            }
        };

        if errors.is_empty() {
            Ok(urgency)
        } else {
            Err(errors)
        }
    }

    /// Email with empty submissions treated as absent.
    fn email(&self) -> Option<&str> {
        self.customer_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Create a new job from raw intake input.
///
/// Customer and device are resolved by their natural keys (phone, serial)
/// and created only when absent; an existing device keeps its original
/// owner. The job itself always starts in "To Do" with zero cost.
pub async fn intake(request: IntakeRequest) -> Result<Job, ServiceError> {
    let urgency = request.validate().map_err(ServiceError::Validation)?;

    let customer = CustomerRepository::upsert(NewCustomer {
        name: request.customer_name.trim().to_string(),
        phone: request.customer_phone.trim().to_string(),
        email: request.email().map(str::to_string),
    })
    .await?;

    let device = DeviceRepository::upsert(
        NewDevice {
            serial_number: request.device_serial.trim().to_string(),
            model: request.device_model.trim().to_string(),
            device_type: DeviceType::default(),
        },
        &customer,
    )
    .await?;

    let job = Job::new(customer.id, device.id, request.issue_description.trim())
        .with_tags(request.tags)
        .with_urgency(urgency);
    let job = JobRepository::create(&job).await?;

    let event = JobEvent::JobCreated {
        job: job.clone(),
        timestamp: Utc::now(),
    };
    tracing::info!("{}", event.description());

    Ok(job)
}

/// The editable part of the new-job form that AI triage can fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub description: String,
    pub tags: Vec<String>,
    pub urgency: Urgency,
}

/// Merge a triage suggestion into a form draft.
///
/// Tags and urgency are replaced wholesale; the technician's description is
/// left alone. The suggestion's summary is display-only and not merged.
pub fn apply_ai_suggestion(mut draft: JobDraft, suggestion: &EntrySuggestion) -> JobDraft {
    draft.tags = suggestion.tags.clone();
    draft.urgency = suggestion.urgency;
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> IntakeRequest {
        IntakeRequest {
            customer_name: "John Doe".to_string(),
            customer_phone: "123-456-7890".to_string(),
            customer_email: Some("john.doe@example.com".to_string()),
            device_serial: "SN12345678".to_string(),
            device_model: "iPhone 13".to_string(),
            issue_description: "Screen cracked after a drop, touch intermittent".to_string(),
            tags: vec!["screen_replacement".to_string()],
            urgency: "high".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(valid_request().validate(), Ok(Urgency::High));
    }

    #[test]
    fn short_description_fails() {
        let request = IntakeRequest {
            issue_description: "short".to_string(),
            ..valid_request()
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.for_field("issue_description"),
            vec!["Please provide a detailed description"]
        );
    }

    #[test]
    fn nine_character_description_fails() {
        let request = IntakeRequest {
            issue_description: "no power.".to_string(),
            ..valid_request()
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let request = IntakeRequest {
            customer_name: "  ".to_string(),
            customer_phone: String::new(),
            device_serial: String::new(),
            ..valid_request()
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 3);
        assert!(!errors.for_field("customer_name").is_empty());
        assert!(!errors.for_field("customer_phone").is_empty());
        assert!(!errors.for_field("device_serial").is_empty());
    }

    #[test]
    fn bad_urgency_fails() {
        let request = IntakeRequest {
            urgency: "critical".to_string(),
            ..valid_request()
        };

        let errors = request.validate().unwrap_err();
        assert!(!errors.for_field("urgency").is_empty());
    }

    #[test]
    fn empty_email_is_treated_as_absent() {
        let request = IntakeRequest {
            customer_email: Some("   ".to_string()),
            ..valid_request()
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn malformed_email_fails() {
        let request = IntakeRequest {
            customer_email: Some("not-an-address".to_string()),
            ..valid_request()
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.for_field("customer_email"), vec!["Invalid email address"]);
    }

    #[test]
    fn suggestion_replaces_tags_and_urgency_only() {
        let draft = JobDraft {
            description: "Console will not read discs".to_string(),
            tags: vec!["manual_tag".to_string()],
            urgency: Urgency::Low,
        };
        let suggestion = EntrySuggestion {
            tags: vec!["disc_drive".to_string(), "laser".to_string()],
            urgency: Urgency::High,
            summary: "Disc drive fails to read".to_string(),
        };

        let merged = apply_ai_suggestion(draft, &suggestion);

        assert_eq!(merged.description, "Console will not read discs");
        assert_eq!(merged.tags, vec!["disc_drive", "laser"]);
        assert_eq!(merged.urgency, Urgency::High);
    }
}
