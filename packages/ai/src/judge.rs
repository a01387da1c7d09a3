//! Notification judgment for ambiguous status changes.
//!
//! Deterministic rules in the workflow layer cover most status changes;
//! this judge is consulted only for the ambiguous ones (a job moving to
//! "Waiting"). It answers with a strict-JSON verdict that the policy can
//! parse without further model round-trips.

use fixflow_core::JobStatus;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{AiConfig, AiError, parse_json_reply};

/// Context handed to the judge for one status change.
#[derive(Debug, Clone, Serialize)]
pub struct JudgeRequest {
    pub previous_status: JobStatus,
    pub new_status: JobStatus,
    pub customer_name: String,
    pub device: String,
    pub cost: f64,
    pub job_id: String,
}

/// The judge's verdict on one status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeVerdict {
    /// Whether a notification should reach the customer.
    pub notify: bool,
    /// Message draft; expected whenever `notify` is true.
    #[serde(default)]
    pub draft: Option<String>,
}

/// A capability that can judge whether a status change warrants a
/// customer notification.
pub trait NotifyJudge: Send + Sync {
    fn judge(
        &self,
        request: &JudgeRequest,
    ) -> impl Future<Output = Result<JudgeVerdict, AiError>> + Send;
}

const JUDGE_PREAMBLE: &str = "\
You decide whether a device-repair status change should be messaged to the \
customer, and draft the message when it should. A move to \"Waiting\" means \
the shop is blocked on parts or a customer decision: always notify for it, \
with a short friendly note in the style of \"we've ordered parts for your \
device and will keep you posted\". Purely internal shuffling should not be \
messaged. Answer with a single JSON object, no prose and no code fence: \
{\"notify\": boolean, \"draft\": string or null}";

/// Production judge backed by an Anthropic model through rig-core.
pub struct AnthropicJudge {
    agent: rig::agent::Agent<rig::providers::anthropic::completion::CompletionModel>,
}

impl AnthropicJudge {
    /// Build a judge from the given configuration.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = rig::providers::anthropic::Client::new(config.api_key.expose_secret())
            .map_err(|e| AiError::NotConfigured(e.to_string()))?;

        let agent = client
            .agent(&config.model)
            .preamble(JUDGE_PREAMBLE)
            .max_tokens(512)
            .temperature(0.2)
            .build();

        Ok(Self { agent })
    }
}

impl NotifyJudge for AnthropicJudge {
    async fn judge(&self, request: &JudgeRequest) -> Result<JudgeVerdict, AiError> {
        let prompt = format!(
            "Status change: {} -> {}\nCustomer: {}\nDevice: {}\nCost: {:.2}\nJob ID: {}",
            request.previous_status.label(),
            request.new_status.label(),
            request.customer_name,
            request.device,
            request.cost,
            request.job_id,
        );

        let reply = self
            .agent
            .prompt(prompt)
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        parse_json_reply(&reply)
    }
}

/// Judge wired from the environment at startup.
///
/// Runs disabled when no API key is configured: every consultation then
/// fails with [`AiError::NotConfigured`], which callers degrade to "do not
/// notify".
pub enum ConfiguredJudge {
    Enabled(AnthropicJudge),
    Disabled,
}

impl ConfiguredJudge {
    /// Build the judge from environment variables, falling back to the
    /// disabled judge when configuration is missing or unusable.
    pub fn from_env() -> Self {
        let config = match crate::AiConfig::from_env() {
            Ok(config) => config,
            Err(err) => {
                tracing::info!("notification judge disabled: {}", err);
                return ConfiguredJudge::Disabled;
            }
        };

        match AnthropicJudge::new(&config) {
            Ok(judge) => ConfiguredJudge::Enabled(judge),
            Err(err) => {
                tracing::warn!("notification judge disabled: {}", err);
                ConfiguredJudge::Disabled
            }
        }
    }
}

impl NotifyJudge for ConfiguredJudge {
    async fn judge(&self, request: &JudgeRequest) -> Result<JudgeVerdict, AiError> {
        match self {
            ConfiguredJudge::Enabled(judge) => judge.judge(request).await,
            ConfiguredJudge::Disabled => Err(AiError::NotConfigured(
                "ANTHROPIC_API_KEY is not set".into(),
            )),
        }
    }
}
