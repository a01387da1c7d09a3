//! AI-assisted job entry triage.
//!
//! Turns a technician's raw issue note into suggested tags, an urgency,
//! and a short summary for the new-job form.

use fixflow_core::Urgency;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{AiConfig, AiError, parse_json_reply};

/// Minimum issue-description length worth a model call.
const MIN_DESCRIPTION_LEN: usize = 10;

/// Triage suggestion for a new job entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySuggestion {
    /// One to three technical issue tags.
    pub tags: Vec<String>,
    /// Suggested urgency based on the note's wording.
    pub urgency: Urgency,
    /// Five-word summary of the issue, usable as a title.
    pub summary: String,
}

const TRIAGE_PREAMBLE: &str = "\
You are a device repair expert triaging a technician's raw intake note. \
Extract 1-3 technical issue tags (e.g. \"screen_replacement\", \
\"power_supply\", \"battery\"), pick an urgency of low, medium or high based \
on the wording (words like \"urgent\" or \"ASAP\" mean high), and summarize \
the issue in five words. Answer with a single JSON object, no prose and no \
code fence: {\"tags\": [string], \"urgency\": \"low\"|\"medium\"|\"high\", \
\"summary\": string}";

/// Triage an issue description into tags, urgency, and a summary.
///
/// Descriptions under ten characters are rejected without a model call.
pub async fn suggest_entry(
    config: &AiConfig,
    issue_description: &str,
) -> Result<EntrySuggestion, AiError> {
    if issue_description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(AiError::DescriptionTooShort);
    }

    let client: rig::providers::anthropic::Client =
        rig::providers::anthropic::Client::new(config.api_key.expose_secret())
            .map_err(|e| AiError::NotConfigured(e.to_string()))?;

    let agent = client
        .agent(&config.model)
        .preamble(TRIAGE_PREAMBLE)
        .max_tokens(512)
        .temperature(0.2)
        .build();

    let reply = agent
        .prompt(format!("Technician note: {issue_description}"))
        .await
        .map_err(|e| AiError::Request(e.to_string()))?;

    parse_json_reply(&reply)
}
