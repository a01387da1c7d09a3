//! LLM capabilities for the FixFlow workshop tracker.
//!
//! Two narrowly-scoped capabilities back the workflow layer, both driven
//! through rig-core's Anthropic provider:
//! - [`NotifyJudge`]: decides whether an ambiguous status change warrants a
//!   customer notification, and drafts the message when it does
//! - [`suggest_entry`]: triages a technician's raw issue note into tags,
//!   an urgency, and a short summary
//!
//! Callers own the fallback story; this crate only reports
//! [`AiError`] and never retries.

mod config;
mod entry;
mod judge;

pub use config::AiConfig;
pub use entry::{EntrySuggestion, suggest_entry};
pub use judge::{AnthropicJudge, ConfiguredJudge, JudgeRequest, JudgeVerdict, NotifyJudge};

use thiserror::Error;

/// Errors from the AI capabilities.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI provider not configured: {0}")]
    NotConfigured(String),
    #[error("AI request failed: {0}")]
    Request(String),
    #[error("AI reply was not usable: {0}")]
    Malformed(String),
    #[error("issue description too short for triage")]
    DescriptionTooShort,
}

/// Extract a JSON object from a model reply.
///
/// Models are instructed to answer with a bare JSON object, but replies
/// occasionally arrive wrapped in a markdown fence or with surrounding
/// prose. Taking the outermost brace pair covers both.
pub(crate) fn parse_json_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T, AiError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => return Err(AiError::Malformed(format!("no JSON object in: {reply}"))),
    };

    serde_json::from_str(json).map_err(|e| AiError::Malformed(format!("{e}: {json}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        notify: bool,
    }

    #[test]
    fn parses_bare_json() {
        let reply: Reply = parse_json_reply(r#"{"notify": true}"#).unwrap();
        assert!(reply.notify);
    }

    #[test]
    fn parses_fenced_json() {
        let reply: Reply =
            parse_json_reply("```json\n{\"notify\": false}\n```").unwrap();
        assert!(!reply.notify);
    }

    #[test]
    fn rejects_reply_without_json() {
        let result: Result<Reply, _> = parse_json_reply("I cannot help with that.");
        assert!(matches!(result, Err(AiError::Malformed(_))));
    }
}
