//! Wire types and unwrapping of the model's answer.
//!
//! The service wraps the model output in a `chat_output` string. Models like
//! to fence JSON in markdown code blocks, so the string is unwrapped with a
//! best-effort heuristic before parsing:
//!
//! 1. If a ```` ``` ```` fence is present, the text after the opening fence
//!    line (minus an optional language tag) up to the closing fence is used.
//!    An unclosed fence runs to the end of the string.
//! 2. If that still does not parse, the span from the first `{` to the last
//!    `}` is tried.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{LlmError, LlmResult};

const FENCE: &str = "```";

/// Request body sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub chat_input: String,
}

impl ChatRequest {
    /// Join resource types in lexicographic order with `,`.
    pub fn from_resource_types(resource_types: &BTreeSet<String>) -> Self {
        let chat_input = resource_types
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Self { chat_input }
    }
}

/// Response body returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_output: String,
}

/// Roles suggested by the model, in the order it listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub roles: Vec<String>,
}

impl RoleRecommendation {
    pub fn new(roles: Vec<String>) -> Self {
        Self { roles }
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Parse a full response body into a recommendation.
pub fn parse_chat_output(body: &str) -> LlmResult<RoleRecommendation> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("unexpected response body: {}", e)))?;
    parse_recommendation(&response.chat_output)
}

/// Parse the inner, possibly fenced, recommendation document.
pub fn parse_recommendation(chat_output: &str) -> LlmResult<RoleRecommendation> {
    let candidate = unwrap_code_fence(chat_output);

    match serde_json::from_str(candidate) {
        Ok(recommendation) => Ok(recommendation),
        Err(first_error) => match outermost_object(candidate) {
            Some(object) if object != candidate => serde_json::from_str(object).map_err(|e| {
                LlmError::MalformedResponse(format!("recommendation is not valid JSON: {}", e))
            }),
            _ => Err(LlmError::MalformedResponse(format!(
                "recommendation is not valid JSON: {}",
                first_error
            ))),
        },
    }
}

/// Strip a markdown code fence, returning the trimmed inner text. Text
/// without a fence is returned trimmed.
pub fn unwrap_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let after_open = &trimmed[open + FENCE.len()..];
    let body = match after_open.find('\n') {
        Some(newline) if is_language_tag(&after_open[..newline]) => &after_open[newline + 1..],
        _ => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    let close = body.find(FENCE).unwrap_or(body.len());
    body[..close].trim()
}

/// Span from the first `{` to the last `}`.
pub fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
