//! Endpoint credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Endpoint URL and bearer token for the recommendation service.
///
/// Field names follow the credential file layout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "PROMPT_FLOW_API_URL")]
    pub api_url: String,
    #[serde(rename = "PROMPT_FLOW_API_KEY")]
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
