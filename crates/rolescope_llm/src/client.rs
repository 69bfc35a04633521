//! HTTP client for the role recommendation endpoint.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Url;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::{LlmError, LlmResult};
use crate::response::{parse_chat_output, ChatRequest, RoleRecommendation};

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Headers checked, in order, for a request id worth reporting.
const REQUEST_ID_HEADERS: [&str; 3] = ["x-request-id", "x-ms-request-id", "apim-request-id"];

/// Anything that can turn resource types into a role recommendation.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(&self, resource_types: &BTreeSet<String>) -> LlmResult<RoleRecommendation>;
}

/// Client for a prompt-flow style chat endpoint.
///
/// Sends a single request per call. Failures are returned as-is; there is
/// no retry.
pub struct RecommendationClient {
    endpoint: Url,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl RecommendationClient {
    pub fn new(credentials: &Credentials, timeout: Duration) -> LlmResult<Self> {
        let endpoint =
            Url::parse(&credentials.api_url).map_err(|e| LlmError::InvalidEndpoint {
                url: credentials.api_url.clone(),
                message: e.to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: credentials.api_key.clone(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl RecommendationService for RecommendationClient {
    async fn recommend(&self, resource_types: &BTreeSet<String>) -> LlmResult<RoleRecommendation> {
        let request = ChatRequest::from_resource_types(resource_types);

        info!(
            "Requesting role recommendation for {} resource types",
            resource_types.len()
        );
        debug!("POST {} chat_input={}", self.endpoint, request.chat_input);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let request_id = request_id(response.headers());
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!(
                "Recommendation service returned {} (request id: {})",
                status,
                request_id.as_deref().unwrap_or("none")
            );
            return Err(LlmError::Service {
                status: status.as_u16(),
                body,
                request_id,
            });
        }

        let recommendation = parse_chat_output(&body)?;
        info!("Received {} recommended roles", recommendation.roles.len());
        Ok(recommendation)
    }
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
    })
}
