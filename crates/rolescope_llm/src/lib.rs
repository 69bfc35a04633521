//! # rolescope_llm
//!
//! Client for the language-model endpoint that recommends access-control
//! roles for a set of resource types.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::BTreeSet;
//! use rolescope_llm::{Credentials, RecommendationClient, RecommendationService, DEFAULT_TIMEOUT};
//!
//! # async fn run() -> rolescope_llm::LlmResult<()> {
//! let credentials = Credentials::new("https://example.com/score", "token");
//! let client = RecommendationClient::new(&credentials, DEFAULT_TIMEOUT)?;
//!
//! let types: BTreeSet<String> = ["Microsoft.KeyVault/vaults".to_string()].into();
//! let recommendation = client.recommend(&types).await?;
//! println!("{:?}", recommendation.roles);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod response;

pub use client::{RecommendationClient, RecommendationService, DEFAULT_TIMEOUT};
pub use credentials::Credentials;
pub use error::{LlmError, LlmResult};
pub use response::{
    outermost_object, parse_chat_output, parse_recommendation, unwrap_code_fence, ChatRequest,
    ChatResponse, RoleRecommendation,
};
