//! # rolescope_core
//!
//! Configuration, role validation and orchestration for rolescope.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Acquire    │──▶│   Extract    │──▶│  Recommend   │──▶│   Validate   │
//! │ local / git  │   │ .bicep scan  │   │ HTTP + LLM   │   │ role catalog │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!         │                  │                  │                  │
//!         └──────────────────┴────────┬─────────┴──────────────────┘
//!                                     ▼
//!                             ┌───────────────┐
//!                             │  EventSink    │
//!                             └───────────────┘
//! ```
//!
//! Credentials and the catalog are loaded by the caller (see [`config`])
//! and handed to [`Pipeline::new`].

pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod validator;

pub use config::{
    load_credentials, PipelineOptions, RoleCatalog, RoleCatalogEntry, DEFAULT_CATALOG_FILE,
    DEFAULT_CREDENTIALS_FILE,
};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use events::{EventKind, EventSink, PipelineEvent, PipelineStep, RecordingSink, TracingSink};
pub use pipeline::{Pipeline, PipelineReport};
pub use validator::{validate_roles, RolePartition};
