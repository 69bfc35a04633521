//! # rolescope_iac
//!
//! Resource-type extraction from Bicep declaration files.
//!
//! A scan walks a directory tree, picks up every `.bicep` file and collects
//! the provider-qualified type of each top-level `resource` declaration with
//! its `@apiVersion` suffix removed. Lines that look like declarations but
//! cannot be parsed are reported as [`ParseWarning`]s instead of being
//! dropped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolescope_iac::ResourceTypeExtractor;
//! use std::path::Path;
//!
//! let extractor = ResourceTypeExtractor::new().unwrap();
//! let report = extractor.extract(Path::new("./infra")).unwrap();
//!
//! for resource_type in &report.resource_types {
//!     println!("{}", resource_type);
//! }
//! ```

pub mod declaration;
pub mod error;
pub mod extractor;

pub use declaration::{DeclarationMatcher, LineMatch, ParseWarning, WarningReason};
pub use error::{IacError, IacResult};
pub use extractor::{ExtractionReport, ResourceTypeExtractor, BICEP_EXTENSION};
