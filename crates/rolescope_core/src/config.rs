//! Configuration loaded once by the entry point and injected into the
//! pipeline: endpoint credentials, the role catalog, and run options.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rolescope_llm::{Credentials, DEFAULT_TIMEOUT};
use rolescope_source::CloneOptions;

use crate::error::{CoreError, CoreResult};

/// Credential file looked up in the working directory by default.
pub const DEFAULT_CREDENTIALS_FILE: &str = "cred.json";

/// Role catalog looked up in the working directory by default.
pub const DEFAULT_CATALOG_FILE: &str = "roles-with-permissions.json";

fn read_config_file(path: &Path) -> CoreResult<String> {
    fs::read_to_string(path).map_err(|e| {
        let message = if e.kind() == std::io::ErrorKind::NotFound {
            "file not found".to_string()
        } else {
            e.to_string()
        };
        CoreError::config(path, message)
    })
}

/// Load endpoint credentials from a JSON credential file.
pub fn load_credentials(path: &Path) -> CoreResult<Credentials> {
    let content = read_config_file(path)?;
    let credentials: Credentials =
        serde_json::from_str(&content).map_err(|e| CoreError::config(path, e.to_string()))?;

    if credentials.api_url.trim().is_empty() {
        return Err(CoreError::config(path, "PROMPT_FLOW_API_URL is empty"));
    }
    if credentials.api_key.trim().is_empty() {
        return Err(CoreError::config(path, "PROMPT_FLOW_API_KEY is empty"));
    }

    debug!("Loaded credentials for {}", credentials.api_url);
    Ok(credentials)
}

/// One known role. Only the name is used for validation; everything else is
/// kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCatalogEntry {
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RoleCatalogEntry {
    pub fn new(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            metadata: serde_json::Map::new(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(|v| v.as_str())
    }

    pub fn permissions(&self) -> Option<&serde_json::Value> {
        self.metadata.get("permissions")
    }
}

/// Known roles keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    entries: HashMap<String, RoleCatalogEntry>,
}

impl RoleCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = RoleCatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.role_name.clone(), entry))
                .collect(),
        }
    }

    /// Load a catalog file holding a JSON array of role records.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = read_config_file(path)?;
        let entries: Vec<RoleCatalogEntry> =
            serde_json::from_str(&content).map_err(|e| CoreError::config(path, e.to_string()))?;

        let catalog = Self::from_entries(entries);
        info!("Loaded {} roles from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn contains(&self, role_name: &str) -> bool {
        self.entries.contains_key(role_name)
    }

    pub fn get(&self, role_name: &str) -> Option<&RoleCatalogEntry> {
        self.entries.get(role_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Knobs for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Timeout for the recommendation request.
    pub timeout: Duration,
    /// How git sources are cloned.
    pub clone: CloneOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            clone: CloneOptions::default(),
        }
    }
}

impl PipelineOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_clone(mut self, clone: CloneOptions) -> Self {
        self.clone = clone;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_load_credentials() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CREDENTIALS_FILE);
        fs::write(
            &path,
            r#"{"PROMPT_FLOW_API_URL": "https://example.com/score", "PROMPT_FLOW_API_KEY": "abc"}"#,
        )
        .unwrap();

        let credentials = load_credentials(&path).unwrap();
        assert_eq!(credentials.api_url, "https://example.com/score");
        assert_eq!(credentials.api_key, "abc");
    }

    #[test]
    fn test_missing_credentials_file() {
        let dir = tempdir().unwrap();
        let error = load_credentials(&dir.path().join("cred.json")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConfigMissing);
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_incomplete_credentials() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cred.json");

        fs::write(&path, r#"{"PROMPT_FLOW_API_URL": "https://example.com/score"}"#).unwrap();
        assert_eq!(load_credentials(&path).unwrap_err().kind(), ErrorKind::ConfigMissing);

        fs::write(
            &path,
            r#"{"PROMPT_FLOW_API_URL": "https://example.com/score", "PROMPT_FLOW_API_KEY": " "}"#,
        )
        .unwrap();
        assert_eq!(load_credentials(&path).unwrap_err().kind(), ErrorKind::ConfigMissing);
    }

    #[test]
    fn test_load_catalog_keeps_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CATALOG_FILE);
        fs::write(
            &path,
            r#"[
                {"roleName": "Reader", "description": "View all resources", "permissions": [{"actions": ["*/read"]}]},
                {"roleName": "Contributor"}
            ]"#,
        )
        .unwrap();

        let catalog = RoleCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Reader"));
        assert!(!catalog.contains("reader"));

        let reader = catalog.get("Reader").unwrap();
        assert_eq!(reader.description(), Some("View all resources"));
        assert!(reader.permissions().unwrap().is_array());
    }

    #[test]
    fn test_malformed_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CATALOG_FILE);

        fs::write(&path, r#"{"roleName": "Reader"}"#).unwrap();
        assert_eq!(RoleCatalog::load(&path).unwrap_err().kind(), ErrorKind::ConfigMissing);

        fs::write(&path, r#"[{"name": "Reader"}]"#).unwrap();
        assert_eq!(RoleCatalog::load(&path).unwrap_err().kind(), ErrorKind::ConfigMissing);
    }

    #[test]
    fn test_missing_catalog() {
        let dir = tempdir().unwrap();
        let error = RoleCatalog::load(&dir.path().join(DEFAULT_CATALOG_FILE)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConfigMissing);
    }
}
