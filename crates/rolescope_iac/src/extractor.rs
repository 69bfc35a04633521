//! Directory scanning and resource-type aggregation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::declaration::{DeclarationMatcher, LineMatch, ParseWarning};
use crate::error::{IacError, IacResult};

/// Extension of Bicep declaration files.
pub const BICEP_EXTENSION: &str = "bicep";

/// Result of scanning a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Unique resource types, without version suffixes.
    pub resource_types: BTreeSet<String>,
    /// Declaration lines that were skipped.
    pub warnings: Vec<ParseWarning>,
    /// Number of declaration files read.
    pub files_scanned: usize,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
    }
}

/// Scans Bicep files for resource declarations.
#[derive(Debug, Clone)]
pub struct ResourceTypeExtractor {
    matcher: DeclarationMatcher,
}

impl ResourceTypeExtractor {
    pub fn new() -> IacResult<Self> {
        Ok(Self {
            matcher: DeclarationMatcher::new()?,
        })
    }

    /// Scan every declaration file under `root`.
    pub fn extract(&self, root: &Path) -> IacResult<ExtractionReport> {
        if !root.is_dir() {
            return Err(IacError::RootNotFound(root.to_path_buf()));
        }

        info!("Scanning {} for Bicep declarations", root.display());

        let mut report = ExtractionReport::default();
        for file in self.discover(root) {
            let content = fs::read_to_string(&file).map_err(|source| IacError::Read {
                path: file.clone(),
                source,
            })?;
            let relative = file.strip_prefix(root).unwrap_or(&file);
            self.scan_source(relative, &content, &mut report);
            report.files_scanned += 1;
        }

        info!(
            "Found {} resource types in {} files ({} warnings)",
            report.resource_types.len(),
            report.files_scanned,
            report.warnings.len()
        );

        Ok(report)
    }

    /// List declaration files under `root` in sorted order, skipping hidden
    /// directories such as `.git`.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|e| e.path().is_file() && has_bicep_extension(e.path()))
            .map(|e| e.into_path())
            .collect()
    }

    /// Scan the contents of one file, reporting warnings against `file`.
    pub fn scan_source(&self, file: &Path, content: &str, report: &mut ExtractionReport) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for (index, line) in content.lines().enumerate() {
            match self.matcher.match_line(line) {
                LineMatch::NotDeclaration => {}
                LineMatch::ResourceType(resource_type) => {
                    debug!("{}:{}: {}", file.display(), index + 1, resource_type);
                    report.resource_types.insert(resource_type);
                }
                LineMatch::Malformed(reason) => {
                    let warning = ParseWarning {
                        file: file.to_path_buf(),
                        line: index + 1,
                        text: line.trim().to_string(),
                        reason,
                    };
                    debug!("Skipping declaration: {}", warning);
                    report.warnings.push(warning);
                }
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_bicep_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(BICEP_EXTENSION)
}
