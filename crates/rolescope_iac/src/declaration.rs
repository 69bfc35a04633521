//! Line-level recognition of Bicep `resource` declarations.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use serde::Serialize;

use crate::error::IacResult;

/// Keyword, symbolic name, type token, then an opening brace somewhere on the
/// same line. Only top-level (unindented) declarations qualify.
const DECLARATION_PATTERN: &str = r"^resource\s+\w+\s+(\S+).*\{";

/// Outcome of testing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// The line is not a resource declaration.
    NotDeclaration,
    /// A declaration with its type, version suffix already removed.
    ResourceType(String),
    /// Looks like a declaration but the type string is unusable.
    Malformed(WarningReason),
}

/// Why a declaration-looking line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningReason {
    Unquoted,
    UnterminatedQuote,
    MissingVersion,
    EmptyType,
}

impl WarningReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningReason::Unquoted => "type string is not quoted",
            WarningReason::UnterminatedQuote => "type string has no closing quote",
            WarningReason::MissingVersion => "type string has no @version suffix",
            WarningReason::EmptyType => "type string has an empty type name",
        }
    }
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A skipped declaration line, kept so it can be surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// File the line came from.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The offending line, trimmed.
    pub text: String,
    pub reason: WarningReason,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} (`{}`)",
            self.file.display(),
            self.line,
            self.reason,
            self.text
        )
    }
}

/// Compiled declaration pattern.
#[derive(Debug, Clone)]
pub struct DeclarationMatcher {
    pattern: Regex,
}

impl DeclarationMatcher {
    pub fn new() -> IacResult<Self> {
        Ok(Self {
            pattern: Regex::new(DECLARATION_PATTERN)?,
        })
    }

    /// Test a line and pull the resource type out of it.
    pub fn match_line(&self, line: &str) -> LineMatch {
        let Some(captures) = self.pattern.captures(line) else {
            return LineMatch::NotDeclaration;
        };

        let token = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        match parse_type_token(token) {
            Ok(resource_type) => LineMatch::ResourceType(resource_type),
            Err(reason) => LineMatch::Malformed(reason),
        }
    }
}

/// `'Microsoft.Storage/storageAccounts@2023-01-01'` -> `Microsoft.Storage/storageAccounts`
fn parse_type_token(token: &str) -> Result<String, WarningReason> {
    let quoted = token.strip_prefix('\'').ok_or(WarningReason::Unquoted)?;
    let end = quoted.find('\'').ok_or(WarningReason::UnterminatedQuote)?;
    let (resource_type, _version) = quoted[..end]
        .split_once('@')
        .ok_or(WarningReason::MissingVersion)?;

    if resource_type.is_empty() {
        return Err(WarningReason::EmptyType);
    }

    Ok(resource_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> DeclarationMatcher {
        DeclarationMatcher::new().unwrap()
    }

    #[test]
    fn test_matches_standard_declaration() {
        let result = matcher().match_line(
            "resource stg 'Microsoft.Storage/storageAccounts@2023-01-01' = {",
        );
        assert_eq!(
            result,
            LineMatch::ResourceType("Microsoft.Storage/storageAccounts".to_string())
        );
    }

    #[test]
    fn test_matches_existing_declaration() {
        let result = matcher().match_line(
            "resource kv 'Microsoft.KeyVault/vaults@2022-07-01' existing = {",
        );
        assert_eq!(
            result,
            LineMatch::ResourceType("Microsoft.KeyVault/vaults".to_string())
        );
    }

    #[test]
    fn test_strips_preview_versions() {
        let result = matcher().match_line(
            "resource app 'Microsoft.App/containerApps@2024-02-02-preview' = {",
        );
        assert_eq!(
            result,
            LineMatch::ResourceType("Microsoft.App/containerApps".to_string())
        );
    }

    #[test]
    fn test_ignores_other_statements() {
        let m = matcher();
        assert_eq!(m.match_line("param location string"), LineMatch::NotDeclaration);
        assert_eq!(m.match_line("// resource foo 'x@1' = {"), LineMatch::NotDeclaration);
        assert_eq!(
            m.match_line("  resource child 'subnets@2023-01-01' = {"),
            LineMatch::NotDeclaration
        );
        assert_eq!(
            m.match_line("resource stg 'Microsoft.Storage/storageAccounts@2023-01-01' ="),
            LineMatch::NotDeclaration
        );
    }

    #[test]
    fn test_malformed_type_strings() {
        let m = matcher();
        assert_eq!(
            m.match_line("resource stg Microsoft.Storage/storageAccounts@2023-01-01 = {"),
            LineMatch::Malformed(WarningReason::Unquoted)
        );
        assert_eq!(
            m.match_line("resource stg 'Microsoft.Storage/storageAccounts@2023-01-01 = {"),
            LineMatch::Malformed(WarningReason::UnterminatedQuote)
        );
        assert_eq!(
            m.match_line("resource stg 'Microsoft.Storage/storageAccounts' = {"),
            LineMatch::Malformed(WarningReason::MissingVersion)
        );
        assert_eq!(
            m.match_line("resource stg '@2023-01-01' = {"),
            LineMatch::Malformed(WarningReason::EmptyType)
        );
    }
}
