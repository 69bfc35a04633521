//! Integration tests for Bicep resource-type extraction.

use std::fs;
use std::path::Path;

use rolescope_iac::{ResourceTypeExtractor, WarningReason};
use tempfile::tempdir;

const MAIN_BICEP: &str = r#"targetScope = 'resourceGroup'

param location string = resourceGroup().location

resource storage 'Microsoft.Storage/storageAccounts@2023-01-01' = {
  name: 'stapp${uniqueString(resourceGroup().id)}'
  location: location
}

resource vault 'Microsoft.KeyVault/vaults@2022-07-01' existing = {
  name: 'kv-app'
}

module network 'modules/network.bicep' = {
  name: 'network'
}
"#;

const NETWORK_BICEP: &str = r#"resource vnet 'Microsoft.Network/virtualNetworks@2023-04-01' = {
  name: 'vnet'
  resource subnet 'subnets@2023-04-01' = {
    name: 'default'
  }
}

resource nsg 'Microsoft.Network/networkSecurityGroups@2023-04-01-preview' = {
  name: 'nsg'
}

resource bad Microsoft.Network/publicIPAddresses@2023-04-01 = {
  name: 'pip'
}
"#;

fn write_fixture(root: &Path) {
    fs::create_dir_all(root.join("modules")).unwrap();
    fs::write(root.join("main.bicep"), MAIN_BICEP).unwrap();
    fs::write(root.join("modules").join("network.bicep"), NETWORK_BICEP).unwrap();
    fs::write(root.join("README.md"), "resource x 'Not.Bicep/files@1' = {").unwrap();
}

#[test]
fn test_empty_directory_yields_empty_set() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.tf"), "resource \"aws_s3_bucket\" \"b\" {}").unwrap();

    let extractor = ResourceTypeExtractor::new().unwrap();
    let report = extractor.extract(dir.path()).unwrap();

    assert!(report.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.files_scanned, 0);
}

#[test]
fn test_extracts_types_across_nested_files() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let extractor = ResourceTypeExtractor::new().unwrap();
    let report = extractor.extract(dir.path()).unwrap();

    let types: Vec<&str> = report.resource_types.iter().map(String::as_str).collect();
    assert_eq!(
        types,
        vec![
            "Microsoft.KeyVault/vaults",
            "Microsoft.Network/networkSecurityGroups",
            "Microsoft.Network/virtualNetworks",
            "Microsoft.Storage/storageAccounts",
        ]
    );
    assert_eq!(report.files_scanned, 2);
}

#[test]
fn test_types_never_carry_version_suffix() {
    let dir = tempdir().unwrap();
    let versions = ["2023-01-01", "2024-02-02-preview", "v1", "1.0.0-beta+build"];
    let content: String = versions
        .iter()
        .enumerate()
        .map(|(i, v)| format!("resource r{} 'Contoso.Widgets/type{}@{}' = {{\n}}\n", i, i, v))
        .collect();
    fs::write(dir.path().join("versions.bicep"), content).unwrap();

    let extractor = ResourceTypeExtractor::new().unwrap();
    let report = extractor.extract(dir.path()).unwrap();

    assert_eq!(report.resource_types.len(), versions.len());
    assert!(report.resource_types.iter().all(|t| !t.contains('@')));
}

#[test]
fn test_malformed_declaration_is_a_warning() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let extractor = ResourceTypeExtractor::new().unwrap();
    let report = extractor.extract(dir.path()).unwrap();

    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert_eq!(warning.reason, WarningReason::Unquoted);
    assert_eq!(warning.line, 12);
    assert!(warning.file.ends_with("network.bicep"));
}

#[test]
fn test_extraction_is_idempotent() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let extractor = ResourceTypeExtractor::new().unwrap();
    let first = extractor.extract(dir.path()).unwrap();
    let second = extractor.extract(dir.path()).unwrap();

    assert_eq!(first, second);
}
