//! Role validation against the catalog.

use serde::Serialize;

use crate::config::RoleCatalog;

/// Recommended roles split by catalog membership. Both sides keep the
/// order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RolePartition {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl RolePartition {
    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }

    pub fn len(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `recommended` into roles present in and absent from `catalog`.
pub fn validate_roles(recommended: &[String], catalog: &RoleCatalog) -> RolePartition {
    let (valid, invalid): (Vec<String>, Vec<String>) = recommended
        .iter()
        .cloned()
        .partition(|role| catalog.contains(role));

    RolePartition { valid, invalid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleCatalogEntry;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn catalog(names: &[&str]) -> RoleCatalog {
        RoleCatalog::from_entries(names.iter().map(|n| RoleCatalogEntry::new(*n)))
    }

    #[test]
    fn test_reader_and_fake_role() {
        let partition = validate_roles(&roles(&["Reader", "FakeRole"]), &catalog(&["Reader"]));

        assert_eq!(partition.valid, roles(&["Reader"]));
        assert_eq!(partition.invalid, roles(&["FakeRole"]));
        assert!(partition.has_invalid());
    }

    #[test]
    fn test_preserves_input_order() {
        let partition = validate_roles(
            &roles(&["Owner", "Zed", "Contributor", "Alpha", "Reader"]),
            &catalog(&["Reader", "Owner", "Contributor"]),
        );

        assert_eq!(partition.valid, roles(&["Owner", "Contributor", "Reader"]));
        assert_eq!(partition.invalid, roles(&["Zed", "Alpha"]));
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let cases: Vec<(Vec<String>, RoleCatalog)> = vec![
            (roles(&[]), catalog(&["Reader"])),
            (roles(&["Reader"]), catalog(&[])),
            (roles(&["Reader", "Reader", "Ghost"]), catalog(&["Reader"])),
            (roles(&["a", "b", "c", "d"]), catalog(&["b", "d", "e"])),
            (roles(&["Owner", "owner"]), catalog(&["Owner"])),
        ];

        for (input, catalog) in cases {
            let partition = validate_roles(&input, &catalog);

            assert_eq!(partition.len(), input.len());
            assert!(partition.valid.iter().all(|r| catalog.contains(r)));
            assert!(partition.invalid.iter().all(|r| !catalog.contains(r)));
            assert!(partition.valid.iter().all(|r| !partition.invalid.contains(r)));
            for role in &input {
                assert!(partition.valid.contains(role) || partition.invalid.contains(role));
            }
        }
    }

    #[test]
    fn test_does_not_touch_inputs() {
        let input = roles(&["Reader", "FakeRole"]);
        let known = catalog(&["Reader"]);
        let _ = validate_roles(&input, &known);

        assert_eq!(input, roles(&["Reader", "FakeRole"]));
        assert_eq!(known.len(), 1);
    }
}
