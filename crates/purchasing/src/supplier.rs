//! Supplier map: display name -> short supplier code.

use std::collections::BTreeMap;

use serde::Serialize;

use poforge_core::{DomainError, DomainResult};

/// Remove every whitespace character (`" Shop A "` becomes `"ShopA"`).
///
/// Applied to supplier and location input before it reaches a SKU.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Supplier map keyed by display name.
///
/// Keys are unique; codes are not (two suppliers may share a code).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SupplierDirectory {
    entries: BTreeMap<String, String>,
}

impl SupplierDirectory {
    /// Empty map (no seeded suppliers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Map seeded with the stock suppliers.
    pub fn with_defaults() -> Self {
        let mut directory = Self::empty();
        for (name, code) in Self::default_entries() {
            directory
                .entries
                .insert((*name).to_string(), (*code).to_string());
        }
        directory
    }

    pub fn default_entries() -> &'static [(&'static str, &'static str)] {
        &[
            ("Amazon", "AM"),
            ("B&Q", "BQ"),
            ("Screwfix", "SF"),
            ("Toolstation", "TS"),
        ]
    }

    /// Validate and normalise a `(name, code)` pair without inserting it.
    ///
    /// The name is trimmed; the code is stripped of whitespace and uppercased.
    pub fn normalize_entry(name: &str, code: &str) -> DomainResult<(String, String)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        let code = strip_whitespace(code).to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("supplier code is required"));
        }
        Ok((name.to_string(), code))
    }

    /// Insert or overwrite a supplier. Returns the previous code, if any.
    pub fn insert(&mut self, name: &str, code: &str) -> DomainResult<Option<String>> {
        let (name, code) = Self::normalize_entry(name, code)?;
        Ok(self.entries.insert(name, code))
    }

    /// Look up a code by display name.
    ///
    /// Exact (trimmed) match first, then a case-insensitive match.
    pub fn lookup(&self, name: &str) -> Option<(&str, &str)> {
        let name = name.trim();
        if let Some((k, v)) = self.entries.get_key_value(name) {
            return Some((k.as_str(), v.as_str()));
        }
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|(_, code)| code)
    }

    /// Entries ordered by display name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for SupplierDirectory {
    /// Collect pairs through `insert`; pairs it rejects are dropped.
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut directory = Self::empty();
        for (name, code) in iter {
            let (name, code) = (name.into(), code.into());
            let _ = directory.insert(&name, &code);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_whitespace_removes_inner_spaces() {
        assert_eq!(strip_whitespace("  Shop A "), "ShopA");
        assert_eq!(strip_whitespace("Ware\thouse 2"), "Warehouse2");
        assert_eq!(strip_whitespace(""), "");
    }

    #[test]
    fn defaults_are_seeded_and_sorted() {
        let directory = SupplierDirectory::with_defaults();
        let names: Vec<&str> = directory.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Amazon", "B&Q", "Screwfix", "Toolstation"]);
        assert_eq!(directory.code_for("Screwfix"), Some("SF"));
    }

    #[test]
    fn insert_uppercases_code_and_overwrites() {
        let mut directory = SupplierDirectory::empty();
        assert_eq!(directory.insert("Local Shop", " ls ").unwrap(), None);
        assert_eq!(directory.code_for("Local Shop"), Some("LS"));

        let previous = directory.insert("Local Shop", "lx").unwrap();
        assert_eq!(previous.as_deref(), Some("LS"));
        assert_eq!(directory.code_for("Local Shop"), Some("LX"));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn codes_need_not_be_unique() {
        let mut directory = SupplierDirectory::empty();
        directory.insert("Alpha", "AB").unwrap();
        directory.insert("Beta", "AB").unwrap();
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn insert_rejects_empty_name_or_code() {
        let mut directory = SupplierDirectory::with_defaults();
        let before = directory.clone();

        assert!(matches!(directory.insert("", "XY"), Err(DomainError::Validation(_))));
        assert!(matches!(directory.insert("   ", "XY"), Err(DomainError::Validation(_))));
        assert!(matches!(directory.insert("Acme", " "), Err(DomainError::Validation(_))));
        assert_eq!(directory, before);
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let directory = SupplierDirectory::with_defaults();
        assert_eq!(directory.lookup(" amazon "), Some(("Amazon", "AM")));
        assert_eq!(directory.lookup("Nobody"), None);
    }

    #[test]
    fn from_iter_drops_invalid_pairs() {
        let directory: SupplierDirectory =
            [("Acme", "ac"), ("", "ZZ")].into_iter().collect();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.code_for("Acme"), Some("AC"));
    }
}
