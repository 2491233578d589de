//! The page registry: an immutable map from identifier to page definition.
//!
//! Pages are registered through [`PageRegistryBuilder`] during startup.
//! [`PageRegistryBuilder::build`] consumes the builder, so the resulting
//! [`PageRegistry`] exposes lookups only and is shared read-only between
//! request handlers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::page::PageDefinition;
use crate::services::identifier::is_valid_identifier;

/// Boot-time configuration errors. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Malformed page identifier: {0:?}")]
    MalformedId(String),

    #[error("Duplicate page identifier: {0}")]
    DuplicateId(String),

    #[error("Page {0} has an empty title")]
    EmptyTitle(String),

    #[error("Failed to read page manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse page manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Collects page definitions during startup.
#[derive(Debug, Default)]
pub struct PageRegistryBuilder {
    pages: HashMap<String, PageDefinition>,
}

impl PageRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. Fails on a malformed or already registered id, or an
    /// empty title.
    pub fn register(&mut self, page: PageDefinition) -> Result<&mut Self, RegistryError> {
        if !is_valid_identifier(&page.id) {
            return Err(RegistryError::MalformedId(page.id));
        }
        if page.title.trim().is_empty() {
            return Err(RegistryError::EmptyTitle(page.id));
        }
        if self.pages.contains_key(&page.id) {
            return Err(RegistryError::DuplicateId(page.id));
        }

        tracing::debug!(page_id = %page.id, path = %page.view_path(), "Registered page");
        self.pages.insert(page.id.clone(), page);
        Ok(self)
    }

    /// Register every page in order, stopping at the first failure.
    pub fn register_all(
        &mut self,
        pages: impl IntoIterator<Item = PageDefinition>,
    ) -> Result<&mut Self, RegistryError> {
        for page in pages {
            self.register(page)?;
        }
        Ok(self)
    }

    /// Register the pages listed in a JSON manifest file: an array of
    /// `{id, title, query, script}` objects.
    pub fn register_manifest(&mut self, path: &Path) -> Result<&mut Self, RegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let pages: Vec<PageDefinition> =
            serde_json::from_str(&raw).map_err(|source| RegistryError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), count = pages.len(), "Loading page manifest");
        self.register_all(pages)
    }

    pub fn build(self) -> PageRegistry {
        PageRegistry { pages: self.pages }
    }
}

/// Frozen page lookup table.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<String, PageDefinition>,
}

impl PageRegistry {
    pub fn builder() -> PageRegistryBuilder {
        PageRegistryBuilder::new()
    }

    /// Build a registry from a fixed set of pages.
    pub fn from_pages(
        pages: impl IntoIterator<Item = PageDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        builder.register_all(pages)?;
        Ok(builder.build())
    }

    /// Look up a page. Unknown ids yield `None`; the caller picks the
    /// response.
    pub fn lookup(&self, id: &str) -> Option<&PageDefinition> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn page(id: &str) -> PageDefinition {
        PageDefinition::new(id, format!("{id} title"), "SELECT 1", format!("// {id}"))
    }

    #[test]
    fn lookup_returns_registered_page() {
        let registry = PageRegistry::from_pages([page("raw_table"), page("ps_checker")]).unwrap();
        assert_eq!(registry.lookup("raw_table"), Some(&page("raw_table")));
        assert_eq!(registry.lookup("ps_checker"), Some(&page("ps_checker")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_is_idempotent() {
        let registry = PageRegistry::from_pages([page("raw_table")]).unwrap();
        let first = registry.lookup("raw_table").cloned();
        for _ in 0..3 {
            assert_eq!(registry.lookup("raw_table").cloned(), first);
        }
    }

    #[test]
    fn lookup_unknown_is_absent() {
        let registry = PageRegistry::from_pages([page("raw_table")]).unwrap();
        assert!(registry.lookup("nope").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("RAW_TABLE").is_none());
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = PageRegistry::from_pages([page("raw_table"), page("raw_table")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "raw_table"));
    }

    #[test]
    fn malformed_id_rejected() {
        for id in ["", "Raw", "raw-table", "raw1", "raw/table"] {
            let err = PageRegistry::from_pages([page(id)]).unwrap_err();
            assert!(matches!(err, RegistryError::MalformedId(_)), "accepted {id:?}");
        }
    }

    #[test]
    fn empty_title_rejected() {
        let untitled = PageDefinition::new("raw_table", "  ", "SELECT 1", "");
        let err = PageRegistry::from_pages([untitled]).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyTitle(_)));
    }

    #[test]
    fn failed_register_leaves_builder_unchanged() {
        let mut builder = PageRegistry::builder();
        builder.register(page("raw_table")).unwrap();
        let duplicate = PageDefinition::new("raw_table", "Other", "SELECT 2", "");
        assert!(builder.register(duplicate).is_err());

        let registry = builder.build();
        assert_eq!(registry.lookup("raw_table").unwrap().title, "raw_table title");
    }

    #[test]
    fn ids_are_sorted() {
        let registry =
            PageRegistry::from_pages([page("zeta"), page("alpha"), page("mid")]).unwrap();
        assert_eq!(registry.ids(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn manifest_pages_registered() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"disk","title":"Disk","query":"SELECT '[]'::json","script":"// disk"}}]"#
        )
        .unwrap();

        let mut builder = PageRegistry::builder();
        builder.register(page("raw_table")).unwrap();
        builder.register_manifest(file.path()).unwrap();
        let registry = builder.build();

        assert_eq!(registry.ids(), vec!["disk", "raw_table"]);
        assert_eq!(registry.lookup("disk").unwrap().script, "// disk");
    }

    #[test]
    fn manifest_duplicate_of_builtin_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"raw_table","title":"Again","query":"SELECT 1","script":""}}]"#
        )
        .unwrap();

        let mut builder = PageRegistry::builder();
        builder.register(page("raw_table")).unwrap();
        let err = builder.register_manifest(file.path()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(_)));
    }

    #[test]
    fn manifest_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = PageRegistry::builder()
            .register_manifest(file.path())
            .unwrap_err();
        assert!(matches!(err, RegistryError::ManifestParse { .. }));
    }

    #[test]
    fn manifest_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageRegistry::builder()
            .register_manifest(&dir.path().join("pages.json"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::ManifestRead { .. }));
    }
}
