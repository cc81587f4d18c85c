//! Default pages shipped with the application.

use crate::error::{PersistenceError, Result};
use hearth_document::PageDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, error};
use walkdir::WalkDir;

const BUILTIN_PAGES: &[(&str, &str)] = &[
    ("home.json", include_str!("../pages/home.json")),
    ("contact.json", include_str!("../pages/contact.json")),
];

/// Read-only set of default pages
#[derive(Debug, Clone, Default)]
pub struct BundledPages {
    pages: Vec<PageDocument>,
}

impl BundledPages {
    pub fn new(pages: Vec<PageDocument>) -> Self {
        Self { pages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Pages compiled into the binary
    pub fn builtin() -> Self {
        let mut pages = Vec::with_capacity(BUILTIN_PAGES.len());
        for (name, source) in BUILTIN_PAGES {
            match serde_json::from_str::<PageDocument>(source) {
                Ok(page) => pages.push(page),
                Err(e) => error!(file = %name, error = %e, "Built-in page failed to parse"),
            }
        }
        Self { pages }
    }

    /// Every `*.json` file under `dir`, recursively
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pages = Vec::new();

        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        {
            let path = entry.path();
            let content = fs::read_to_string(path)?;
            let page: PageDocument =
                serde_json::from_str(&content).map_err(|e| PersistenceError::InvalidPage {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            debug!(path = %path.display(), id = %page.id, "Loaded bundled page");
            pages.push(page);
        }

        Ok(Self { pages })
    }

    pub fn get(&self, id: &str) -> Option<&PageDocument> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&PageDocument> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn all(&self) -> &[PageDocument] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pages_parse() {
        let bundled = BundledPages::builtin();
        assert_eq!(bundled.len(), BUILTIN_PAGES.len());
        assert_eq!(bundled.by_slug("home").map(|p| p.id.as_str()), Some("page-home"));
        assert!(bundled.get("page-contact").is_some());
    }

    #[test]
    fn test_from_dir_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("home.json"), BUILTIN_PAGES[0].1).unwrap();
        fs::write(dir.path().join("nested/contact.json"), BUILTIN_PAGES[1].1).unwrap();
        fs::write(dir.path().join("README.md"), "# pages").unwrap();

        let bundled = BundledPages::from_dir(dir.path()).unwrap();
        assert_eq!(bundled.len(), 2);
    }

    #[test]
    fn test_from_dir_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "[]").unwrap();

        let err = BundledPages::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidPage { .. }));
    }
}
