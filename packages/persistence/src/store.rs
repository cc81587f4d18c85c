//! Local override stores.
//!
//! Saved pages never touch the bundled defaults. They land in an override
//! store keyed by page id, and reads consult the store first.

use crate::error::{PersistenceError, Result};
use hearth_document::PageDocument;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Storage for locally saved pages
pub trait OverrideStore: Send + Sync {
    /// Every stored page, in no particular order
    fn load_all(&self) -> Result<Vec<PageDocument>>;

    fn load(&self, id: &str) -> Result<Option<PageDocument>>;

    fn save(&self, page: &PageDocument) -> Result<()>;

    /// Returns whether an entry existed
    fn delete(&self, id: &str) -> Result<bool>;

    fn is_writable(&self) -> bool {
        true
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<BTreeMap<String, PageDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: impl IntoIterator<Item = PageDocument>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.pages.write() {
            for page in pages {
                map.insert(page.id.clone(), page);
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.pages.read().map(|pages| pages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OverrideStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<PageDocument>> {
        let pages = self.pages.read().map_err(|_| poisoned())?;
        Ok(pages.values().cloned().collect())
    }

    fn load(&self, id: &str) -> Result<Option<PageDocument>> {
        let pages = self.pages.read().map_err(|_| poisoned())?;
        Ok(pages.get(id).cloned())
    }

    fn save(&self, page: &PageDocument) -> Result<()> {
        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        pages.insert(page.id.clone(), page.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut pages = self.pages.write().map_err(|_| poisoned())?;
        Ok(pages.remove(id).is_some())
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "override store lock poisoned",
    ))
}

/// One `<id>.json` file per page in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if !is_file_id(id) {
            return Err(PersistenceError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

fn is_file_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl OverrideStore for FileStore {
    fn load_all(&self) -> Result<Vec<PageDocument>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<PageDocument>(&content) {
                Ok(page) => pages.push(page),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable override"),
            }
        }
        Ok(pages)
    }

    /// Ids that cannot name a file have no override. Unreadable overrides are
    /// skipped the same way `load_all` skips them.
    fn load(&self, id: &str) -> Result<Option<PageDocument>> {
        if !is_file_id(id) {
            return Ok(None);
        }
        let path = self.root.join(format!("{}.json", id));
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(page) => Ok(Some(page)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable override");
                Ok(None)
            }
        }
    }

    fn save(&self, page: &PageDocument) -> Result<()> {
        let path = self.path_for(&page.id)?;
        fs::create_dir_all(&self.root)?;

        // Write then rename so a crash never leaves a truncated page
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(page)?)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), "Wrote override");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

/// Store used when there is no client context: reads are empty, writes fail
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl OverrideStore for NullStore {
    fn load_all(&self) -> Result<Vec<PageDocument>> {
        Ok(Vec::new())
    }

    fn load(&self, _id: &str) -> Result<Option<PageDocument>> {
        Ok(None)
    }

    fn save(&self, _page: &PageDocument) -> Result<()> {
        Err(PersistenceError::NoClientContext)
    }

    fn delete(&self, _id: &str) -> Result<bool> {
        Err(PersistenceError::NoClientContext)
    }

    fn is_writable(&self) -> bool {
        false
    }
}

impl<S: OverrideStore + ?Sized> OverrideStore for Box<S> {
    fn load_all(&self) -> Result<Vec<PageDocument>> {
        (**self).load_all()
    }

    fn load(&self, id: &str) -> Result<Option<PageDocument>> {
        (**self).load(id)
    }

    fn save(&self, page: &PageDocument) -> Result<()> {
        (**self).save(page)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        (**self).delete(id)
    }

    fn is_writable(&self) -> bool {
        (**self).is_writable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_document::{create_page, PageDraft, SequentialIds};

    fn page(title: &str) -> PageDocument {
        let mut ids = SequentialIds::new("page");
        create_page(&mut ids, PageDraft::titled(title))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let page = page("Menu");
        store.save(&page).unwrap();

        assert_eq!(store.load(&page.id).unwrap(), Some(page.clone()));
        assert_eq!(store.len(), 1);
        assert!(store.delete(&page.id).unwrap());
        assert!(!store.delete(&page.id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_writes_one_file_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("overrides"));
        let page = page("Menu");

        assert!(store.load_all().unwrap().is_empty());
        store.save(&page).unwrap();

        let file = dir.path().join("overrides").join(format!("{}.json", page.id));
        assert!(file.exists());
        assert_eq!(store.load(&page.id).unwrap(), Some(page.clone()));
        assert_eq!(store.load_all().unwrap().len(), 1);

        assert!(store.delete(&page.id).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn test_file_store_skips_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let store = FileStore::new(dir.path());
        store.save(&page("Menu")).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
        assert_eq!(store.load("broken").unwrap(), None);
    }

    #[test]
    fn test_file_store_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("../secrets").unwrap(), None);
        assert_eq!(store.load("about us").unwrap(), None);

        let mut bad = page("Menu");
        bad.id = "../secrets".to_string();
        assert!(matches!(store.save(&bad), Err(PersistenceError::InvalidId(_))));
        assert!(matches!(
            store.delete("../secrets"),
            Err(PersistenceError::InvalidId(_))
        ));
    }

    #[test]
    fn test_null_store() {
        let store = NullStore;
        assert!(!store.is_writable());
        assert!(store.load_all().unwrap().is_empty());
        assert!(matches!(
            store.save(&page("Menu")),
            Err(PersistenceError::NoClientContext)
        ));
    }
}
