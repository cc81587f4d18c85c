//! Page lookup and saving on top of bundled defaults and an override store.

use crate::bundled::BundledPages;
use crate::error::{PersistenceError, Result};
use crate::store::OverrideStore;
use chrono::Utc;
use hearth_document::PageDocument;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Resolves pages from the override store first, then the bundled defaults
pub struct PageService<S: OverrideStore> {
    bundled: BundledPages,
    store: S,
}

impl<S: OverrideStore> PageService<S> {
    pub fn new(bundled: BundledPages, store: S) -> Self {
        Self { bundled, store }
    }

    pub fn bundled(&self) -> &BundledPages {
        &self.bundled
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_writable(&self) -> bool {
        self.store.is_writable()
    }

    pub async fn get_page(&self, id: &str) -> Result<Option<PageDocument>> {
        if let Some(page) = self.store.load(id)? {
            debug!(id = %id, "Page served from override store");
            return Ok(Some(page));
        }
        Ok(self.bundled.get(id).cloned())
    }

    /// Slugs are matched against effective pages, so an override that renamed
    /// a bundled page hides the bundled slug.
    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Option<PageDocument>> {
        Ok(self
            .get_all_pages()
            .await?
            .into_iter()
            .find(|page| page.slug == slug))
    }

    /// Look up by id, falling back to slug
    pub async fn resolve(&self, key: &str) -> Result<Option<PageDocument>> {
        match self.get_page(key).await? {
            Some(page) => Ok(Some(page)),
            None => self.get_page_by_slug(key).await,
        }
    }

    /// Bundled and stored pages, stored wins on id collision, sorted by slug
    pub async fn get_all_pages(&self) -> Result<Vec<PageDocument>> {
        let mut by_id: BTreeMap<String, PageDocument> = self
            .bundled
            .all()
            .iter()
            .map(|page| (page.id.clone(), page.clone()))
            .collect();
        for page in self.store.load_all()? {
            by_id.insert(page.id.clone(), page);
        }

        let mut pages: Vec<PageDocument> = by_id.into_values().collect();
        pages.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.id.cmp(&b.id)));
        Ok(pages)
    }

    /// Write `page` to the override store and return what was stored
    pub async fn save_page(&self, page: &PageDocument, increment_version: bool) -> Result<PageDocument> {
        if !self.store.is_writable() {
            return Err(PersistenceError::NoClientContext);
        }

        if let Some(other) = self
            .get_all_pages()
            .await?
            .into_iter()
            .find(|other| other.slug == page.slug && other.id != page.id)
        {
            return Err(PersistenceError::SlugTaken {
                slug: page.slug.clone(),
                page_id: other.id,
            });
        }

        let mut saved = page.clone();
        saved.updated_at = Utc::now();
        if increment_version {
            saved.version += 1;
        }
        self.store.save(&saved)?;

        info!(id = %saved.id, slug = %saved.slug, version = saved.version, "Saved page");
        Ok(saved)
    }

    /// Remove the stored override. Bundled defaults with the same id reappear.
    pub async fn delete_page(&self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id)?;
        info!(id = %id, removed, "Deleted page override");
        Ok(removed)
    }
}
