pub mod components;
pub mod delete;
pub mod init;
pub mod list;
pub mod render;
pub mod transfer;
pub mod validate;

pub use components::{components, ComponentsArgs};
pub use delete::{delete, DeleteArgs};
pub use init::{init, InitArgs};
pub use list::{list, ListArgs};
pub use render::{render, RenderArgs};
pub use transfer::{export, import, ExportArgs, ImportArgs};
pub use validate::{validate, ValidateArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use hearth_document::PageDocument;
use hearth_persistence::{BundledPages, FileStore, PageService};
use tracing::debug;

/// Bundled pages from the configured directory (or built-ins) over the local store
pub(crate) fn page_service(config: &Config, cwd: &str) -> Result<PageService<FileStore>> {
    let bundled = match config.get_pages_dir(cwd) {
        Some(dir) if dir.exists() => BundledPages::from_dir(&dir)?,
        Some(dir) => return Err(anyhow!("Pages directory does not exist: {}", dir.display())),
        None => BundledPages::builtin(),
    };
    debug!(pages = bundled.len(), store = %config.store_dir, "opened page service");
    Ok(PageService::new(bundled, FileStore::new(config.get_store_dir(cwd))))
}

/// Page by id or slug
pub(crate) async fn find_page(service: &PageService<FileStore>, key: &str) -> Result<PageDocument> {
    service
        .resolve(key)
        .await?
        .ok_or_else(|| anyhow!("No page with id or slug '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_service_defaults_to_builtin_pages() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        let service = page_service(&Config::default(), cwd).unwrap();

        let page = find_page(&service, "home").await.unwrap();
        assert_eq!(page.id, "page-home");
        assert!(find_page(&service, "nowhere").await.is_err());
    }

    #[test]
    fn test_missing_pages_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            pages_dir: Some("missing".to_string()),
            ..Config::default()
        };
        assert!(page_service(&config, dir.path().to_str().unwrap()).is_err());
    }
}
