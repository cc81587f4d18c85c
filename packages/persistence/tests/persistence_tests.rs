use hearth_components::bakery_registry;
use hearth_document::SequentialIds;
use hearth_editor::validate_page;
use hearth_persistence::{
    export_page_as_json, import_page_from_json, BundledPages, FileStore, PageService,
};

#[test]
fn test_builtin_pages_are_valid() {
    let registry = bakery_registry();
    for page in BundledPages::builtin().all() {
        let errors = validate_page(&registry, page);
        assert!(errors.is_empty(), "{}: {:?}", page.slug, errors);
    }
}

#[tokio::test]
async fn test_file_store_survives_new_service() {
    let dir = tempfile::tempdir().unwrap();

    let service = PageService::new(BundledPages::builtin(), FileStore::new(dir.path()));
    let mut contact = service.get_page_by_slug("contact").await.unwrap().unwrap();
    contact.metadata.description = "Call before noon".to_string();
    service.save_page(&contact, true).await.unwrap();

    let reopened = PageService::new(BundledPages::builtin(), FileStore::new(dir.path()));
    let loaded = reopened.get_page("page-contact").await.unwrap().unwrap();
    assert_eq!(loaded.metadata.description, "Call before noon");
    assert_eq!(loaded.version, 2);
}

#[tokio::test]
async fn test_export_import_save_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let service = PageService::new(BundledPages::builtin(), FileStore::new(dir.path()));
    let home = service.get_page("page-home").await.unwrap().unwrap();

    let json = export_page_as_json(&home).unwrap();
    let mut ids = SequentialIds::new("copy");
    let mut copy = import_page_from_json(&json, &mut ids).unwrap();
    assert_eq!(copy.components, home.components);
    assert_eq!(copy.metadata, home.metadata);
    assert_eq!(copy.settings, home.settings);
    copy.slug = "home-copy".to_string();

    let saved = service.save_page(&copy, false).await.unwrap();
    assert_eq!(saved.id, "copy-1");
    assert_eq!(saved.component_count(), home.component_count());

    let slugs: Vec<String> = service
        .get_all_pages()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(slugs, vec!["contact", "home", "home-copy"]);
}
