//! Page import and export.

use crate::error::{ImportIssue, PersistenceError, Result};
use chrono::Utc;
use hearth_document::{
    create_page, ComponentInstance, IdGenerator, PageDocument, PageDraft, PageMetadata,
    PageSettings,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Pretty-printed JSON for a page
pub fn export_page_as_json(page: &PageDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(page)?)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedPage {
    slug: String,
    metadata: PageMetadata,
    #[serde(default)]
    components: Vec<ComponentInstance>,
    #[serde(default)]
    settings: PageSettings,
}

/// Parse an exported page as a brand new document.
///
/// The imported page gets a fresh id, current timestamps and version 1.
/// Component ids are kept. Structural problems are collected into
/// [`PersistenceError::Import`] rather than stopping at the first one.
pub fn import_page_from_json(json: &str, ids: &mut dyn IdGenerator) -> Result<PageDocument> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        PersistenceError::Import(vec![ImportIssue::new("$", e.to_string())])
    })?;

    let issues = check_page(&value);
    if !issues.is_empty() {
        warn!(count = issues.len(), "Rejected page import");
        return Err(PersistenceError::Import(issues));
    }

    let imported: ImportedPage = serde_json::from_value(value)
        .map_err(|e| PersistenceError::Import(vec![ImportIssue::new("$", e.to_string())]))?;

    let now = Utc::now();
    let page = create_page(
        ids,
        PageDraft {
            slug: Some(imported.slug),
            metadata: Some(imported.metadata),
            components: Some(imported.components),
            settings: Some(imported.settings),
            created_at: Some(now),
            updated_at: Some(now),
            version: Some(1),
            ..PageDraft::default()
        },
    );
    debug!(id = %page.id, slug = %page.slug, "Imported page");
    Ok(page)
}

fn check_page(value: &Value) -> Vec<ImportIssue> {
    let mut issues = Vec::new();
    let Some(page) = value.as_object() else {
        issues.push(ImportIssue::new("$", "expected an object"));
        return issues;
    };

    match page.get("slug") {
        Some(Value::String(slug)) if !slug.trim().is_empty() => {}
        Some(Value::String(_)) => issues.push(ImportIssue::new("$.slug", "must not be empty")),
        Some(_) => issues.push(ImportIssue::new("$.slug", "expected a string")),
        None => issues.push(ImportIssue::new("$.slug", "missing field")),
    }

    match page.get("metadata") {
        Some(Value::Object(metadata)) => match metadata.get("title") {
            Some(Value::String(_)) => {}
            Some(_) => issues.push(ImportIssue::new("$.metadata.title", "expected a string")),
            None => issues.push(ImportIssue::new("$.metadata.title", "missing field")),
        },
        Some(_) => issues.push(ImportIssue::new("$.metadata", "expected an object")),
        None => issues.push(ImportIssue::new("$.metadata", "missing field")),
    }

    if let Some(settings) = page.get("settings") {
        if let Err(e) = serde_json::from_value::<PageSettings>(settings.clone()) {
            issues.push(ImportIssue::new("$.settings", e.to_string()));
        }
    }

    match page.get("components") {
        None => {}
        Some(Value::Array(components)) => check_components(components, "$.components", &mut issues),
        Some(_) => issues.push(ImportIssue::new("$.components", "expected an array")),
    }

    issues
}

fn check_components(components: &[Value], path: &str, issues: &mut Vec<ImportIssue>) {
    for (index, component) in components.iter().enumerate() {
        let path = format!("{}[{}]", path, index);
        let Some(fields) = component.as_object() else {
            issues.push(ImportIssue::new(path, "expected an object"));
            continue;
        };

        for key in ["id", "componentType"] {
            match fields.get(key) {
                Some(Value::String(s)) if !s.is_empty() => {}
                Some(_) => issues.push(ImportIssue::new(
                    format!("{}.{}", path, key),
                    "expected a non-empty string",
                )),
                None => issues.push(ImportIssue::new(format!("{}.{}", path, key), "missing field")),
            }
        }

        if let Some(props) = fields.get("props") {
            if !props.is_object() {
                issues.push(ImportIssue::new(format!("{}.props", path), "expected an object"));
            }
        }

        if let Some(order) = fields.get("order") {
            if !order.is_i64() {
                issues.push(ImportIssue::new(format!("{}.order", path), "expected an integer"));
            }
        }

        match fields.get("children") {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => {
                check_components(children, &format!("{}.children", path), issues)
            }
            Some(_) => issues.push(ImportIssue::new(
                format!("{}.children", path),
                "expected an array",
            )),
        }
    }
}
