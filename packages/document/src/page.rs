use crate::{tree, ComponentInstance, IdGenerator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page: metadata, settings and an ordered component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub id: String,

    /// URL-safe, expected to be unique among known pages
    pub slug: String,

    pub metadata: PageMetadata,

    /// Root components; `order` is authoritative, array position is not
    #[serde(default)]
    pub components: Vec<ComponentInstance>,

    #[serde(default)]
    pub settings: PageSettings,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Bumped on save
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_index: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(default)]
    pub layout: LayoutVariant,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,

    #[serde(default)]
    pub spacing: SpacingVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Full,
    #[default]
    Contained,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingVariant {
    None,
    Compact,
    #[default]
    Normal,
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub kind: BackgroundKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Image,
    Gradient,
}

impl LayoutVariant {
    /// Maximum content width for the variant
    pub fn max_width(&self) -> Option<&'static str> {
        match self {
            LayoutVariant::Full => None,
            LayoutVariant::Contained => Some("1200px"),
            LayoutVariant::Narrow => Some("760px"),
        }
    }
}

impl SpacingVariant {
    /// Vertical gap between root-level components
    pub fn gap(&self) -> &'static str {
        match self {
            SpacingVariant::None => "0",
            SpacingVariant::Compact => "1rem",
            SpacingVariant::Normal => "2rem",
            SpacingVariant::Relaxed => "4rem",
        }
    }
}

impl PageDocument {
    /// Find a component anywhere in the tree
    pub fn find(&self, id: &str) -> Option<&ComponentInstance> {
        tree::find(&self.components, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Root components sorted by `order`
    pub fn ordered_components(&self) -> Vec<&ComponentInstance> {
        let mut roots: Vec<&ComponentInstance> = self.components.iter().collect();
        roots.sort_by_key(|c| c.order);
        roots
    }

    /// Total number of instances in the tree
    pub fn component_count(&self) -> usize {
        tree::count(&self.components)
    }
}

/// Field-by-field overrides for [`create_page`]
#[derive(Debug, Clone, Default)]
pub struct PageDraft {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub metadata: Option<PageMetadata>,
    pub components: Option<Vec<ComponentInstance>>,
    pub settings: Option<PageSettings>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: Option<u64>,
}

impl PageDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            slug: Some(slugify(&title)),
            metadata: Some(PageMetadata {
                title,
                ..PageMetadata::default()
            }),
            ..Self::default()
        }
    }
}

/// Create a page with sensible defaults, overridable field by field
pub fn create_page(ids: &mut dyn IdGenerator, draft: PageDraft) -> PageDocument {
    let now = Utc::now();
    let id = draft.id.unwrap_or_else(|| ids.new_id());
    let metadata = draft.metadata.unwrap_or_else(|| PageMetadata {
        title: "Untitled page".to_string(),
        ..PageMetadata::default()
    });
    let slug = draft.slug.unwrap_or_else(|| {
        let base = slugify(&metadata.title);
        if base.is_empty() {
            id.clone()
        } else {
            base
        }
    });
    let created_at = draft.created_at.unwrap_or(now);

    PageDocument {
        id,
        slug,
        metadata,
        components: draft.components.unwrap_or_default(),
        settings: draft.settings.unwrap_or_default(),
        created_at,
        updated_at: draft.updated_at.unwrap_or(created_at),
        version: draft.version.unwrap_or(1),
    }
}

/// Lowercase, dash-separated, ASCII alphanumerics only
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
