use serde::Serialize;

/// The editorial content types served by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    News,
    Publication,
    Resource,
}

impl ContentKind {
    /// The root field name the API uses for this type's list connection.
    pub fn list_field(&self) -> &'static str {
        match self {
            ContentKind::News => "posts",
            ContentKind::Publication => "publications",
            ContentKind::Resource => "resources",
        }
    }

    /// The root field name for a single-item lookup by slug.
    pub fn item_field(&self) -> &'static str {
        match self {
            ContentKind::News => "post",
            ContentKind::Publication => "publication",
            ContentKind::Resource => "resource",
        }
    }

    /// Label applied when an item carries no category of its own.
    pub fn default_label(&self) -> &'static str {
        match self {
            ContentKind::News => "News",
            ContentKind::Publication | ContentKind::Resource => "Book",
        }
    }
}

/// Flat, presentation-ready representation of one content item.
///
/// Every field holds a deterministic value: missing upstream data has
/// already been replaced by a fallback or an explicit empty value by the
/// time a record reaches the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Display image URL. Never empty: the fallback asset is substituted
    /// when the item has no featured image.
    pub image: String,
    /// Category or publication-type label.
    pub label: String,
    /// Publish date formatted as `YYYY-MM-DD`, or empty when unknown.
    pub date: String,
    /// Estimated reading duration, e.g. "3 min read".
    pub reading_time: String,
    /// Plain-text excerpt with HTML stripped and entities decoded.
    pub excerpt: String,
    /// Absolute download URL, when the item carries a downloadable file.
    pub download_url: Option<String>,
    /// Comma-joined author line, when the item names authors.
    pub authors: Option<String>,
}

/// Featured image metadata for a detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailImage {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

/// Presentation-ready representation of a single item's detail page.
///
/// Unlike [`ContentRecord`], the body is carried as HTML for direct
/// rendering, and the date uses the long human form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Category or type label, when the item has one.
    pub label: Option<String>,
    /// Author display name, when known.
    pub author: Option<String>,
    /// Long-form display date, e.g. "May 3, 2024". Empty when unknown.
    pub date: String,
    /// Last-modified date as `YYYY-MM-DD`. Empty when unknown.
    pub modified: String,
    pub reading_time: String,
    /// Lead paragraph HTML: the stored excerpt, or a body-derived one when
    /// the stored excerpt carries a truncation marker.
    pub excerpt_html: String,
    /// Full body HTML as returned by the content API.
    pub body_html: String,
    pub image: Option<DetailImage>,
    /// Absolute download URL, when the item carries a downloadable file.
    pub download_url: Option<String>,
}

/// Structured description of a fetch or normalization failure.
///
/// Diagnostics are developer-facing only: they are logged and optionally
/// rendered in the empty-state debug panel, never in the primary layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human-readable failure summary.
    pub message: String,
    /// Messages from the API's GraphQL error list, when present.
    pub graphql_errors: Vec<String>,
    /// Top-level fields actually present in the response, reported when an
    /// expected field was absent.
    pub available_fields: Option<Vec<String>>,
    /// Name of the field that was expected but missing.
    pub missing_field: Option<String>,
}

impl Diagnostic {
    /// Diagnostic for a transport or API failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Diagnostic for a response that carried GraphQL errors.
    pub fn graphql(errors: Vec<String>) -> Self {
        Self {
            message: "Content API returned errors".to_string(),
            graphql_errors: errors,
            ..Self::default()
        }
    }

    /// Diagnostic for a response missing an expected top-level field.
    pub fn missing_field(field: &str, available: Vec<String>) -> Self {
        Self {
            message: format!(
                "The '{}' field doesn't exist in the API response. The content type might be named differently.",
                field
            ),
            missing_field: Some(field.to_string()),
            available_fields: Some(available),
            ..Self::default()
        }
    }
}

/// Outcome of one list fetch: normalized records plus an optional
/// diagnostic.
///
/// A failed fetch is an empty record list with a diagnostic, never an
/// error that reaches the rendering layer. A partially-failed fetch can
/// carry both records and a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentBatch {
    pub records: Vec<ContentRecord>,
    pub diagnostic: Option<Diagnostic>,
}

impl ContentBatch {
    /// Batch of successfully normalized records.
    pub fn ok(records: Vec<ContentRecord>) -> Self {
        Self {
            records,
            diagnostic: None,
        }
    }

    /// Empty batch recording why the fetch produced nothing.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            records: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }

    /// True when the empty-state branch should render.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
