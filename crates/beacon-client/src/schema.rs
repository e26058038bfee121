//! Raw response shapes for the content API.
//!
//! Every field that can be absent upstream is an `Option` here; the
//! normalizers in [`crate::content`] are responsible for turning these
//! into fully-populated records. The `download` custom field is the one
//! genuinely unstable shape in the schema and gets an explicit sum type.

use serde::Deserialize;

/// Node/edge pagination envelope wrapping every list response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
    pub page_info: Option<PageInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// Raw news post node.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorField>,
    pub featured_image: Option<MediaField>,
    pub categories: Option<CategoryList>,
}

/// Raw publication or resource node, including the custom structured
/// fields (`textInputs`).
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LibraryNode {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub modified: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorField>,
    pub featured_image: Option<MediaField>,
    pub text_inputs: Option<TextInputs>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AuthorField {
    pub node: Option<AuthorNode>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AuthorNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MediaField {
    pub node: Option<MediaNode>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    pub source_url: Option<String>,
    pub alt_text: Option<String>,
    pub media_details: Option<MediaDetails>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MediaDetails {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CategoryList {
    #[serde(default)]
    pub nodes: Vec<CategoryNode>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CategoryNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Custom structured fields attached to publications and resources.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TextInputs {
    pub download: Option<DownloadField>,
    pub category: Option<String>,
    pub authors: Option<AuthorsField>,
}

/// The authors custom field appears as either a plain string or a list.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum AuthorsField {
    One(String),
    Many(Vec<String>),
}

impl AuthorsField {
    /// Comma-joined author line; empty when the field held nothing.
    pub fn join(&self) -> String {
        match self {
            AuthorsField::One(s) => s.clone(),
            AuthorsField::Many(list) => list.join(", "),
        }
    }
}

/// The downloadable-file reference, as observed in the wild.
///
/// The upstream schema is unstable: the same field has appeared as a
/// plain URL string, a wrapped media node, and a bare object carrying a
/// URL property. All variants resolve here, at the client boundary, so
/// shape probing never leaks into view logic.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum DownloadField {
    /// Direct URL string.
    Url(String),
    /// Wrapped media node (`{ node: { sourceUrl, mediaItemUrl, uri } }`).
    Media { node: DownloadNode },
    /// Bare object with a direct URL property.
    Object(DownloadObject),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DownloadNode {
    pub source_url: Option<String>,
    pub media_item_url: Option<String>,
    pub uri: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DownloadObject {
    pub source_url: Option<String>,
    pub url: Option<String>,
}

impl DownloadField {
    /// First successfully resolved URL representation, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            DownloadField::Url(s) => (!s.is_empty()).then_some(s.as_str()),
            DownloadField::Media { node } => node
                .source_url
                .as_deref()
                .or(node.media_item_url.as_deref())
                .or(node.uri.as_deref()),
            DownloadField::Object(o) => o.source_url.as_deref().or(o.url.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_download_field_plain_string() {
        let field: DownloadField =
            serde_json::from_value(json!("/wp-content/uploads/report.pdf")).unwrap();
        assert_eq!(field.url(), Some("/wp-content/uploads/report.pdf"));
    }

    #[test]
    fn test_download_field_media_node_prefers_source_url() {
        let field: DownloadField = serde_json::from_value(json!({
            "node": {
                "sourceUrl": "https://cms.example.org/a.pdf",
                "mediaItemUrl": "https://cms.example.org/b.pdf",
                "uri": "/a"
            }
        }))
        .unwrap();
        assert_eq!(field.url(), Some("https://cms.example.org/a.pdf"));
    }

    #[test]
    fn test_download_field_media_node_falls_back_to_uri() {
        let field: DownloadField = serde_json::from_value(json!({
            "node": { "uri": "/downloads/toolkit" }
        }))
        .unwrap();
        assert_eq!(field.url(), Some("/downloads/toolkit"));
    }

    #[test]
    fn test_download_field_bare_object_url() {
        let field: DownloadField =
            serde_json::from_value(json!({ "url": "https://cms.example.org/c.pdf" })).unwrap();
        assert_eq!(field.url(), Some("https://cms.example.org/c.pdf"));
    }

    #[test]
    fn test_download_field_null_node_resolves_to_none() {
        let field: DownloadField = serde_json::from_value(json!({ "node": null })).unwrap();
        assert_eq!(field.url(), None);
    }

    #[test]
    fn test_download_field_empty_string_resolves_to_none() {
        let field: DownloadField = serde_json::from_value(json!("")).unwrap();
        assert_eq!(field.url(), None);
    }

    #[test]
    fn test_authors_field_string_and_list() {
        let one: AuthorsField = serde_json::from_value(json!("A. Writer")).unwrap();
        assert_eq!(one.join(), "A. Writer");

        let many: AuthorsField =
            serde_json::from_value(json!(["A. Writer", "B. Editor"])).unwrap();
        assert_eq!(many.join(), "A. Writer, B. Editor");
    }

    #[test]
    fn test_connection_deserializes_edges_in_order() {
        let conn: Connection<PostNode> = serde_json::from_value(json!({
            "edges": [
                { "node": { "id": "one", "title": "First" }, "cursor": "a" },
                { "node": { "id": "two", "title": "Second" }, "cursor": "b" }
            ],
            "pageInfo": { "hasNextPage": true, "endCursor": "b" }
        }))
        .unwrap();
        assert_eq!(conn.edges.len(), 2);
        assert_eq!(conn.edges[0].node.id, "one");
        assert_eq!(conn.edges[1].node.id, "two");
        assert!(conn.page_info.unwrap().has_next_page);
    }

    #[test]
    fn test_connection_missing_edges_defaults_empty() {
        let conn: Connection<PostNode> = serde_json::from_value(json!({})).unwrap();
        assert!(conn.edges.is_empty());
    }

    #[test]
    fn test_connection_of_library_nodes() {
        let conn: Connection<LibraryNode> = serde_json::from_value(json!({
            "edges": [{ "node": { "id": "pub-1", "title": "Report" } }]
        }))
        .unwrap();
        assert_eq!(conn.edges[0].node.id, "pub-1");
        assert!(conn.page_info.is_none());
    }

    #[test]
    fn test_library_node_with_sparse_fields() {
        let node: LibraryNode = serde_json::from_value(json!({
            "id": "pub-1",
            "title": "Annual Report",
            "textInputs": { "category": "Report" }
        }))
        .unwrap();
        assert_eq!(node.id, "pub-1");
        let inputs = node.text_inputs.unwrap();
        assert_eq!(inputs.category.as_deref(), Some("Report"));
        assert!(inputs.download.is_none());
        assert!(inputs.authors.is_none());
    }
}
