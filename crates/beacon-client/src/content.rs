//! Response normalizers: one per content type.
//!
//! Each fetch function calls the client, reshapes the raw node/edge
//! payload into flat [`ContentRecord`]s, and degrades gracefully: a total
//! query failure becomes an empty batch with a diagnostic, and malformed
//! fields inside an item fall back per-field instead of discarding the
//! batch. Nothing here returns an error to the rendering layer.

use beacon_core::dates::{format_date, format_date_long};
use beacon_core::text::{full_excerpt, plain_excerpt};
use beacon_core::urls::make_absolute;
use beacon_core::{
    calculate_reading_time, ContentBatch, ContentDetail, ContentKind, ContentRecord, DetailImage,
    Diagnostic, FALLBACK_IMAGE,
};
use serde_json::{json, Value};
use tracing::{error, warn};
use url::Url;

use crate::client::{ContentClient, FetchPolicy, QueryReply};
use crate::graphql;
use crate::schema::{Connection, LibraryNode, MediaField, PostNode};

/// Homepage news strip length.
pub const HOME_NEWS_LIMIT: usize = 7;
/// Homepage publications carousel length.
pub const HOME_PUBLICATIONS_LIMIT: usize = 8;
/// First-batch size for the dedicated list pages.
pub const LIST_PAGE_LIMIT: usize = 100;

/// Default image dimensions when the API reports none.
const DEFAULT_IMAGE_WIDTH: u32 = 1200;
const DEFAULT_IMAGE_HEIGHT: u32 = 800;

/// Fetches and normalizes news posts.
pub async fn fetch_news(client: &ContentClient, first: usize, policy: FetchPolicy) -> ContentBatch {
    let query = graphql::posts_query();
    let reply = match client.query(&query, json!({ "first": first }), policy).await {
        Ok(reply) => reply,
        Err(e) => return transport_failure(ContentKind::News, e),
    };
    news_batch(reply, client.endpoint())
}

/// Fetches and normalizes publications.
pub async fn fetch_publications(
    client: &ContentClient,
    first: usize,
    policy: FetchPolicy,
) -> ContentBatch {
    let query = graphql::publications_query();
    let reply = match client.query(&query, json!({ "first": first }), policy).await {
        Ok(reply) => reply,
        Err(e) => return transport_failure(ContentKind::Publication, e),
    };
    library_batch(reply, ContentKind::Publication, client.endpoint())
}

/// Fetches and normalizes resources.
pub async fn fetch_resources(
    client: &ContentClient,
    first: usize,
    policy: FetchPolicy,
) -> ContentBatch {
    let query = graphql::resources_query();
    let reply = match client.query(&query, json!({ "first": first }), policy).await {
        Ok(reply) => reply,
        Err(e) => return transport_failure(ContentKind::Resource, e),
    };
    library_batch(reply, ContentKind::Resource, client.endpoint())
}

/// Fetches one news post by slug. `None` is a not-found outcome; fetch
/// errors also resolve to `None` after being logged.
pub async fn fetch_news_detail(client: &ContentClient, slug: &str) -> Option<ContentDetail> {
    let query = graphql::post_by_slug_query();
    let value = fetch_item(client, &query, slug, ContentKind::News).await?;
    match serde_json::from_value::<PostNode>(value) {
        Ok(node) => Some(post_detail(node, client.endpoint())),
        Err(e) => {
            error!("Malformed post payload for '{}': {}", slug, e);
            None
        }
    }
}

/// Fetches one publication by slug.
pub async fn fetch_publication_detail(
    client: &ContentClient,
    slug: &str,
) -> Option<ContentDetail> {
    let query = graphql::publication_by_slug_query();
    let value = fetch_item(client, &query, slug, ContentKind::Publication).await?;
    match serde_json::from_value::<LibraryNode>(value) {
        Ok(node) => Some(library_detail(node, client.endpoint())),
        Err(e) => {
            error!("Malformed publication payload for '{}': {}", slug, e);
            None
        }
    }
}

/// Fetches one resource by slug.
pub async fn fetch_resource_detail(client: &ContentClient, slug: &str) -> Option<ContentDetail> {
    let query = graphql::resource_by_slug_query();
    let value = fetch_item(client, &query, slug, ContentKind::Resource).await?;
    match serde_json::from_value::<LibraryNode>(value) {
        Ok(node) => Some(library_detail(node, client.endpoint())),
        Err(e) => {
            error!("Malformed resource payload for '{}': {}", slug, e);
            None
        }
    }
}

fn transport_failure(kind: ContentKind, e: beacon_core::AppError) -> ContentBatch {
    error!("Failed to fetch {}: {}", kind.list_field(), e);
    ContentBatch::failed(Diagnostic::transport(e.user_message()))
}

async fn fetch_item(
    client: &ContentClient,
    query: &str,
    slug: &str,
    kind: ContentKind,
) -> Option<Value> {
    // Always a fresh lookup: caching a miss would pin a 404 on a slug
    // that publishes later, and caching hits would never pick up edits.
    match client
        .query(query, json!({ "slug": slug }), FetchPolicy::NetworkOnly)
        .await
    {
        Ok(reply) => {
            if reply.has_errors() {
                error!(
                    "Errors fetching {} '{}': {:?}",
                    kind.item_field(),
                    slug,
                    reply.errors
                );
            }
            reply
                .data
                .and_then(|d| d.get(kind.item_field()).cloned())
                .filter(|v| !v.is_null())
        }
        Err(e) => {
            error!("Failed to fetch {} '{}': {}", kind.item_field(), slug, e);
            None
        }
    }
}

/// Builds a news batch from a raw query reply.
fn news_batch(reply: QueryReply, endpoint: Option<&Url>) -> ContentBatch {
    batch(reply, ContentKind::News, |value, errors| {
        let conn: Connection<PostNode> = match serde_json::from_value(value) {
            Ok(conn) => conn,
            Err(e) => return ContentBatch::failed(malformed(ContentKind::News, e)),
        };
        let records = conn
            .edges
            .into_iter()
            .map(|edge| normalize_post(edge.node, endpoint))
            .collect();
        ContentBatch {
            records,
            diagnostic: partial_errors(errors),
        }
    })
}

/// Builds a publication or resource batch from a raw query reply.
fn library_batch(reply: QueryReply, kind: ContentKind, endpoint: Option<&Url>) -> ContentBatch {
    batch(reply, kind, |value, errors| {
        let conn: Connection<LibraryNode> = match serde_json::from_value(value) {
            Ok(conn) => conn,
            Err(e) => return ContentBatch::failed(malformed(kind, e)),
        };
        let records = conn
            .edges
            .into_iter()
            .map(|edge| normalize_library(edge.node, kind, endpoint))
            .collect();
        ContentBatch {
            records,
            diagnostic: partial_errors(errors),
        }
    })
}

/// Shared shape probing: locates the expected list field or reports what
/// is actually there.
fn batch<F>(reply: QueryReply, kind: ContentKind, build: F) -> ContentBatch
where
    F: FnOnce(Value, Vec<String>) -> ContentBatch,
{
    let field = kind.list_field();
    let QueryReply { data, errors } = reply;

    let Some(data) = data else {
        if errors.is_empty() {
            return ContentBatch::failed(Diagnostic::transport(
                "Empty response from content API",
            ));
        }
        return ContentBatch::failed(Diagnostic::graphql(errors));
    };

    match data.get(field).filter(|v| !v.is_null()) {
        Some(value) => build(value.clone(), errors),
        None => {
            let available: Vec<String> = data
                .as_object()
                .map(|o| o.keys().cloned().collect())
                .unwrap_or_default();
            warn!(
                "'{}' field not found in API response; available fields: {:?}",
                field, available
            );
            let mut diagnostic = Diagnostic::missing_field(field, available);
            diagnostic.graphql_errors = errors;
            ContentBatch::failed(diagnostic)
        }
    }
}

fn partial_errors(errors: Vec<String>) -> Option<Diagnostic> {
    if errors.is_empty() {
        None
    } else {
        Some(Diagnostic::graphql(errors))
    }
}

fn malformed(kind: ContentKind, e: serde_json::Error) -> Diagnostic {
    Diagnostic::transport(format!(
        "Malformed '{}' payload: {}",
        kind.list_field(),
        e
    ))
}

/// Normalizes one raw news post node into a flat record.
pub fn normalize_post(node: PostNode, endpoint: Option<&Url>) -> ContentRecord {
    let label = node
        .categories
        .as_ref()
        .and_then(|c| c.nodes.first())
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| ContentKind::News.default_label().to_string());

    ContentRecord {
        id: node.id,
        title: node.title.unwrap_or_default(),
        slug: node.slug.unwrap_or_default(),
        image: resolve_image(node.featured_image.as_ref(), endpoint),
        label,
        date: format_date(node.date.as_deref().unwrap_or("")),
        reading_time: calculate_reading_time(node.content.as_deref().unwrap_or("")),
        excerpt: plain_excerpt(node.excerpt.as_deref().unwrap_or("")),
        download_url: None,
        authors: None,
    }
}

/// Normalizes one raw publication or resource node into a flat record.
pub fn normalize_library(
    node: LibraryNode,
    kind: ContentKind,
    endpoint: Option<&Url>,
) -> ContentRecord {
    let inputs = node.text_inputs.unwrap_or_default();

    let label = inputs
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| kind.default_label().to_string());

    // The custom authors field wins; the post author is the fallback.
    let authors = inputs
        .authors
        .map(|a| a.join())
        .filter(|a| !a.is_empty())
        .or_else(|| {
            node.author
                .as_ref()
                .and_then(|a| a.node.as_ref())
                .and_then(|n| n.name.clone())
        });

    let download_url = inputs
        .download
        .as_ref()
        .and_then(|d| d.url())
        .map(|u| absolutize(u, endpoint));

    ContentRecord {
        id: node.id,
        title: node.title.unwrap_or_default(),
        slug: node.slug.unwrap_or_default(),
        image: resolve_image(node.featured_image.as_ref(), endpoint),
        label,
        date: format_date(node.date.as_deref().unwrap_or("")),
        reading_time: calculate_reading_time(node.content.as_deref().unwrap_or("")),
        excerpt: plain_excerpt(node.excerpt.as_deref().unwrap_or("")),
        download_url,
        authors,
    }
}

/// Builds the detail-page view of a news post.
pub fn post_detail(node: PostNode, endpoint: Option<&Url>) -> ContentDetail {
    let title = node.title.unwrap_or_default();
    let content = node.content.unwrap_or_default();
    let excerpt = node.excerpt.unwrap_or_default();

    ContentDetail {
        id: node.id,
        label: node
            .categories
            .as_ref()
            .and_then(|c| c.nodes.first())
            .and_then(|c| c.name.clone()),
        author: node
            .author
            .as_ref()
            .and_then(|a| a.node.as_ref())
            .and_then(|n| n.name.clone()),
        slug: node.slug.unwrap_or_default(),
        date: format_date_long(node.date.as_deref().unwrap_or("")),
        modified: format_date(node.modified.as_deref().unwrap_or("")),
        reading_time: calculate_reading_time(&content),
        excerpt_html: full_excerpt(&excerpt, &content),
        image: detail_image(node.featured_image.as_ref(), &title, endpoint),
        body_html: content,
        download_url: None,
        title,
    }
}

/// Builds the detail-page view of a publication or resource.
pub fn library_detail(node: LibraryNode, endpoint: Option<&Url>) -> ContentDetail {
    let title = node.title.unwrap_or_default();
    let content = node.content.unwrap_or_default();
    let excerpt = node.excerpt.unwrap_or_default();
    let inputs = node.text_inputs.unwrap_or_default();

    let author = inputs
        .authors
        .map(|a| a.join())
        .filter(|a| !a.is_empty())
        .or_else(|| {
            node.author
                .as_ref()
                .and_then(|a| a.node.as_ref())
                .and_then(|n| n.name.clone())
        });

    ContentDetail {
        id: node.id,
        label: inputs.category.filter(|c| !c.is_empty()),
        author,
        slug: node.slug.unwrap_or_default(),
        date: format_date_long(node.date.as_deref().unwrap_or("")),
        modified: format_date(node.modified.as_deref().unwrap_or("")),
        reading_time: calculate_reading_time(&content),
        excerpt_html: full_excerpt(&excerpt, &content),
        image: detail_image(node.featured_image.as_ref(), &title, endpoint),
        body_html: content,
        download_url: inputs
            .download
            .as_ref()
            .and_then(|d| d.url())
            .map(|u| absolutize(u, endpoint)),
        title,
    }
}

fn resolve_image(media: Option<&MediaField>, endpoint: Option<&Url>) -> String {
    media
        .and_then(|f| f.node.as_ref())
        .and_then(|m| m.source_url.as_deref())
        .filter(|s| !s.is_empty())
        .map(|s| absolutize(s, endpoint))
        .unwrap_or_else(|| FALLBACK_IMAGE.to_string())
}

fn detail_image(
    media: Option<&MediaField>,
    title: &str,
    endpoint: Option<&Url>,
) -> Option<DetailImage> {
    let node = media.and_then(|f| f.node.as_ref())?;
    let url = node.source_url.as_deref().filter(|s| !s.is_empty())?;
    let details = node.media_details.clone().unwrap_or_default();
    Some(DetailImage {
        url: absolutize(url, endpoint),
        alt: node
            .alt_text
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| title.to_string()),
        width: details.width.unwrap_or(DEFAULT_IMAGE_WIDTH),
        height: details.height.unwrap_or(DEFAULT_IMAGE_HEIGHT),
    })
}

fn absolutize(url: &str, endpoint: Option<&Url>) -> String {
    match endpoint {
        Some(e) => make_absolute(url, e),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> Url {
        Url::parse("https://cms.example.org/graphql").unwrap()
    }

    fn post_edges(count: usize) -> Value {
        let edges: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "node": {
                        "id": format!("post-{}", i),
                        "title": format!("Post {}", i),
                        "slug": format!("post-{}", i),
                        "date": "2024-05-03T09:30:00",
                        "excerpt": "<p>Rights &amp; freedoms</p>",
                        "content": "<p>Body text</p>",
                        "categories": { "nodes": [{ "name": "Advocacy" }] }
                    },
                    "cursor": format!("c{}", i)
                })
            })
            .collect();
        json!({ "posts": { "edges": edges, "pageInfo": { "hasNextPage": false } } })
    }

    #[test]
    fn test_news_batch_one_record_per_edge_in_order() {
        let reply = QueryReply {
            data: Some(post_edges(3)),
            errors: Vec::new(),
        };
        let ep = endpoint();
        let batch = news_batch(reply, Some(&ep));
        assert_eq!(batch.records.len(), 3);
        assert!(batch.diagnostic.is_none());
        let ids: Vec<&str> = batch.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["post-0", "post-1", "post-2"]);
    }

    #[test]
    fn test_news_record_fields_are_normalized() {
        let reply = QueryReply {
            data: Some(post_edges(1)),
            errors: Vec::new(),
        };
        let ep = endpoint();
        let record = news_batch(reply, Some(&ep)).records.remove(0);
        assert_eq!(record.label, "Advocacy");
        assert_eq!(record.date, "2024-05-03");
        assert_eq!(record.reading_time, "1 min read");
        assert_eq!(record.excerpt, "Rights & freedoms");
        assert_eq!(record.image, FALLBACK_IMAGE);
    }

    #[test]
    fn test_missing_posts_field_reports_available_fields() {
        let reply = QueryReply {
            data: Some(json!({ "pages": {}, "mediaItems": {} })),
            errors: Vec::new(),
        };
        let batch = news_batch(reply, None);
        assert!(batch.is_empty());
        let diag = batch.diagnostic.unwrap();
        assert_eq!(diag.missing_field.as_deref(), Some("posts"));
        let available = diag.available_fields.unwrap();
        assert!(available.contains(&"pages".to_string()));
        assert!(available.contains(&"mediaItems".to_string()));
    }

    #[test]
    fn test_graphql_errors_without_data_fail_the_batch() {
        let reply = QueryReply {
            data: None,
            errors: vec!["Cannot query field \"posts\"".to_string()],
        };
        let batch = news_batch(reply, None);
        assert!(batch.is_empty());
        let diag = batch.diagnostic.unwrap();
        assert_eq!(diag.graphql_errors.len(), 1);
    }

    #[test]
    fn test_empty_edges_is_empty_batch_not_error() {
        let reply = QueryReply {
            data: Some(json!({ "posts": { "edges": [] } })),
            errors: Vec::new(),
        };
        let batch = news_batch(reply, None);
        assert!(batch.is_empty());
        assert!(batch.diagnostic.is_none());
    }

    #[test]
    fn test_partial_data_with_errors_keeps_records_and_diagnostic() {
        let reply = QueryReply {
            data: Some(post_edges(2)),
            errors: vec!["field 'author' errored".to_string()],
        };
        let ep = endpoint();
        let batch = news_batch(reply, Some(&ep));
        assert_eq!(batch.records.len(), 2);
        assert!(batch.diagnostic.is_some());
    }

    #[test]
    fn test_normalize_post_fallbacks_for_sparse_node() {
        let node: PostNode = serde_json::from_value(json!({ "id": "p1" })).unwrap();
        let record = normalize_post(node, None);
        assert_eq!(record.title, "");
        assert_eq!(record.slug, "");
        assert_eq!(record.image, FALLBACK_IMAGE);
        assert_eq!(record.label, "News");
        assert_eq!(record.date, "");
        assert_eq!(record.reading_time, "1 min read");
        assert_eq!(record.excerpt, "");
    }

    #[test]
    fn test_normalize_library_download_shapes() {
        let ep = endpoint();
        for download in [
            json!("/wp-content/uploads/report.pdf"),
            json!({ "node": { "mediaItemUrl": "/wp-content/uploads/report.pdf" } }),
            json!({ "url": "/wp-content/uploads/report.pdf" }),
        ] {
            let node: LibraryNode = serde_json::from_value(json!({
                "id": "pub-1",
                "textInputs": { "download": download }
            }))
            .unwrap();
            let record = normalize_library(node, ContentKind::Publication, Some(&ep));
            assert_eq!(
                record.download_url.as_deref(),
                Some("https://cms.example.org/wp-content/uploads/report.pdf")
            );
        }
    }

    #[test]
    fn test_normalize_library_absolute_download_unchanged() {
        let ep = endpoint();
        let node: LibraryNode = serde_json::from_value(json!({
            "id": "pub-1",
            "textInputs": { "download": "https://files.example.net/report.pdf" }
        }))
        .unwrap();
        let record = normalize_library(node, ContentKind::Publication, Some(&ep));
        assert_eq!(
            record.download_url.as_deref(),
            Some("https://files.example.net/report.pdf")
        );
    }

    #[test]
    fn test_normalize_library_authors_fallback_to_post_author() {
        let node: LibraryNode = serde_json::from_value(json!({
            "id": "pub-1",
            "author": { "node": { "name": "Staff Writer" } },
            "textInputs": {}
        }))
        .unwrap();
        let record = normalize_library(node, ContentKind::Publication, None);
        assert_eq!(record.authors.as_deref(), Some("Staff Writer"));
    }

    #[test]
    fn test_normalize_library_custom_authors_win() {
        let node: LibraryNode = serde_json::from_value(json!({
            "id": "pub-1",
            "author": { "node": { "name": "Staff Writer" } },
            "textInputs": { "authors": ["A. One", "B. Two"] }
        }))
        .unwrap();
        let record = normalize_library(node, ContentKind::Publication, None);
        assert_eq!(record.authors.as_deref(), Some("A. One, B. Two"));
    }

    #[test]
    fn test_normalize_library_default_label() {
        let node: LibraryNode = serde_json::from_value(json!({ "id": "pub-1" })).unwrap();
        let record = normalize_library(node, ContentKind::Publication, None);
        assert_eq!(record.label, "Book");
    }

    #[test]
    fn test_post_detail_excerpt_and_image() {
        let node: PostNode = serde_json::from_value(json!({
            "id": "p1",
            "title": "Launch",
            "slug": "launch",
            "date": "2024-05-03T09:30:00",
            "modified": "2024-06-01T10:00:00",
            "excerpt": "Cut short [&hellip;]",
            "content": "<p>one two three</p>",
            "featuredImage": {
                "node": {
                    "sourceUrl": "/uploads/launch.jpg",
                    "altText": "",
                    "mediaDetails": { "width": 640 }
                }
            }
        }))
        .unwrap();
        let ep = endpoint();
        let detail = post_detail(node, Some(&ep));
        assert_eq!(detail.date, "May 3, 2024");
        assert_eq!(detail.modified, "2024-06-01");
        // Truncated excerpt falls back to the body.
        assert_eq!(detail.excerpt_html, "one two three");
        let image = detail.image.unwrap();
        assert_eq!(image.url, "https://cms.example.org/uploads/launch.jpg");
        assert_eq!(image.alt, "Launch");
        assert_eq!(image.width, 640);
        assert_eq!(image.height, 800);
    }

    #[tokio::test]
    async fn test_detail_lookup_never_served_from_cache() {
        // Endpoint points at a closed port, so a network attempt fails. A
        // cached payload for the same slug query must not mask that: slug
        // lookups are always fresh.
        let client = ContentClient::new(Some("http://127.0.0.1:9/graphql")).unwrap();
        let query = graphql::post_by_slug_query();
        let variables = json!({ "slug": "future-post" });
        client.prime_cache(
            &query,
            &variables,
            json!({ "post": { "id": "p1", "title": "Future", "slug": "future-post" } }),
        );

        let result = fetch_news_detail(&client, "future-post").await;
        assert!(result.is_none());
    }

    #[test]
    fn test_library_detail_carries_download() {
        let node: LibraryNode = serde_json::from_value(json!({
            "id": "pub-1",
            "title": "Toolkit",
            "slug": "toolkit",
            "textInputs": {
                "category": "Toolkit",
                "download": { "node": { "sourceUrl": "/files/toolkit.pdf" } }
            }
        }))
        .unwrap();
        let ep = endpoint();
        let detail = library_detail(node, Some(&ep));
        assert_eq!(detail.label.as_deref(), Some("Toolkit"));
        assert_eq!(
            detail.download_url.as_deref(),
            Some("https://cms.example.org/files/toolkit.pdf")
        );
    }
}
