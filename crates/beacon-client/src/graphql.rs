//! GraphQL wire format: request/response envelopes and query documents.
//!
//! The content backend is WPGraphQL, which wraps every list in a
//! node/edge connection envelope with cursor pagination. Queries are kept
//! as plain documents; variables are supplied per call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing GraphQL request body.
#[derive(Serialize, Debug)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// Incoming GraphQL response envelope.
///
/// Per the GraphQL spec, `data` and `errors` can coexist: a response may
/// carry partial data alongside field-level errors.
#[derive(Deserialize, Debug)]
pub struct GraphQlResponse {
    pub data: Option<Value>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize, Debug)]
pub struct GraphQlError {
    pub message: String,
}

/// Shared field selection for news posts.
const POST_FIELDS: &str = r#"
fragment PostFields on Post {
    id
    title
    slug
    date
    modified
    excerpt
    content
    author {
        node {
            id
            name
            slug
        }
    }
    featuredImage {
        node {
            sourceUrl
            altText
            mediaDetails {
                width
                height
            }
        }
    }
    categories {
        nodes {
            id
            name
            slug
        }
    }
}
"#;

/// Shared field selection for publications and resources, including the
/// custom structured fields (category label, author list, download file).
const LIBRARY_FIELDS: &str = r#"
    id
    title
    slug
    date
    modified
    excerpt
    content
    author {
        node {
            id
            name
            slug
        }
    }
    featuredImage {
        node {
            sourceUrl
            altText
            mediaDetails {
                width
                height
            }
        }
    }
    textInputs {
        download {
            node {
                uri
                sourceUrl
                mediaItemUrl
            }
        }
        category
        authors
    }
"#;

const PAGE_INFO: &str = r#"
    pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
    }
"#;

/// Fetch a page of news posts, newest first.
pub fn posts_query() -> String {
    format!(
        r#"{POST_FIELDS}
query GetPosts($first: Int, $after: String) {{
    posts(first: $first, after: $after) {{
        edges {{
            node {{
                ...PostFields
            }}
            cursor
        }}
        {PAGE_INFO}
    }}
}}"#
    )
}

/// Fetch a single post by slug.
pub fn post_by_slug_query() -> String {
    format!(
        r#"{POST_FIELDS}
query GetPostBySlug($slug: ID!) {{
    post(id: $slug, idType: SLUG) {{
        ...PostFields
    }}
}}"#
    )
}

/// Fetch a page of publications.
pub fn publications_query() -> String {
    format!(
        r#"query GetPublications($first: Int, $after: String) {{
    publications(first: $first, after: $after) {{
        edges {{
            node {{
{LIBRARY_FIELDS}
            }}
            cursor
        }}
        {PAGE_INFO}
    }}
}}"#
    )
}

/// Fetch a single publication by slug.
pub fn publication_by_slug_query() -> String {
    format!(
        r#"query GetPublicationBySlug($slug: ID!) {{
    publication(id: $slug, idType: SLUG) {{
{LIBRARY_FIELDS}
    }}
}}"#
    )
}

/// Fetch a page of resources.
pub fn resources_query() -> String {
    format!(
        r#"query GetResources($first: Int, $after: String) {{
    resources(first: $first, after: $after) {{
        edges {{
            node {{
{LIBRARY_FIELDS}
            }}
            cursor
        }}
        {PAGE_INFO}
    }}
}}"#
    )
}

/// Fetch a single resource by slug.
pub fn resource_by_slug_query() -> String {
    format!(
        r#"query GetResourceBySlug($slug: ID!) {{
    resource(id: $slug, idType: SLUG) {{
{LIBRARY_FIELDS}
    }}
}}"#
    )
}
