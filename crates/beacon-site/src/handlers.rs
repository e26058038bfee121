//! Request handlers.
//!
//! Every handler renders a full page. Fetch failures never surface as 5xx:
//! list pages render their empty state with the diagnostic attached, and a
//! missing detail record renders the not-found page with a 404 status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use beacon_client::{
    fetch_news, fetch_news_detail, fetch_publication_detail, fetch_publications,
    fetch_resource_detail, fetch_resources, FetchPolicy, HOME_NEWS_LIMIT, HOME_PUBLICATIONS_LIMIT,
    LIST_PAGE_LIMIT,
};
use beacon_core::ContentDetail;
use serde_json::json;
use tracing::error;

use crate::state::SharedState;

type PageResponse = (StatusCode, Html<String>);

fn page(state: &SharedState, template: &str, context: &serde_json::Value) -> PageResponse {
    render_with_status(state, template, context, StatusCode::OK)
}

fn render_with_status(
    state: &SharedState,
    template: &str,
    context: &serde_json::Value,
    status: StatusCode,
) -> PageResponse {
    match state.views.render(template, context) {
        Ok(html) => (status, Html(html)),
        Err(e) => {
            error!("failed to render {}: {}", template, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>".to_string()),
            )
        }
    }
}

fn detail_page(state: &SharedState, item: Option<ContentDetail>) -> PageResponse {
    match item {
        Some(item) => {
            let title = item.title.clone();
            page(state, "detail", &json!({ "title": title, "item": item }))
        }
        None => not_found_page(state),
    }
}

fn not_found_page(state: &SharedState) -> PageResponse {
    render_with_status(
        state,
        "not_found",
        &json!({ "title": "Not Found" }),
        StatusCode::NOT_FOUND,
    )
}

pub async fn home(State(state): State<SharedState>) -> PageResponse {
    // News is always refetched so the front page stays current; the
    // publications rail is served from cache when possible.
    let news = fetch_news(&state.client, HOME_NEWS_LIMIT, FetchPolicy::NetworkOnly).await;
    let publications = fetch_publications(
        &state.client,
        HOME_PUBLICATIONS_LIMIT,
        FetchPolicy::CacheFirst,
    )
    .await;
    page(
        &state,
        "home",
        &json!({ "title": "Home", "news": news, "publications": publications }),
    )
}

pub async fn news_index(State(state): State<SharedState>) -> PageResponse {
    let news = fetch_news(&state.client, LIST_PAGE_LIMIT, FetchPolicy::CacheFirst).await;
    page(&state, "news", &json!({ "title": "News", "news": news }))
}

pub async fn news_detail(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> PageResponse {
    detail_page(&state, fetch_news_detail(&state.client, &slug).await)
}

pub async fn publications_index(State(state): State<SharedState>) -> PageResponse {
    let publications =
        fetch_publications(&state.client, LIST_PAGE_LIMIT, FetchPolicy::CacheFirst).await;
    page(
        &state,
        "publications",
        &json!({ "title": "Publications", "publications": publications }),
    )
}

pub async fn publication_detail(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> PageResponse {
    detail_page(&state, fetch_publication_detail(&state.client, &slug).await)
}

pub async fn resources_index(State(state): State<SharedState>) -> PageResponse {
    let resources = fetch_resources(&state.client, LIST_PAGE_LIMIT, FetchPolicy::CacheFirst).await;
    page(
        &state,
        "resources",
        &json!({ "title": "Resources", "resources": resources }),
    )
}

pub async fn resource_detail(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> PageResponse {
    detail_page(&state, fetch_resource_detail(&state.client, &slug).await)
}

/// Static marketing pages that have not moved into the content API yet.
pub async fn static_page(State(state): State<SharedState>, heading: &'static str) -> PageResponse {
    page(
        &state,
        "page",
        &json!({
            "title": heading,
            "heading": heading,
            "body": "This page is under construction. Check back soon.",
        }),
    )
}

pub async fn not_found(State(state): State<SharedState>) -> PageResponse {
    not_found_page(&state)
}
