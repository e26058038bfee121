use std::path::Path;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::SharedState;

pub fn router(state: SharedState, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/news", get(handlers::news_index))
        .route("/news/{slug}", get(handlers::news_detail))
        .route("/our-work/publications", get(handlers::publications_index))
        .route("/publications/{slug}", get(handlers::publication_detail))
        // Legacy path kept so links under the old section prefix resolve.
        .route(
            "/our-work/publications/{slug}",
            get(handlers::publication_detail),
        )
        .route("/resources", get(handlers::resources_index))
        .route("/resources/{slug}", get(handlers::resource_detail))
        .route("/about-us", get(|s: State<SharedState>| handlers::static_page(s, "About Us")))
        .route(
            "/get-involved",
            get(|s: State<SharedState>| handlers::static_page(s, "Get Involved")),
        )
        .route("/donate", get(|s: State<SharedState>| handlers::static_page(s, "Donate")))
        .route(
            "/become-a-member",
            get(|s: State<SharedState>| handlers::static_page(s, "Become a Member")),
        )
        .route(
            "/trainings",
            get(|s: State<SharedState>| handlers::static_page(s, "Trainings")),
        )
        .nest_service("/img", ServeDir::new(assets_dir.join("img")))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
