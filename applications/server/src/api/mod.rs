/// API route modules
pub mod albums;
pub mod covers;
pub mod health;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Albums
        .route(
            "/albums",
            get(albums::list_albums).post(albums::create_album),
        )
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        // Covers
        .route("/upload-cover", post(covers::upload_cover))
        .route(
            "/covers/:filename",
            get(covers::serve_cover).delete(covers::delete_cover),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
