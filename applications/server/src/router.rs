/// HTTP router assembly
use crate::{api, config::ServerConfig, services::uploads::PUBLIC_PREFIX, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// JSON API under `/api`, stored media under `/uploads`, and the static
/// front-end for everything else.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/ping", get(api::health::ping))
        // Accounts
        .route("/register", post(api::accounts::register))
        .route("/login", post(api::accounts::login))
        .route("/users/:student_id", get(api::accounts::get_user))
        // Listings
        .route(
            "/listings",
            get(api::listings::list_listings).post(api::listings::create_listing),
        )
        .route(
            "/listings/:id",
            get(api::listings::get_listing)
                .put(api::listings::update_listing)
                .delete(api::listings::delete_listing),
        );

    let uploads = ServeDir::new(app_state.uploads.base_path());
    let public = ServeDir::new(&config.storage.public_dir);

    Router::new()
        .nest("/api", api_routes)
        .nest_service(PUBLIC_PREFIX, uploads)
        .fallback_service(public)
        .layer(DefaultBodyLimit::max(config.uploads.max_request_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
