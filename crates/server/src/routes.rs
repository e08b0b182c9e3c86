pub mod auth;
pub mod groups;
pub mod payments;
pub mod expenses;

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::{apply_error_status, ApiError};
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    common::metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// Counts requests and latency; sees the handler's status before any legacy rewrite.
async fn track_metrics(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let resp = next.run(req).await;
    let failed = resp.status().is_client_error() || resp.status().is_server_error();
    common::metrics::observe_request(failed, started.elapsed().as_secs_f64());
    resp
}

/// Build the full application router, including public and protected routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health, metrics, docs, register/login)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    // Protected API routes
    let api = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/groups", post(groups::create).get(groups::list))
        .route("/groups/:group_id", put(groups::update).delete(groups::delete))
        .route("/groups/:group_id/members", get(groups::list_members).post(groups::add_member))
        .route("/groups/:group_id/members/:user_id", delete(groups::remove_member))
        .route("/groups/:group_id/leave", post(groups::leave))
        .route("/groups/:group_id/payments", get(payments::list).post(payments::record))
        .route("/expenses", post(expenses::create).get(expenses::list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    // Compose
    public
        .merge(api)
        .fallback(not_found)
        .with_state(state.clone())
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn_with_state(state.error_status, apply_error_status))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
