use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::TranslateError;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResult};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: routes plus the shared middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listening socket. `host` may be a hostname or an IPv4/IPv6
/// literal.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

pub fn create_routes(state: AppState) -> Router<AppState> {
    let api = Router::new()
        // Health check
        .route("/", get(health_check))
        .route("/translate", post(translate));

    // Bundled UIs call the backend through an `/api` prefix.
    let mut router = api.clone().nest("/api", api);

    if let Some(static_dir) = &state.settings.static_dir {
        router = router.nest_service("/app", ServeDir::new(static_dir));
    }

    router
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "provider": state.provider()
    }))
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TranslationResult>, TranslateError> {
    let payload = match payload {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            debug!("Unreadable translate body: {}", rejection);
            None
        }
    };

    let request = TranslationRequest::from_payload(payload.as_ref())?;
    let relay = state.relay()?;
    let result = relay.translate(&request).await?;
    Ok(Json(result))
}
