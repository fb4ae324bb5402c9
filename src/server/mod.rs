//! HTTP surface

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{BrandForgeError, ErrorKind};
use crate::service::{LogoService, NameService};
use crate::types::{GenerateLogosRequest, GenerateNamesRequest, MetricsSnapshot, ServiceMetrics};

#[derive(Clone)]
pub struct AppState {
    pub names: Arc<NameService>,
    /// `None` when no image provider is configured
    pub logos: Option<Arc<LogoService>>,
    pub metrics: Arc<ServiceMetrics>,
}

/// JSON error body.
///
/// Validation errors carry only `error`; server-side failures add `code`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl From<BrandForgeError> for ApiError {
    fn from(err: BrandForgeError) -> Self {
        match err.kind() {
            ErrorKind::InvalidRequest => Self {
                status: StatusCode::BAD_REQUEST,
                error: err.user_message(),
                code: None,
            },
            ErrorKind::Upstream => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: err.user_message(),
                code: Some("upstream_error"),
            },
            ErrorKind::Internal => {
                tracing::error!(error = %err, "request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "Internal server error".to_string(),
                    code: Some("internal_error"),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    version: &'static str,
    /// Registry behind live lookups; `None` when every answer is a fallback
    registry: Option<&'static str>,
    live_ratio: f64,
    metrics: MetricsSnapshot,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate-names", post(generate_names))
        .route("/api/generate-logos", post(generate_logos))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = state.metrics.snapshot();
    Json(HealthData {
        status: "ok",
        version: crate::VERSION,
        registry: state.names.registry_name(),
        live_ratio: metrics.live_ratio(),
        metrics,
    })
}

/// Parse a JSON body regardless of its `Content-Type`.
///
/// Anything unreadable is treated as an empty request so that validation
/// reports the missing field.
fn read_body<T: DeserializeOwned + Default>(body: &Bytes, route: &'static str) -> T {
    match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(route, error = %e, "unreadable request body");
            T::default()
        }
    }
}

async fn generate_names(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: GenerateNamesRequest = read_body(&body, "generate-names");
    let response = state.names.generate(&request).await?;
    Ok(Json(response))
}

async fn generate_logos(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: GenerateLogosRequest = read_body(&body, "generate-logos");

    let Some(logos) = &state.logos else {
        return Err(BrandForgeError::upstream(
            "openai-images",
            "Logo generation is not configured",
            None,
        )
        .into());
    };

    let response = logos.generate(&request).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_maps_to_bare_400() {
        let api_error = ApiError::from(BrandForgeError::invalid_request("Prompt required"));
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&api_error).unwrap(),
            serde_json::json!({"error": "Prompt required"})
        );
    }

    #[test]
    fn upstream_maps_to_500_with_code() {
        let api_error = ApiError::from(BrandForgeError::upstream("openai", "boom", Some(502)));
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_is_read_without_content_type() {
        let body = Bytes::from_static(br#"{"prompt":"coffee"}"#);
        let request: GenerateNamesRequest = read_body(&body, "generate-names");
        assert_eq!(request.prompt.as_deref(), Some("coffee"));

        let garbage = Bytes::from_static(b"prompt=coffee");
        let request: GenerateNamesRequest = read_body(&garbage, "generate-names");
        assert!(request.prompt.is_none());
    }

    #[test]
    fn internal_errors_hide_details() {
        let api_error = ApiError::from(BrandForgeError::internal("secret path /etc/x"));
        assert_eq!(api_error.error, "Internal server error");
        assert_eq!(api_error.code, Some("internal_error"));
    }
}
