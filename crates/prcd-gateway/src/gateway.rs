//! Main Gateway implementation
//!
//! HTTP front for a loaded [`Grimoire`]. Every quotation endpoint answers in
//! plain text by default and in JSON when the client asks for it through
//! `Content-Type` or `Accept`.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use prcd_core::{Grimoire, PrcdError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::{GatewayError, Result};

const JSON_MIME: &str = "application/json";

/// Gateway state shared across handlers
#[derive(Debug)]
pub struct GatewayState {
    pub config: GatewayConfig,
    pub grimoire: Arc<Grimoire>,
    pub loaded_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig, grimoire: Grimoire) -> Self {
        Self {
            config,
            grimoire: Arc::new(grimoire),
            loaded_at: Utc::now(),
        }
    }
}

/// Response flavour chosen from the request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    PlainText,
    Json,
}

impl ResponseFormat {
    /// JSON when the request sends `Content-Type: application/json` or accepts it
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let content_type_json = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map_or(false, |v| v.trim().eq_ignore_ascii_case(JSON_MIME));

        let accepts_json = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.to_ascii_lowercase().contains(JSON_MIME));

        if content_type_json || accepts_json {
            Self::Json
        } else {
            Self::PlainText
        }
    }
}

/// Main Gateway
pub struct Gateway {
    state: Arc<GatewayState>,
}

impl Gateway {
    /// Create a gateway around an already loaded grimoire
    pub fn new(config: GatewayConfig, grimoire: Grimoire) -> Self {
        let state = Arc::new(GatewayState::new(config, grimoire));
        Self { state }
    }

    /// Load the grimoire from `config.data_dir` and create the gateway
    pub fn load(config: GatewayConfig) -> Result<Self> {
        let grimoire = prcd_core::load_dir(&config.data_dir)?;
        Ok(Self::new(config, grimoire))
    }

    /// Get gateway state
    pub fn state(&self) -> Arc<GatewayState> {
        self.state.clone()
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/", get(Self::handle_random))
            .route("/prcd", get(Self::handle_random))
            .route("/prcd/:section", get(Self::handle_section))
            .route("/sections", get(Self::handle_sections))
            .route("/health", get(Self::handle_health))
            .route("/status", get(Self::handle_status))
            .layer(CorsLayer::permissive());

        let router = if self.state.config.tracing {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        };

        router.with_state(self.state.clone())
    }

    /// Start the gateway server; returns after Ctrl+C
    pub async fn start(&self) -> Result<()> {
        let addr = self.state.config.socket_addr()?;
        let router = self.build_router();

        tracing::info!("PRCD Gateway starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    // HTTP handlers

    async fn handle_random(State(state): State<Arc<GatewayState>>, headers: HeaderMap) -> Response {
        let format = ResponseFormat::from_headers(&headers);
        match state.grimoire.from_random_section() {
            Ok((moccolo, section)) => match format {
                ResponseFormat::Json => Json(moccolo).into_response(),
                ResponseFormat::PlainText => format!("{}\n", moccolo.with_section(section)).into_response(),
            },
            Err(e) => error_response(
                format,
                &e,
                "Internal error: fetching moccolo.",
                "Error fetching a random Moccolo.",
            ),
        }
    }

    async fn handle_section(
        State(state): State<Arc<GatewayState>>,
        Path(section): Path<String>,
        headers: HeaderMap,
    ) -> Response {
        let format = ResponseFormat::from_headers(&headers);
        match state.grimoire.from_section(&section) {
            Ok(moccolo) => match format {
                ResponseFormat::Json => Json(moccolo).into_response(),
                ResponseFormat::PlainText => format!("{}\n", moccolo).into_response(),
            },
            Err(e) => error_response(
                format,
                &e,
                "Internal error: fetching moccolo from section.",
                "Internal error: fetching moccolo from section.",
            ),
        }
    }

    async fn handle_sections(State(state): State<Arc<GatewayState>>, headers: HeaderMap) -> Response {
        let mut sections = state.grimoire.section_names();
        sections.sort();

        match ResponseFormat::from_headers(&headers) {
            ResponseFormat::Json => Json(sections).into_response(),
            ResponseFormat::PlainText => format!("{}\n", sections.join(" ")).into_response(),
        }
    }

    async fn handle_health() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "healthy",
            "version": crate::VERSION
        }))
    }

    async fn handle_status(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
        Json(serde_json::json!({
            "version": crate::VERSION,
            "sections": state.grimoire.len(),
            "entries": state.grimoire.total_entries(),
            "loaded_at": state.loaded_at,
        }))
    }
}

/// Map a lookup failure to a response: unknown sections are 404, empty content is 500
fn error_response(
    format: ResponseFormat,
    err: &PrcdError,
    text_message: &str,
    json_message: &str,
) -> Response {
    let (status, message) = if err.is_not_found() {
        tracing::warn!("{}", err);
        (StatusCode::NOT_FOUND, "Section not found.")
    } else {
        tracing::error!("{}", err);
        let message = match format {
            ResponseFormat::Json => json_message,
            ResponseFormat::PlainText => text_message,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    };

    match format {
        ResponseFormat::Json => (status, Json(serde_json::json!({ "error": message }))).into_response(),
        ResponseFormat::PlainText => (status, format!("{}\n", message)).into_response(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Gateway shutdown initiated");
}
