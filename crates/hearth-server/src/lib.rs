//! Hearth Web Server
//!
//! Axum-based REST API for the Hearth household ledger.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Input validation (date and month formats, pagination limits)
//! - Sanitized error responses
//!
//! The server assumes a single local user; there is no authentication layer.
//! Bind it to localhost or put it behind something that authenticates.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use hearth_core::ai::{AIClient, ChatBackend};
use hearth_core::config::Config;
use hearth_core::db::Database;
use hearth_core::prompts::PromptLibrary;

mod handlers;

/// Maximum limit for the recent-records listing
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: Config,
    /// Chat client, absent when no chat host is configured
    pub ai: Option<AIClient>,
    pub prompts: PromptLibrary,
}

impl AppState {
    /// Build state from configuration
    pub fn from_config(db: Database, config: Config) -> Self {
        let ai = AIClient::from_config(&config.chat);
        if ai.is_none() {
            info!("ℹ️  Chat not configured (set HEARTH_CHAT_HOST to enable /api/chat)");
        }
        let prompts = PromptLibrary::from_config(config.prompts_dir.as_deref());

        Self {
            db,
            config,
            ai,
            prompts,
        }
    }
}

/// Create the application router
pub fn create_router(db: Database, config: Config, static_dir: Option<&str>) -> Router {
    create_router_with_state(AppState::from_config(db, config), static_dir)
}

/// Create the application router from prepared state (for testing)
pub fn create_router_with_state(state: AppState, static_dir: Option<&str>) -> Router {
    let allowed_origins = state.config.server.allowed_origins.clone();
    let state = Arc::new(state);

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/summary", get(handlers::get_summary))
        // Records
        .route(
            "/records",
            get(handlers::get_records_by_date).post(handlers::create_record),
        )
        .route("/records/all", get(handlers::list_all_records))
        .route("/records/recent", get(handlers::list_recent_records))
        .route("/records/:id", delete(handlers::delete_record))
        // Reports
        .route("/stats/monthly", get(handlers::get_monthly_stats))
        .route("/stats/yearly", get(handlers::get_yearly_stats))
        .route("/stats/category", get(handlers::get_category_stats))
        .route("/stats/current-month", get(handlers::get_current_month_stats))
        // Chat
        .route("/chat", post(handlers::chat));

    // Build CORS layer
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        // HTML entry form target
        .route("/add", post(handlers::add_record_form))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve the front-end if a directory was provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server on the host and port from `config.server`
pub async fn serve_with_config(
    db: Database,
    config: Config,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(db, config);

    check_chat_connection(state.ai.as_ref()).await;

    let app = create_router_with_state(state, static_dir);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log chat backend status
async fn check_chat_connection(client: Option<&AIClient>) {
    let Some(client) = client else {
        return;
    };

    if client.health_check().await {
        info!(
            "✅ Chat backend connected: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        warn!(
            "⚠️  Chat backend configured but not responding: {} (model: {})",
            client.host(),
            client.model()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Upstream chat API failure; the cause is logged, not returned
    pub fn bad_gateway(msg: &str, cause: hearth_core::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: Some(cause.into()),
        }
    }

    /// Map a core error, treating invalid input as the client's fault
    pub fn from_core(err: hearth_core::Error) -> Self {
        match err {
            hearth_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            hearth_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
