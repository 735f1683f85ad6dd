use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use contacts_api::config;
use contacts_api::database::manager::DatabaseManager;
use contacts_api::handlers::{contacts, users};
use contacts_api::middleware::require_auth;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Contacts API in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Contacts API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(user_public_routes())
        // Protected API
        .merge(user_session_routes())
        .merge(contact_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn user_public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        .route("/api/users", post(users::user_register))
        .route("/api/users/login", post(users::user_login))
}

fn user_session_routes() -> Router {
    use axum::routing::delete;

    Router::new()
        .route("/api/users/current", get(users::user_current))
        .route("/api/users/logout", delete(users::user_logout))
        .route_layer(from_fn(require_auth))
}

fn contact_routes() -> Router {
    Router::new()
        // Collection operations
        .route(
            "/api/contacts",
            get(contacts::contact_search).post(contacts::contact_create),
        )
        // Record operations
        .route(
            "/api/contacts/:id",
            get(contacts::contact_get)
                .put(contacts::contact_update)
                .delete(contacts::contact_delete),
        )
        .route_layer(from_fn(require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "data": {
            "name": "Contacts API",
            "version": version,
            "description": "Authenticated contact book REST API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "register": "POST /api/users (public)",
                "login": "POST /api/users/login (public)",
                "current": "GET /api/users/current (protected)",
                "logout": "DELETE /api/users/logout (protected)",
                "contacts": "/api/contacts[/:id] (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "errors": { "message": ["database unavailable"] }
                })),
            )
        }
    }
}
