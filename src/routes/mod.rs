pub mod maintenance_routes;
pub mod maintenance_type_routes;
pub mod mechanic_routes;
pub mod suggestion_routes;
pub mod vehicle_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API con CORS y trazas HTTP
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/api/maintenance-types",
            maintenance_type_routes::create_maintenance_type_router(),
        )
        .nest("/api/mechanics", mechanic_routes::create_mechanic_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/api/suggestions", suggestion_routes::create_suggestion_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            log::error!("❌ Health check database error: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": if database == "ok" { "healthy" } else { "degraded" },
        "database": database,
        "ai_suggestions": state.suggestion_client.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
