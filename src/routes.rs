use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, bills::bill_handler, contracts::contract_handler,
        dashboard::dashboard_handler, rooms::room_handler, services::service_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/rooms", room_handler().layer(middleware::from_fn(auth)))
        .nest("/bills", bill_handler().layer(middleware::from_fn(auth)))
        .nest("/contracts", contract_handler().layer(middleware::from_fn(auth)))
        .nest("/dashboard", dashboard_handler().layer(middleware::from_fn(auth)))
        .nest("/services", service_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
