use std::sync::Arc;

use axum::{middleware, response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{error::HttpError, middleware::role_check, models::usermodel::UserRole, AppState};

pub fn dashboard_handler() -> Router {
    Router::new().route(
        "/stats",
        get(get_stats).layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        })),
    )
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state.dashboard_service.stats().await?;

    Ok(Json(stats))
}
