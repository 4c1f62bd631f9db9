use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{servicedtos::CreateServiceDto, userdtos::Response},
    error::HttpError,
    handler::created,
    middleware::role_check,
    models::usermodel::UserRole,
    AppState,
};

/// Catalog of extra services (internet, parking, ...) a contract may reference.
pub fn service_handler() -> Router {
    Router::new()
        .route("/", get(get_services))
        .route(
            "/",
            post(create_service).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:service_id",
            delete(delete_service).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn get_services(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let services = app_state.catalog_service.list_services().await?;

    Ok(Json(services))
}

pub async fn create_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateServiceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let service = app_state.catalog_service.create_service(body.into()).await?;

    Ok(created(service))
}

pub async fn delete_service(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.catalog_service.delete_service(service_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Service deleted".to_string(),
    }))
}
