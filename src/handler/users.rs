use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::userdtos::{
        CreateTenantDto, FilterUserDto, Response, UpdateTenantDto, UserData, UserResponseDto,
    },
    error::HttpError,
    handler::created,
    middleware::role_check,
    models::usermodel::UserRole,
    AppState,
};

/// Tenant management. Every route here is admin only.
pub fn users_handler() -> Router {
    Router::new()
        .route("/", get(get_tenants).post(create_tenant))
        .route("/:user_id", put(update_tenant).delete(delete_tenant))
        .route("/:user_id/reset-password", put(reset_password))
        .route_layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
}

pub async fn get_tenants(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tenants = app_state.tenant_service.list_tenants().await?;

    Ok(Json(tenants))
}

pub async fn create_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateTenantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let tenant = app_state.tenant_service.create_tenant(body).await?;

    Ok(created(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&tenant),
        },
    }))
}

pub async fn update_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateTenantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let tenant = app_state.tenant_service.update_tenant(user_id, body).await?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&tenant),
        },
    }))
}

pub async fn delete_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.tenant_service.delete_tenant(user_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Tenant deleted".to_string(),
    }))
}

pub async fn reset_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.tenant_service.reset_password(user_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Password reset to the default".to_string(),
    }))
}
