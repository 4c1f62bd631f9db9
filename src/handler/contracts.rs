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
    dtos::contractdtos::{CreateContractDto, CreateContractResponseDto},
    error::HttpError,
    handler::created,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn contract_handler() -> Router {
    let admin_routes = Router::new()
        .route("/", get(get_contracts).post(create_contract))
        .route("/:contract_id", get(get_contract))
        .route("/:contract_id/terminate", put(terminate_contract))
        .route_layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }));

    Router::new()
        .route("/my-contract", get(get_my_contract))
        .merge(admin_routes)
}

/// `null` when the caller has no active contract.
pub async fn get_my_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .active_contract_for(user.user.id)
        .await?;

    Ok(Json(contract))
}

pub async fn get_contracts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state.contract_service.list_contracts().await?;

    Ok(Json(contracts))
}

pub async fn get_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state.contract_service.get_contract(contract_id).await?;

    Ok(Json(contract))
}

pub async fn create_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateContractDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contract = app_state.contract_service.create_contract(body).await?;

    Ok(created(CreateContractResponseDto {
        status: "success".to_string(),
        message: "Contract created".to_string(),
        contract,
    }))
}

pub async fn terminate_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .terminate_contract(contract_id)
        .await?;

    Ok(Json(contract))
}
