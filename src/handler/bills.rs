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
    dtos::{
        billdtos::{BillListItemDto, CreateBillDto, UpdateBillStatusDto},
        userdtos::Response,
    },
    error::HttpError,
    handler::created,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn bill_handler() -> Router {
    let admin_routes = Router::new()
        .route("/", get(get_bills).post(create_bill))
        .route("/:bill_id", put(update_bill_status).delete(delete_bill))
        .route_layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }));

    Router::new()
        .route("/my-bills", get(get_my_bills))
        .merge(admin_routes)
}

pub async fn get_bills(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let bills = app_state.bill_service.list_bills().await?;

    Ok(Json(
        bills
            .into_iter()
            .map(BillListItemDto::from_row)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_my_bills(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let bills = app_state.bill_service.tenant_bills(user.user.id).await?;

    Ok(Json(
        bills
            .into_iter()
            .map(BillListItemDto::from_row)
            .collect::<Vec<_>>(),
    ))
}

pub async fn create_bill(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateBillDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bill = app_state.bill_service.create_bill(body).await?;

    Ok(created(bill))
}

pub async fn update_bill_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bill_id): Path<Uuid>,
    Json(body): Json<UpdateBillStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let bill = app_state.bill_service.set_paid(bill_id, body.is_paid).await?;

    Ok(Json(bill))
}

pub async fn delete_bill(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(bill_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.bill_service.delete_bill(bill_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Bill deleted".to_string(),
    }))
}
