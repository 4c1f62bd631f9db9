use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        roomdtos::{CreateRoomDto, UpdateRoomDto},
        userdtos::Response,
    },
    error::HttpError,
    handler::created,
    middleware::role_check,
    models::usermodel::UserRole,
    AppState,
};

pub fn room_handler() -> Router {
    Router::new()
        .route("/", get(get_rooms))
        .route("/:room_id", get(get_room))
        .route(
            "/",
            post(create_room).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
        .route(
            "/:room_id",
            put(update_room)
                .delete(delete_room)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                })),
        )
}

pub async fn get_rooms(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let rooms = app_state.room_service.list_rooms().await?;

    Ok(Json(rooms))
}

pub async fn get_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let room = app_state.room_service.get_room(room_id).await?;

    Ok(Json(room))
}

pub async fn create_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateRoomDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let room = app_state.room_service.create_room(body.into()).await?;

    Ok(created(room))
}

pub async fn update_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
    Json(body): Json<UpdateRoomDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let room = app_state.room_service.update_room(room_id, body.into()).await?;

    Ok(Json(room))
}

pub async fn delete_room(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.room_service.delete_room(room_id).await?;

    Ok(Json(Response {
        status: "success",
        message: "Room deleted".to_string(),
    }))
}
