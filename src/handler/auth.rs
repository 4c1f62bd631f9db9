use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::{roomdb::RoomExt, userdb::UserExt},
    dtos::{
        roomdtos::RoomSummaryDto,
        userdtos::{
            ChangePasswordDto, FilterUserDto, LoginUserDto, Response, UpdateProfileDto,
            UserLoginResponseDto, UserWithRoomDto,
        },
    },
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    let protected = Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/change-password", put(change_password))
        .layer(middleware::from_fn(auth));

    Router::new().route("/login", post(login)).merge(protected)
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.username))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        tracing::warn!("Failed login attempt for {}", body.username);
        return Err(HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()));
    }

    let token = token::create_token(
        &user.id.to_string(),
        user.role,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    );

    tracing::info!("User {} logged in as {}", user.username, user.role.to_str());

    let mut response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        id: user.id.to_string(),
        username: user.username,
        full_name: user.full_name,
        role: user.role,
        token,
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let room = match user.user.room_id {
        Some(room_id) => app_state
            .db_client
            .get_room(room_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        None => None,
    };

    Ok(Json(UserWithRoomDto {
        user: FilterUserDto::filter_user(&user.user),
        room: room.as_ref().map(RoomSummaryDto::from_room),
    }))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .update_user_profile(user.user.id, body.into())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    Ok(Json(FilterUserDto::filter_user(&updated)))
}

pub async fn change_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let password_matched = password::compare(&body.old_password, &user.user.password)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if !password_matched {
        return Err(HttpError::bad_request(ErrorMessage::WrongOldPassword.to_string()));
    }

    let hashed_password =
        password::hash(&body.new_password).map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(user.user.id, hashed_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Password updated successfully".to_string(),
    }))
}
