pub mod auth;
pub mod bills;
pub mod contracts;
pub mod dashboard;
pub mod rooms;
pub mod services;
pub mod users;

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Response for a POST that stored a new record.
pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use serde_json::json;

    #[test]
    fn created_responds_with_201() {
        let response = created(json!({"status": "success"})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
