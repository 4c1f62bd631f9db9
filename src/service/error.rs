use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Tenant {0} not found or has no room")]
    TenantWithoutRoom(Uuid),

    #[error("Tenant {0} not found")]
    TenantNotFound(Uuid),

    #[error("Room {0} not found")]
    RoomNotFound(Uuid),

    #[error("Contract {0} not found")]
    ContractNotFound(Uuid),

    #[error("Bill {0} not found")]
    BillNotFound(Uuid),

    #[error("Service {0} not found")]
    ServiceNotFound(Uuid),

    #[error("A room named {0} already exists")]
    DuplicateRoomName(String),

    #[error("Username {0} is already taken")]
    DuplicateUsername(String),

    #[error("Contract was not created, all changes were reverted: {0}")]
    ContractRolledBack(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<ErrorMessage> for ServiceError {
    fn from(message: ErrorMessage) -> Self {
        match message {
            ErrorMessage::EmptyPassword | ErrorMessage::ExceededMaxPasswordLength(_) => {
                ServiceError::Validation(message.to_string())
            }
            _ => ServiceError::Other(message.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::TenantNotFound(_)
            | ServiceError::RoomNotFound(_)
            | ServiceError::ContractNotFound(_)
            | ServiceError::BillNotFound(_)
            | ServiceError::ServiceNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::TenantWithoutRoom(_)
            | ServiceError::DuplicateRoomName(_)
            | ServiceError::DuplicateUsername(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::ContractRolledBack(_)
            | ServiceError::Database(_)
            | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        if let ServiceError::Database(ref e) = error {
            tracing::error!("Database error: {}", e);
        }
        HttpError::new(error.to_string(), error.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_http_status() {
        let id = Uuid::new_v4();
        assert_eq!(
            HttpError::from(ServiceError::TenantWithoutRoom(id)).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpError::from(ServiceError::BillNotFound(id)).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HttpError::from(ServiceError::ServiceNotFound(id)).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HttpError::from(ServiceError::Database(sqlx::Error::RowNotFound)).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn password_errors_become_validation_failures() {
        let error = ServiceError::from(ErrorMessage::EmptyPassword);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

        let error = ServiceError::from(ErrorMessage::HashingError);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
