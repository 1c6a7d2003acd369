use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::users::repo::StoreError;

pub const MSG_BAD_CREDENTIALS: &str = "El usuario o la contraseña son incorrectos";
pub const MSG_REGISTERED: &str = "Usuario creado, puede iniciar sesión";
pub const MSG_EMAIL_TAKEN: &str = "El email ya está en uso";
pub const MSG_USER_NOT_FOUND: &str = "Usuario no encontrado";
pub const MSG_INTERNAL: &str = "Internal server error";
pub const MSG_BAD_REQUEST: &str = "Petición inválida";
pub const MSG_MISSING_FIELDS: &str = "Faltan campos obligatorios";

/// `{"message": "..."}` body shared by every non-entity response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    BadRequest(String),
    #[error("required fields missing")]
    MissingFields,
    /// Unknown email and wrong password share this variant.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::MissingFields | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => MSG_BAD_REQUEST,
            ApiError::MissingFields => MSG_MISSING_FIELDS,
            ApiError::InvalidCredentials => MSG_BAD_CREDENTIALS,
            ApiError::UserNotFound => MSG_USER_NOT_FOUND,
            ApiError::EmailTaken => MSG_EMAIL_TAKEN,
            ApiError::Internal(_) => MSG_INTERNAL,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey => ApiError::EmailTaken,
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = ?e, "request failed");
        }
        (self.status(), Json(MessageResponse::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_tiers() {
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EmailTaken.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_key_maps_to_conflict() {
        let err: ApiError = StoreError::DuplicateKey.into();
        assert!(matches!(err, ApiError::EmailTaken));
        let err: ApiError = StoreError::Backend(anyhow::anyhow!("boom")).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::Internal(anyhow::anyhow!("password=hunter2 connection refused"));
        assert_eq!(err.public_message(), MSG_INTERNAL);
    }
}
