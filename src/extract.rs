use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// Request body decoded from JSON or from an URL-encoded form, picked by
/// `Content-Type`. Anything that is not a form is handed to [`Json`].
pub struct Payload<T>(pub T);

const FORM_MIME: &str = "application/x-www-form-urlencoded";

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with(FORM_MIME))
        .unwrap_or(false)
}

fn rejected(status: StatusCode, detail: String) -> ApiError {
    warn!(%status, %detail, "rejected request body");
    ApiError::BadRequest(detail)
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(body)| Payload(body))
                .map_err(|r| rejected(r.status(), r.body_text()))
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(body)| Payload(body))
                .map_err(|r| rejected(r.status(), r.body_text()))
        }
    }
}
