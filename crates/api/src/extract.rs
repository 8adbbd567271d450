//! Request body extraction with JSON error envelopes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for [`Json`] whose rejection is an [`AppError`].
///
/// A missing, malformed or mistyped body becomes a 400 with the standard
/// error envelope instead of axum's plain-text 415/422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(describe(&rejection))),
        }
    }
}

/// Message for a request that carries no usable fields.
pub const NO_DATA: &str = "No data provided";

/// Rejection for a body that parsed but mentions nothing to write.
pub fn no_data() -> AppError {
    AppError::BadRequest(NO_DATA.to_string())
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            format!("{NO_DATA}: expected a JSON request body")
        }
        other => format!("Invalid request body: {}", other.body_text()),
    }
}
