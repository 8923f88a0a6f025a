//! JSON payload extractor with domain error rejections.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::validation::{self, Schema};

/// JSON body extractor whose rejections use the standard error body.
///
/// Field rules are checked by the services, not here; this only rejects
/// malformed JSON, non-object bodies and undeclared keys.
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: Schema + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        validation::from_json(body).map(JsonPayload)
    }
}
