use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Request body extractor accepting JSON and urlencoded form bodies.
///
/// Unlike [`axum::Json`], an empty body reads as the empty JSON object,
/// so requests without a payload still reach the handler and fail (or
/// pass) field validation rather than being rejected at extraction.
#[derive(Debug)]
pub struct Payload<T = Value>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::BadPayload(format!("Failed to read body: {err}")))?;

        let value = if bytes.is_empty() {
            Value::Object(Map::new())
        } else if is_form {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
                .map_err(|err| AppError::BadPayload(format!("Invalid form body: {err}")))?;
            Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            )
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|err| AppError::BadPayload(format!("Invalid JSON body: {err}")))?
        };

        let inner = serde_json::from_value(value)
            .map_err(|err| AppError::BadPayload(format!("Invalid payload: {err}")))?;

        Ok(Payload(inner))
    }
}
