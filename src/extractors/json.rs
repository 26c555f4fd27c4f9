//! JSON body extractor that ignores `Content-Type`. Only the first JSON value
//! of the body is decoded; anything after it is discarded.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Deserialized request body. Any read or parse failure rejects with
/// [`AppError::Decode`].
#[derive(Clone, Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Decode(e.body_text()))?;
        first_value(&bytes).map(JsonBody)
    }
}

fn first_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    match serde_json::Deserializer::from_slice(bytes).into_iter::<T>().next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(AppError::Decode(e.to_string())),
        None => Err(AppError::Decode("empty body".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn trailing_bytes_after_the_first_value_are_ignored() {
        let value: Value = first_value(br#"{"age":30} x"#).unwrap();
        assert_eq!(value["age"], 30);
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        assert!(matches!(first_value::<Value>(b"  "), Err(AppError::Decode(_))));
    }

    #[test]
    fn malformed_first_value_is_a_decode_error() {
        assert!(matches!(first_value::<Value>(b"{\"age\":"), Err(AppError::Decode(_))));
    }
}
