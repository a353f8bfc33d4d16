/// Request origin extraction
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Origin (`scheme://host[:port]`) that cover URLs in a response are built on.
///
/// Uses the configured public URL when there is one; otherwise the
/// `X-Forwarded-Proto` (or request scheme, defaulting to `http`) and the
/// `Host` header of the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

impl RequestOrigin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(origin) = &state.public_origin {
            return Ok(Self(origin.clone()));
        }

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .ok_or_else(|| ServerError::BadRequest("Missing Host header".to_string()))?;

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .map(str::trim)
            .or_else(|| parts.uri.scheme_str())
            .unwrap_or("http");

        Ok(Self(format!("{}://{}", scheme, host)))
    }
}
