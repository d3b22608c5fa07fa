use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::server::AppState;

/// Authenticated user context extracted from a verified token and made
/// available to handlers as a request extension.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// Token-validating middleware for the movie routes. Rejects the request
/// with 401 before the handler runs when the Authorization header is
/// absent, malformed, or carries an invalid or expired token.
pub async fn require_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::decode_token(&token, &state.config.security.jwt_secret)
        .map_err(|e| {
            tracing::warn!("rejected token: {}", e);
            ApiError::unauthorized("Authentication failed. Invalid token.")
        })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Pull the raw token out of the Authorization header. The wire scheme
/// is `JWT <token>`, matching what signin hands out.
fn extract_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header.".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header.".to_string())?;

    match auth_str.strip_prefix("JWT ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err("Empty token.".to_string()),
        None => Err("Authorization header must use the JWT scheme.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_from_jwt_scheme() {
        let headers = headers_with("JWT abc.def.ghi");
        assert_eq!(extract_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_bearer_scheme() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("JWT  ");
        assert!(extract_token(&headers).is_err());
    }
}
