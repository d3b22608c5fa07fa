use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::types::SigninRequest;
use crate::auth::{self, password, Claims};
use crate::error::ApiError;
use crate::server::AppState;

/// POST /signin - verify credentials and issue a bearer token.
///
/// The returned token string already carries the `JWT ` scheme prefix
/// clients put in the Authorization header.
pub async fn signin_post(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Authentication failed. User not found."))?;

    let is_match = password::verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal("Something went wrong. Please try again later.")
    })?;

    if !is_match {
        tracing::warn!(username = %user.username, "signin rejected: incorrect password");
        return Err(ApiError::unauthorized(
            "Authentication failed. Incorrect password.",
        ));
    }

    let claims = Claims::new(
        user.id,
        user.username.clone(),
        state.config.security.token_ttl_secs,
    );
    let token = auth::encode_token(&claims, &state.config.security.jwt_secret)?;

    Ok(Json(json!({
        "success": true,
        "token": format!("JWT {token}"),
    })))
}
