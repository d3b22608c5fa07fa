use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use super::types::SignupRequest;
use crate::auth::password;
use crate::error::ApiError;
use crate::server::AppState;
use crate::store::{NewUser, StoreError};

/// POST /signup - create a user account.
///
/// The plaintext password is hashed here, before the store is touched,
/// so it is never persisted.
pub async fn signup_post(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (username, password) = match (request.username, request.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(ApiError::bad_request(
                "Please include both username and password to signup.",
            ))
        }
    };

    let password_hash =
        password::hash(&password, state.config.security.bcrypt_cost).map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal("Something went wrong. Please try again later.")
        })?;

    let new_user = NewUser {
        name: request.name.unwrap_or_default(),
        username,
        password_hash,
    };

    match state.users.create(new_user).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "created user");
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "msg": "Successfully created new user.",
                })),
            ))
        }
        Err(StoreError::Duplicate(_)) => Err(ApiError::conflict(
            "A user with that username already exists.",
        )),
        Err(other) => Err(other.into()),
    }
}
