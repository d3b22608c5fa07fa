use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};

use super::types::{enforce_actor_minimum, CreateMovieRequest};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::AppState;
use crate::store::NewMovie;

/// POST /movies - create a movie record.
pub async fn movies_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (title, release_date, genre, actors) = match (
        request.title,
        request.release_date,
        request.genre,
        request.actors,
    ) {
        (Some(title), Some(release_date), Some(genre), Some(actors)) => {
            (title, release_date, genre, actors)
        }
        _ => return Err(ApiError::bad_request("Missing required fields.")),
    };

    enforce_actor_minimum(&actors, state.config.validation.min_actors)?;

    let movie = state
        .movies
        .create(NewMovie {
            title,
            release_date,
            genre,
            actors,
        })
        .await?;

    tracing::info!(title = %movie.title, by = %user.username, "created movie");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "msg": "Movie created",
            "movie": movie,
        })),
    ))
}
