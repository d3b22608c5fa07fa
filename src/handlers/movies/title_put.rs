use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use super::types::enforce_actor_minimum;
use crate::error::ApiError;
use crate::server::AppState;
use crate::store::MoviePatch;

/// PUT /movies/:title - full or partial field replace on the first
/// movie matching the title.
pub async fn title_put(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(patch): Json<MoviePatch>,
) -> Result<Json<Value>, ApiError> {
    if let Some(actors) = &patch.actors {
        enforce_actor_minimum(actors, state.config.validation.min_actors)?;
    }

    let movie = state
        .movies
        .update_by_title(&title, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Movie not found."))?;

    Ok(Json(json!({
        "success": true,
        "msg": "Movie updated",
        "movie": movie,
    })))
}
