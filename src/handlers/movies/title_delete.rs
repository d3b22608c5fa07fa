use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::server::AppState;

/// DELETE /movies/:title - remove the first movie matching the title.
pub async fn title_delete(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.movies.delete_by_title(&title).await?;

    if !deleted {
        return Err(ApiError::not_found("Movie not found."));
    }

    Ok(Json(json!({
        "success": true,
        "msg": "Movie deleted.",
    })))
}
