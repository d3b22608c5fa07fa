use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::server::AppState;
use crate::store::Movie;

/// GET /movies/:title - fetch a single movie by title.
pub async fn title_get(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state
        .movies
        .find_by_title(&title)
        .await?
        .ok_or_else(|| ApiError::not_found("Movie not found."))?;

    Ok(Json(movie))
}
