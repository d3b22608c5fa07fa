use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::server::AppState;
use crate::store::Movie;

/// GET /movies - list all movies, order unspecified.
pub async fn movies_get(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.movies.list().await?;
    Ok(Json(movies))
}
