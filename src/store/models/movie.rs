use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored movie record. JSON field names follow the wire format the
/// clients already speak (camelCase). The release date is an opaque
/// string: the API round-trips whatever the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub release_date: String,
    pub genre: String,
    /// Ordered cast list
    pub actors: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a movie about to be created; the store stamps id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub release_date: String,
    pub genre: String,
    pub actors: Vec<String>,
}

/// Partial update: only the present fields replace their counterparts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<Vec<String>>,
}

impl MoviePatch {
    pub fn apply(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(release_date) = &self.release_date {
            movie.release_date = release_date.clone();
        }
        if let Some(genre) = &self.genre {
            movie.genre = genre.clone();
        }
        if let Some(actors) = &self.actors {
            movie.actors = actors.clone();
        }
    }
}
