//! Postgres store backend over sqlx. The pool is built once at startup
//! from `DATABASE_URL`; the schema migration is idempotent and runs
//! before the server starts accepting requests.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use super::{Movie, MoviePatch, MovieStore, NewMovie, NewUser, StoreError, User, UserStore};

const USER_COLUMNS: &str = "id, name, username, password_hash, created_at";
const MOVIE_COLUMNS: &str = "id, title, release_date, genre, actors, created_at, updated_at";

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        username TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS users_username_key ON users (username)",
    "CREATE TABLE IF NOT EXISTS movies (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        release_date TEXT NOT NULL,
        genre TEXT NOT NULL,
        actors TEXT[] NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS movies_title_idx ON movies (title)",
];

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("connected to postgres store");
        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, name, username, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&new_user.name)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::Duplicate("username".to_string())
                }
                other => StoreError::Sqlx(other),
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies");

        let movies = sqlx::query_as::<_, Movie>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(movies)
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie, StoreError> {
        let query = format!(
            "INSERT INTO movies (id, title, release_date, genre, actors)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MOVIE_COLUMNS}"
        );

        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(Uuid::new_v4())
            .bind(&new_movie.title)
            .bind(&new_movie.release_date)
            .bind(&new_movie.genre)
            .bind(&new_movie.actors)
            .fetch_one(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        // Titles are not unique; act on the oldest match
        let query = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies
             WHERE title = $1
             ORDER BY created_at
             LIMIT 1"
        );

        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn update_by_title(
        &self,
        title: &str,
        patch: MoviePatch,
    ) -> Result<Option<Movie>, StoreError> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                release_date = COALESCE($3, release_date),
                genre = COALESCE($4, genre),
                actors = COALESCE($5, actors),
                updated_at = now()
             WHERE id = (
                SELECT id FROM movies WHERE title = $1 ORDER BY created_at LIMIT 1
             )
             RETURNING {MOVIE_COLUMNS}"
        );

        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(title)
            .bind(patch.title)
            .bind(patch.release_date)
            .bind(patch.genre)
            .bind(patch.actors)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movie)
    }

    async fn delete_by_title(&self, title: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM movies
             WHERE id = (
                SELECT id FROM movies WHERE title = $1 ORDER BY created_at LIMIT 1
             )",
        )
        .bind(title)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
