//! Record persistence. The stores are external collaborators reached
//! through narrow traits so backends can be swapped: Postgres for
//! deployments, an in-process store for tests and local runs.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod models;
pub mod postgres;

pub use models::{Movie, MoviePatch, NewMovie, NewUser, User};

/// Errors surfaced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write; carries the field name
    #[error("duplicate {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persists user credentials. Username uniqueness is the store's
/// invariant; password hashing happens before a record gets here.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Returns the full record including the password hash.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Persists movie records. Title is the external lookup key; uniqueness
/// is not enforced, so title operations act on the first match.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;

    async fn create(&self, new_movie: NewMovie) -> Result<Movie, StoreError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError>;

    /// Applies a partial or full field replace; `None` when the title is
    /// unknown.
    async fn update_by_title(
        &self,
        title: &str,
        patch: MoviePatch,
    ) -> Result<Option<Movie>, StoreError>;

    /// Returns `false` when the title is unknown.
    async fn delete_by_title(&self, title: &str) -> Result<bool, StoreError>;
}
