//! In-process store backend. Backs the test suite and
//! `STORE_BACKEND=memory` runs; state lives for the life of the process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Movie, MoviePatch, MovieStore, NewMovie, NewUser, StoreError, User, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    // Keyed by username, which enforces the uniqueness constraint
    users: RwLock<HashMap<String, User>>,
    // Insertion order preserved so title lookups mirror first-match
    // semantics of the document store
    movies: RwLock<Vec<Movie>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&new_user.username) {
            return Err(StoreError::Duplicate("username".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            username: new_user.username.clone(),
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(new_user.username, user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies.clone())
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie, StoreError> {
        let now = Utc::now();
        let movie = Movie {
            id: Uuid::new_v4(),
            title: new_movie.title,
            release_date: new_movie.release_date,
            genre: new_movie.genre,
            actors: new_movie.actors,
            created_at: now,
            updated_at: now,
        };

        let mut movies = self.movies.write().await;
        movies.push(movie.clone());

        Ok(movie)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, StoreError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn update_by_title(
        &self,
        title: &str,
        patch: MoviePatch,
    ) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.movies.write().await;

        match movies.iter_mut().find(|m| m.title == title) {
            Some(movie) => {
                patch.apply(movie);
                movie.updated_at = Utc::now();
                Ok(Some(movie.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_title(&self, title: &str) -> Result<bool, StoreError> {
        let mut movies = self.movies.write().await;

        match movies.iter().position(|m| m.title == title) {
            Some(index) => {
                movies.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            username: username.to_string(),
            password_hash: "$2b$04$fakehash".to_string(),
        }
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            release_date: "2001-12-19".to_string(),
            genre: "Fantasy".to_string(),
            actors: vec![
                "Elijah Wood".to_string(),
                "Ian McKellen".to_string(),
                "Viggo Mortensen".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn create_user_then_find() {
        let store = MemoryStore::new();
        let created = UserStore::create(&store, new_user("frodo")).await.unwrap();

        let found = store.find_by_username("frodo").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$2b$04$fakehash");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("frodo")).await.unwrap();

        let err = UserStore::create(&store, new_user("frodo")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn unknown_username_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn movie_crud_round_trip() {
        let store = MemoryStore::new();
        let created = MovieStore::create(&store, new_movie("Fellowship")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);

        let found = store.find_by_title("Fellowship").await.unwrap().unwrap();
        assert_eq!(found, created);

        assert!(store.delete_by_title("Fellowship").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() {
        let store = MemoryStore::new();
        MovieStore::create(&store, new_movie("Fellowship")).await.unwrap();

        let patch = MoviePatch {
            genre: Some("Adventure".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_by_title("Fellowship", patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.genre, "Adventure");
        assert_eq!(updated.release_date, "2001-12-19");
        assert_eq!(updated.actors.len(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_title() {
        let store = MemoryStore::new();

        let updated = store
            .update_by_title("Nothing", MoviePatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());

        assert!(!store.delete_by_title("Nothing").await.unwrap());
    }

    #[tokio::test]
    async fn find_by_title_returns_first_match() {
        let store = MemoryStore::new();
        let first = MovieStore::create(&store, new_movie("Dune")).await.unwrap();
        MovieStore::create(&store, new_movie("Dune")).await.unwrap();

        let found = store.find_by_title("Dune").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }
}
