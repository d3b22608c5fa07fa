use serde::{Deserialize, Serialize};
use std::env;

/// Process-wide configuration, built once at startup and handed to the
/// router state. Request handling never reads the environment directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub store: StoreConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC secret for signing tokens. Empty means token issuance fails.
    pub jwt_secret: String,
    /// Token lifetime in seconds from issuance.
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum number of actors a movie must carry on any write that
    /// sets the actor list. Business policy, not a domain invariant.
    pub min_actors: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 8080,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_ttl_secs: 3600,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: None,
                max_connections: 5,
            },
            validation: ValidationConfig { min_actors: 3 },
        }
    }
}

impl AppConfig {
    /// Build configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BIND_ADDRESS") {
            self.server.bind = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_TTL_SECS") {
            self.security.token_ttl_secs = v.parse().unwrap_or(self.security.token_ttl_secs);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            self.store.database_url = Some(v);
        }
        self.store.backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("postgres") | Ok("pg") => StoreBackend::Postgres,
            Ok("memory") | Ok("mem") => StoreBackend::Memory,
            // Unset: follow DATABASE_URL if present
            _ if self.store.database_url.is_some() => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };
        if let Ok(v) = env::var("STORE_MAX_CONNECTIONS") {
            self.store.max_connections = v.parse().unwrap_or(self.store.max_connections);
        }

        if let Ok(v) = env::var("MIN_ACTORS") {
            self.validation.min_actors = v.parse().unwrap_or(self.validation.min_actors);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_memory_backed() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.token_ttl_secs, 3600);
        assert_eq!(config.validation.min_actors, 3);
    }

    #[test]
    fn default_secret_is_empty_until_configured() {
        let config = AppConfig::default();
        assert!(config.security.jwt_secret.is_empty());
    }
}
