use serde::Deserialize;

use crate::error::ApiError;

/// Create body. Required fields arrive as options so that missing input
/// maps to a 400 instead of a body-rejection error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub actors: Option<Vec<String>>,
}

/// Validation policy for the cast list, applied to every write that sets
/// it. The minimum comes from configuration.
pub fn enforce_actor_minimum(actors: &[String], min_actors: usize) -> Result<(), ApiError> {
    if actors.len() < min_actors {
        return Err(ApiError::bad_request(format!(
            "Must include at least {min_actors} actors."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_minimum_rejects_short_casts() {
        let actors = vec!["One".to_string(), "Two".to_string()];
        assert!(enforce_actor_minimum(&actors, 3).is_err());
    }

    #[test]
    fn actor_minimum_accepts_exact_count() {
        let actors = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        assert!(enforce_actor_minimum(&actors, 3).is_ok());
    }

    #[test]
    fn actor_minimum_is_policy_driven() {
        let actors = vec!["One".to_string()];
        assert!(enforce_actor_minimum(&actors, 1).is_ok());
        assert!(enforce_actor_minimum(&actors, 0).is_ok());
    }
}
