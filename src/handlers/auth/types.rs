use serde::Deserialize;

/// Signup body. Fields are optional so that missing input maps to a 400
/// with a helpful message instead of a body-rejection error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Signin body. Missing fields simply fail the credential lookup.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
