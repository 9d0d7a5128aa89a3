//! Admin API authentication.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlatformError;

/// How the seeder authenticates against the admin API.
#[derive(Clone)]
pub enum AdminCredentials {
    /// A secret API key, sent as HTTP basic auth.
    SecretKey(String),
    /// An admin user, exchanged for a bearer token at connect time.
    EmailPassword { email: String, password: String },
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SecretKey(_) => f.write_str("SecretKey(***)"),
            Self::EmailPassword { email, .. } => f
                .debug_struct("EmailPassword")
                .field("email", email)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Resolved authorization applied to every admin request.
#[derive(Clone)]
pub(crate) enum Authorization {
    Basic(String),
    Bearer(String),
}

impl Authorization {
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic(key) => request.basic_auth(key, None::<&str>),
            Self::Bearer(token) => request.bearer_auth(token),
        }
    }
}

#[derive(Serialize)]
struct EmailPassBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Turn credentials into a request authorization, logging in if needed.
pub(crate) async fn authorize(
    client: &reqwest::Client,
    base_url: &str,
    credentials: AdminCredentials,
) -> Result<Authorization, PlatformError> {
    match credentials {
        AdminCredentials::SecretKey(key) => {
            if key.trim().is_empty() {
                return Err(PlatformError::Auth("secret API key is empty".to_string()));
            }
            Ok(Authorization::Basic(key))
        }
        AdminCredentials::EmailPassword { email, password } => {
            let url = format!("{}/auth/user/emailpass", base_url);
            debug!(%url, %email, "logging in to admin API");

            let response = client
                .post(&url)
                .json(&EmailPassBody {
                    email: &email,
                    password: &password,
                })
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(PlatformError::Auth(format!(
                    "login for {} failed with status {}",
                    email,
                    status.as_u16()
                )));
            }

            let body: TokenResponse = response.json().await?;
            Ok(Authorization::Bearer(body.token))
        }
    }
}
