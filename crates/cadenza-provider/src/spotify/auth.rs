//! Client-credentials authentication against the Spotify accounts service.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::error::{ProviderError, ProviderResult};
use crate::spotify::models::{TokenErrorResponse, TokenResponse};
use crate::spotify::{transport_error, PROVIDER_NAME};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens are refreshed this long before Spotify says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Application credentials for the client-credentials flow.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// An `expires_in` too large to represent yields an already-expired
    /// token.
    fn from_response(response: TokenResponse, now: Instant) -> Self {
        Self {
            value: response.access_token,
            expires_at: now
                .checked_add(Duration::from_secs(response.expires_in))
                .unwrap_or(now),
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now.checked_add(EXPIRY_MARGIN)
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

/// Caches the bearer token and fetches a new one when it runs out.
#[derive(Debug)]
pub(crate) struct TokenCache {
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: Mutex::new(None),
        }
    }

    /// A bearer token valid for at least [`EXPIRY_MARGIN`].
    pub async fn bearer(&self, http: &Client) -> ProviderResult<String> {
        let mut guard = self.token.lock().await;
        let now = Instant::now();

        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        log::debug!("Requesting new {} access token", PROVIDER_NAME);
        let token = self.request_token(http).await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    /// Forget the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    async fn request_token(&self, http: &Client) -> ProviderResult<AccessToken> {
        let response = http
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<TokenErrorResponse>().await {
                Ok(body) => body.error_description.unwrap_or(body.error),
                Err(_) => status.to_string(),
            };
            return Err(ProviderError::Auth {
                provider: PROVIDER_NAME.to_string(),
                message,
            });
        }

        let body: TokenResponse = response.json().await.map_err(|e| ProviderError::Parse {
            provider: PROVIDER_NAME.to_string(),
            message: e.to_string(),
        })?;

        Ok(AccessToken::from_response(body, Instant::now()))
    }
}
