//! Error types for metadata provider access.

use thiserror::Error;

/// Errors that can occur while talking to a metadata provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error from {provider}: {message}")]
    Http { provider: String, message: String },

    /// The provider returned a rate-limit response.
    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    /// Credentials were rejected or a token could not be obtained.
    #[error("authentication with {provider} failed: {message}")]
    Auth { provider: String, message: String },

    /// No client id/secret were configured.
    #[error("missing credentials for {provider}; set them in the config file or environment")]
    MissingCredentials { provider: String },

    /// The requested entity does not exist at the provider.
    #[error("not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    /// A response could not be parsed.
    #[error("parse error from {provider}: {message}")]
    Parse { provider: String, message: String },

    /// The request did not complete within the configured timeout.
    #[error("request to {provider} timed out")]
    Timeout { provider: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl ProviderError {
    pub(crate) fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns `true` when the query track, artist or song could not be
    /// found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the provider itself could not be reached or
    /// refused to serve the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::RateLimited { .. }
                | Self::Auth { .. }
                | Self::MissingCredentials { .. }
                | Self::Parse { .. }
                | Self::Timeout { .. }
                | Self::Request(_)
        )
    }
}

/// Convenience alias for provider results.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
