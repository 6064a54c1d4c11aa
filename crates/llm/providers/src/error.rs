use aibot_core::ProviderId;
use thiserror::Error;

/// Failure of a provider invocation. Always names the provider; `Display` is user-presentable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Credential was absent at startup; the provider stays unavailable for the process lifetime.
    #[error("{provider} is not configured")]
    ConfigurationMissing { provider: ProviderId },

    /// Network, HTTP status, malformed or empty response.
    #[error("{provider} request failed: {cause}")]
    InvocationFailure { provider: ProviderId, cause: String },
}

impl ProviderError {
    pub fn provider(&self) -> ProviderId {
        match self {
            ProviderError::ConfigurationMissing { provider }
            | ProviderError::InvocationFailure { provider, .. } => *provider,
        }
    }
}
