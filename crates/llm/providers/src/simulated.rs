//! Constant-reply [`Provider`] used for providers the bot lists without live access.

use aibot_core::ProviderId;
use anyhow::Result;
use async_trait::async_trait;

use super::Provider;

/// Returns the same canned reply for every prompt; never touches the network.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    reply: String,
}

impl SimulatedProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }

    /// Default canned reply naming the provider.
    pub fn for_provider(id: ProviderId) -> Self {
        Self::new(format!(
            "[simulated {}] Live access to {} is not set up on this bot. This is a canned reply.",
            id.display_name(),
            id.display_name()
        ))
    }
}

#[async_trait]
impl Provider for SimulatedProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}
