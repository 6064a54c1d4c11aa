//! User-facing texts.

use aibot_core::ProviderId;
use llm_providers::ProviderError;

/// Telegram's message length limit, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

pub const DEFAULT_THINKING_MESSAGE: &str = "Thinking...";
pub const CHOOSE_AI: &str = "Choose an AI:";
pub const CHOOSE_ANOTHER_AI: &str = "Choose another AI:";
pub const CHOOSE_AI_FIRST: &str = "Choose an AI first!";
pub const EMPTY_PROMPT: &str = "Send me some text and I'll pass it on.";
pub const STILL_WORKING: &str = "Still working on your previous request, please wait.";
pub const UNKNOWN_PROVIDER: &str = "That AI is unavailable.";
pub const COPIED: &str = "Copied!";
pub const NOTHING_TO_COPY: &str = "Nothing to copy";
pub const HELP: &str = "Commands:\n/start - choose an AI\n/help - show this help\n\n\
Pick an AI from the menu, then send your question as a normal message.";

pub fn provider_selected(id: ProviderId) -> String {
    format!("{} selected! Write your query:", header(id))
}

pub fn provider_unavailable(id: ProviderId) -> String {
    format!("{} is unavailable.", id.display_name())
}

pub fn category_title(label: &str) -> String {
    format!("{}:", label)
}

pub fn response(id: ProviderId, text: &str) -> String {
    truncate(&format!("{}\n\n{}", header(id), text))
}

pub fn provider_failed(error: &ProviderError) -> String {
    truncate(&format!("{}\n\nError: {}", header(error.provider()), error))
}

fn header(id: ProviderId) -> String {
    id.display_name().to_uppercase()
}

/// Caps `text` at [`MAX_MESSAGE_CHARS`], ending in `…` when cut.
pub fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello"), "hello");
    }

    #[test]
    fn test_truncate_long_text_counts_chars() {
        let long = "ж".repeat(MAX_MESSAGE_CHARS + 10);
        let out = truncate(&long);
        assert_eq!(out.chars().count(), MAX_MESSAGE_CHARS);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_provider_failed_names_provider_and_cause() {
        let text = provider_failed(&ProviderError::InvocationFailure {
            provider: ProviderId::Grok,
            cause: "timed out".to_string(),
        });
        assert!(text.starts_with("GROK"));
        assert!(text.contains("Grok request failed: timed out"));
    }
}
