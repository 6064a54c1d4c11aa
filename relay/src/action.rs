//! Button action ids (Telegram callback data) and their decoding.

use aibot_core::{ProviderCategory, ProviderId};

const SELECT_PREFIX: &str = "ai_";
const CATEGORY_PREFIX: &str = "category_";
const REDIRECT: &str = "redirect_main";
const COPY: &str = "copy_response";
const BACK_MAIN: &str = "back_main";

/// What a pressed button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `ai_<id>` with a known id.
    SelectProvider(ProviderId),
    /// `ai_<id>` with an id this bot does not know.
    UnknownProvider(String),
    /// `category_<x>`.
    ShowCategory(ProviderCategory),
    /// `redirect_main`: drop the selection and pick again.
    Redirect,
    /// `copy_response`.
    Copy,
    /// `back_main`: main menu, session untouched.
    BackToMain,
    /// Anything else, kept verbatim for logs.
    Unknown(String),
}

impl Action {
    pub fn decode(data: &str) -> Self {
        match data {
            REDIRECT => return Action::Redirect,
            COPY => return Action::Copy,
            BACK_MAIN => return Action::BackToMain,
            _ => {}
        }
        if let Some(tag) = data.strip_prefix(SELECT_PREFIX) {
            return match tag.parse::<ProviderId>() {
                Ok(id) => Action::SelectProvider(id),
                Err(_) => Action::UnknownProvider(tag.to_string()),
            };
        }
        if let Some(tag) = data.strip_prefix(CATEGORY_PREFIX) {
            if let Ok(category) = tag.parse::<ProviderCategory>() {
                return Action::ShowCategory(category);
            }
        }
        Action::Unknown(data.to_string())
    }

    pub fn encode(&self) -> String {
        match self {
            Action::SelectProvider(id) => format!("{}{}", SELECT_PREFIX, id.as_str()),
            Action::UnknownProvider(tag) => format!("{}{}", SELECT_PREFIX, tag),
            Action::ShowCategory(category) => format!("{}{}", CATEGORY_PREFIX, category.as_str()),
            Action::Redirect => REDIRECT.to_string(),
            Action::Copy => COPY.to_string(),
            Action::BackToMain => BACK_MAIN.to_string(),
            Action::Unknown(data) => data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_actions() {
        assert_eq!(Action::decode("ai_chatgpt"), Action::SelectProvider(ProviderId::ChatGpt));
        assert_eq!(Action::decode("ai_perplexity"), Action::SelectProvider(ProviderId::Perplexity));
        assert_eq!(Action::decode("redirect_main"), Action::Redirect);
        assert_eq!(Action::decode("copy_response"), Action::Copy);
        assert_eq!(Action::decode("back_main"), Action::BackToMain);
        assert_eq!(
            Action::decode("category_search"),
            Action::ShowCategory(ProviderCategory::Search)
        );
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(
            Action::decode("ai_claude"),
            Action::UnknownProvider("claude".to_string())
        );
        assert_eq!(Action::decode("category_games"), Action::Unknown("category_games".to_string()));
        assert_eq!(Action::decode(""), Action::Unknown(String::new()));
    }

    #[test]
    fn test_encode_matches_callback_data() {
        assert_eq!(Action::SelectProvider(ProviderId::Grok).encode(), "ai_grok");
        assert_eq!(Action::ShowCategory(ProviderCategory::Simulated).encode(), "category_simulated");
        for id in ProviderId::ALL {
            let action = Action::SelectProvider(id);
            assert_eq!(Action::decode(&action.encode()), action);
        }
    }
}
