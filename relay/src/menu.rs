//! Menu builder: named menus rendered from the provider catalog.

use aibot_core::{Menu, MenuButton, ProviderCategory};
use llm_providers::ProviderInfo;

use crate::action::Action;

pub const ANOTHER_AI_LABEL: &str = "Another AI";
pub const COPY_LABEL: &str = "Copy";
pub const MENU_LABEL: &str = "Menu";
pub const BACK_LABEL: &str = "« Menu";

/// Which menu to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuName {
    Main,
    Category(ProviderCategory),
    PostResponse,
}

impl MenuName {
    /// `main`, `post_response` or `category:<x>`. Anything else is `Main`.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "main" => MenuName::Main,
            "post_response" => MenuName::PostResponse,
            other => other
                .strip_prefix("category:")
                .and_then(|c| c.parse::<ProviderCategory>().ok())
                .map(MenuName::Category)
                .unwrap_or(MenuName::Main),
        }
    }

    pub fn name(&self) -> String {
        match self {
            MenuName::Main => "main".to_string(),
            MenuName::Category(category) => format!("category:{}", category.as_str()),
            MenuName::PostResponse => "post_response".to_string(),
        }
    }
}

/// Renders `name` against `catalog`. Pure; unavailable providers stay listed so selecting them can explain why.
pub fn build_menu(name: &MenuName, catalog: &[ProviderInfo]) -> Menu {
    match name {
        MenuName::Main => {
            let mut menu = catalog
                .iter()
                .fold(Menu::new(), |menu, info| menu.row(vec![provider_button(info)]));
            let categories: Vec<MenuButton> = ProviderCategory::ALL
                .into_iter()
                .filter(|c| catalog.iter().any(|info| info.category == *c))
                .map(|c| MenuButton::new(c.label(), Action::ShowCategory(c).encode()))
                .collect();
            if categories.len() > 1 {
                menu = menu.row(categories);
            }
            menu
        }
        MenuName::Category(category) => catalog
            .iter()
            .filter(|info| info.category == *category)
            .fold(Menu::new(), |menu, info| menu.row(vec![provider_button(info)]))
            .button(BACK_LABEL, Action::BackToMain.encode()),
        MenuName::PostResponse => Menu::new()
            .button(ANOTHER_AI_LABEL, Action::Redirect.encode())
            .button(COPY_LABEL, Action::Copy.encode())
            .button(MENU_LABEL, Action::BackToMain.encode()),
    }
}

fn provider_button(info: &ProviderInfo) -> MenuButton {
    let label = if info.available {
        info.display_name.to_string()
    } else {
        format!("{} (unavailable)", info.display_name)
    };
    MenuButton::new(label, Action::SelectProvider(info.id).encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aibot_core::ProviderId;

    fn catalog(available: &[ProviderId]) -> Vec<ProviderInfo> {
        ProviderId::ALL
            .into_iter()
            .map(|id| ProviderInfo {
                id,
                display_name: id.display_name(),
                category: id.category(),
                available: available.contains(&id),
            })
            .collect()
    }

    #[test]
    fn test_main_menu_lists_providers_then_categories() {
        let menu = build_menu(&MenuName::Main, &catalog(&[ProviderId::ChatGpt]));

        assert_eq!(menu.rows.len(), ProviderId::ALL.len() + 1);
        assert_eq!(menu.rows[0][0].label, "ChatGPT");
        assert_eq!(menu.rows[0][0].action, "ai_chatgpt");
        assert_eq!(menu.rows[1][0].label, "Grok (unavailable)");
        assert_eq!(
            menu.rows.last().unwrap().iter().map(|b| b.action.as_str()).collect::<Vec<_>>(),
            vec!["category_assistant", "category_search", "category_simulated"]
        );
    }

    #[test]
    fn test_category_menu_filters_and_ends_with_back() {
        let menu = build_menu(
            &MenuName::Category(ProviderCategory::Simulated),
            &catalog(&ProviderId::ALL),
        );
        assert_eq!(menu.actions(), vec!["ai_mistral", "ai_deepseek", "back_main"]);
    }

    #[test]
    fn test_post_response_menu() {
        let menu = build_menu(&MenuName::PostResponse, &[]);
        assert_eq!(menu.actions(), vec!["redirect_main", "copy_response", "back_main"]);
        assert_eq!(menu.rows.len(), 3);
    }

    #[test]
    fn test_parse_falls_back_to_main() {
        assert_eq!(MenuName::parse("post_response"), MenuName::PostResponse);
        assert_eq!(
            MenuName::parse("category:search"),
            MenuName::Category(ProviderCategory::Search)
        );
        assert_eq!(MenuName::parse("category:games"), MenuName::Main);
        assert_eq!(MenuName::parse("settings"), MenuName::Main);
        assert_eq!(MenuName::parse(&MenuName::PostResponse.name()), MenuName::PostResponse);
    }
}
