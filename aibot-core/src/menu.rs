//! Transport-agnostic inline menu: rows of (label, action id) buttons.

use serde::{Deserialize, Serialize};

/// One selectable option. `action` is the opaque identifier sent back when the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub label: String,
    pub action: String,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Ordered button layout. Each inner vec is rendered as one keyboard row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row; empty rows are dropped.
    pub fn row(mut self, buttons: Vec<MenuButton>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Appends a row with a single button.
    pub fn button(self, label: impl Into<String>, action: impl Into<String>) -> Self {
        self.row(vec![MenuButton::new(label, action)])
    }

    /// All buttons in reading order (row by row).
    pub fn buttons(&self) -> impl Iterator<Item = &MenuButton> {
        self.rows.iter().flatten()
    }

    /// Action ids in reading order.
    pub fn actions(&self) -> Vec<&str> {
        self.buttons().map(|b| b.action.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
