//! Selectable dropdown entries.

use serde::{Deserialize, Serialize};

/// One selectable entry in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Key handed back to the host.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
    /// Rendered but never selectable.
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    /// Creates an enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Marks the option as disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns whether this option can be picked.
    pub fn is_selectable(&self) -> bool {
        !self.disabled
    }
}
