//! Color themes.

use gpui::{rgba, Rgba};
use serde::{Deserialize, Serialize};

/// Theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Named colors used by the components.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub background: Rgba,
    pub surface: Rgba,
    pub surface_hover: Rgba,
    pub border: Rgba,
    pub border_focused: Rgba,
    pub text_primary: Rgba,
    pub text_secondary: Rgba,
    pub text_muted: Rgba,
    pub accent: Rgba,
    pub accent_subtle: Rgba,
    pub overlay: Rgba,
    pub error: Rgba,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            background: rgba(0x09090BFF),
            surface: rgba(0x18181BFF),
            surface_hover: rgba(0x27272AFF),
            border: rgba(0x3F3F46FF),
            border_focused: rgba(0x3B82F6FF),
            text_primary: rgba(0xE4E4E7FF),
            text_secondary: rgba(0xA1A1AAFF),
            text_muted: rgba(0x71717AFF),
            accent: rgba(0x3B82F6FF),
            accent_subtle: rgba(0x3B82F620),
            overlay: rgba(0x00000080),
            error: rgba(0xEF4444FF),
        }
    }

    pub fn light() -> Self {
        Self {
            background: rgba(0xF4F4F5FF),
            surface: rgba(0xFFFFFFFF),
            surface_hover: rgba(0xF4F4F5FF),
            border: rgba(0xD4D4D8FF),
            border_focused: rgba(0x2563EBFF),
            text_primary: rgba(0x18181BFF),
            text_secondary: rgba(0x52525BFF),
            text_muted: rgba(0xA1A1AAFF),
            accent: rgba(0x2563EBFF),
            accent_subtle: rgba(0x2563EB1A),
            overlay: rgba(0x00000059),
            error: rgba(0xDC2626FF),
        }
    }
}

/// Active theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let colors = match mode {
            ThemeMode::Dark => ThemeColors::dark(),
            ThemeMode::Light => ThemeColors::light(),
        };
        Self { mode, colors }
    }

    pub fn dark() -> Self {
        Self::new(ThemeMode::Dark)
    }

    /// Switches between dark and light.
    pub fn toggled(self) -> Self {
        match self.mode {
            ThemeMode::Dark => Self::new(ThemeMode::Light),
            ThemeMode::Light => Self::new(ThemeMode::Dark),
        }
    }
}
