//! UI components and views
//!
//! The UI is organized into:
//! - `theme`: Color schemes and styling
//! - `components`: Dropdown trigger, search field and option rows
//! - `views`: The inventory filter window

pub mod components;
pub mod theme;
pub mod views;

pub use theme::{Theme, ThemeColors, ThemeMode};
pub use views::FilterPanel;
