//! Application views.

mod filter_panel;

pub use filter_panel::{page_markup, ButtonAction, FilterPanel};
