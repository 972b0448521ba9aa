//! Application lifecycle.
//!
//! This module contains:
//! - Option data loading (data.rs)
//! - Action definitions (inline via gpui::actions!)
//! - Keybinding registration

pub mod data;

pub use data::{sample_source, FilterData};

use anyhow::Result;
use gpui::{actions, AppContext, Application, KeyBinding, WindowOptions};

use crate::config::AppConfig;
use crate::source::HttpSource;
use crate::ui::FilterPanel;

actions!(
    inventory,
    [Quit, Dismiss, ToggleTheme, SubmitFilters, OpenTransfer]
);

/// Loads dropdown data from the configured API, or the built-in sample.
pub async fn load_filter_data(config: &AppConfig) -> FilterData {
    if let Some(base) = config.api_base.as_deref() {
        let source = HttpSource::new(base);
        match FilterData::load(&source).await {
            Ok(data) => return data,
            Err(err) => tracing::warn!("Falling back to sample data: {}", err),
        }
    }
    match FilterData::load(&sample_source()).await {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("Sample data failed to load: {}", err);
            FilterData::default()
        }
    }
}

/// Main application entry point
pub struct App;

impl App {
    pub fn run(config: AppConfig, data: FilterData) -> Result<()> {
        Application::new().run(move |cx: &mut gpui::App| {
            Self::register_keybindings(cx);
            cx.on_action(|_: &Quit, cx| cx.quit());

            let opened = cx.open_window(WindowOptions::default(), |window, cx| {
                cx.new(|cx| FilterPanel::new(&config, data, window, cx))
            });
            if let Err(err) = opened {
                tracing::error!("Failed to open window: {}", err);
                cx.quit();
            }
        });

        Ok(())
    }

    fn register_keybindings(cx: &mut gpui::App) {
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("escape", Dismiss, None),
            KeyBinding::new("cmd-enter", SubmitFilters, None),
            KeyBinding::new("cmd-t", OpenTransfer, None),
            KeyBinding::new("cmd-shift-l", ToggleTheme, None),
        ]);
    }
}
