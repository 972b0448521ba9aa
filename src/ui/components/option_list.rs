//! Rows of an open dropdown panel.

use gpui::{
    div, prelude::*, px, App, ElementId, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, Window,
};

use crate::ui::components::input::ClickHandler;
use crate::ui::theme::ThemeColors;

/// One option row.
#[derive(IntoElement)]
pub struct OptionItem {
    id: ElementId,
    label: SharedString,
    selected: bool,
    highlighted: bool,
    disabled: bool,
    colors: ThemeColors,
    on_click: Option<ClickHandler>,
}

impl OptionItem {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            selected: false,
            highlighted: false,
            disabled: false,
            colors,
            on_click: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Disabled rows are drawn but get no click handler.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&gpui::ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    fn is_clickable(&self) -> bool {
        !self.disabled && self.on_click.is_some()
    }
}

impl RenderOnce for OptionItem {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let colors = self.colors;
        let clickable = self.is_clickable();
        let hover_bg = colors.surface_hover;
        let text_color = if self.disabled {
            colors.text_muted
        } else if self.selected {
            colors.accent
        } else {
            colors.text_primary
        };
        let on_click = if self.disabled { None } else { self.on_click };

        div()
            .id(self.id)
            .h(px(32.0))
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_between()
            .text_sm()
            .text_color(text_color)
            .when(self.disabled, |d| d.opacity(0.5))
            .when(self.highlighted, |d| d.bg(colors.accent_subtle))
            .when(clickable, |d| d.cursor_pointer().hover(move |d| d.bg(hover_bg)))
            .child(self.label)
            .when(self.selected, |d| {
                d.child(div().text_xs().text_color(colors.accent).child("selected"))
            })
            .when_some(on_click, |d, handler| d.on_click(handler))
    }
}

/// The single inert row shown when nothing matches.
#[derive(IntoElement)]
pub struct NoResultsRow {
    text: SharedString,
    colors: ThemeColors,
}

impl NoResultsRow {
    pub fn new(text: impl Into<SharedString>, colors: ThemeColors) -> Self {
        Self {
            text: text.into(),
            colors,
        }
    }
}

impl RenderOnce for NoResultsRow {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .px(px(12.0))
            .py(px(10.0))
            .text_sm()
            .text_center()
            .text_color(self.colors.text_muted)
            .child(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_row_is_not_clickable() {
        let row = OptionItem::new("opt-0", "Gudang Lama", ThemeColors::dark())
            .disabled(true)
            .on_click(|_, _, _| {});
        assert!(!row.is_clickable());
    }

    #[test]
    fn enabled_row_with_handler_is_clickable() {
        let row = OptionItem::new("opt-1", "Gudang Baru", ThemeColors::dark())
            .selected(true)
            .highlighted(true)
            .on_click(|_, _, _| {});
        assert!(row.is_clickable());
        assert!(row.selected);
        assert!(row.highlighted);
    }
}
