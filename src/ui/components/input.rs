//! Dropdown input surfaces.
//!
//! The trigger is the always-visible box showing the selection or the
//! placeholder. The search field sits at the top of the open panel; its text
//! is owned by the dropdown state and only drawn here.

use gpui::{
    div, prelude::*, px, App, ClickEvent, ElementId, IntoElement, ParentElement, RenderOnce,
    SharedString, Styled, Window,
};

use crate::ui::theme::ThemeColors;

pub(crate) type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

/// Input size options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputSize {
    /// 28px high.
    Small,
    /// 32px high.
    #[default]
    Medium,
    /// 40px high.
    Large,
}

impl InputSize {
    pub fn height(self) -> f32 {
        match self {
            InputSize::Small => 28.0,
            InputSize::Medium => 32.0,
            InputSize::Large => 40.0,
        }
    }
}

/// The clickable box of a dropdown.
#[derive(IntoElement)]
pub struct SelectTrigger {
    id: ElementId,
    text: SharedString,
    placeholder: bool,
    open: bool,
    disabled: bool,
    size: InputSize,
    colors: ThemeColors,
    on_click: Option<ClickHandler>,
}

impl SelectTrigger {
    pub fn new(id: impl Into<ElementId>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            text: SharedString::default(),
            placeholder: true,
            open: false,
            disabled: false,
            size: InputSize::Medium,
            colors,
            on_click: None,
        }
    }

    /// Sets the shown text and whether it is the placeholder.
    pub fn text(mut self, text: impl Into<SharedString>, placeholder: bool) -> Self {
        self.text = text.into();
        self.placeholder = placeholder;
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for SelectTrigger {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let colors = self.colors;
        let border_color = if self.open {
            colors.border_focused
        } else {
            colors.border
        };
        let text_color = if self.placeholder {
            colors.text_muted
        } else {
            colors.text_primary
        };
        let opacity = if self.disabled { 0.5 } else { 1.0 };
        let hover_bg = colors.surface_hover;
        let on_click = if self.disabled { None } else { self.on_click };

        div()
            .id(self.id)
            .h(px(self.size.height()))
            .w_full()
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_between()
            .gap(px(8.0))
            .bg(colors.surface)
            .border_1()
            .border_color(border_color)
            .rounded(px(6.0))
            .opacity(opacity)
            .when(!self.disabled, |d| {
                d.cursor_pointer().hover(move |d| d.bg(hover_bg))
            })
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .text_sm()
                    .text_color(text_color)
                    .child(self.text),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(colors.text_muted)
                    .child(if self.open { "^" } else { "v" }),
            )
            .when_some(on_click, |d, handler| d.on_click(handler))
    }
}

/// The search box at the top of an open panel.
#[derive(IntoElement)]
pub struct SearchField {
    id: ElementId,
    text: SharedString,
    cursor: usize,
    placeholder: SharedString,
    focused: bool,
    disabled: bool,
    colors: ThemeColors,
}

impl SearchField {
    pub fn new(id: impl Into<ElementId>, colors: ThemeColors) -> Self {
        Self {
            id: id.into(),
            text: SharedString::default(),
            cursor: 0,
            placeholder: SharedString::from("Search..."),
            focused: false,
            disabled: false,
            colors,
        }
    }

    /// Sets the text and the cursor byte offset.
    pub fn value(mut self, text: impl Into<SharedString>, cursor: usize) -> Self {
        self.text = text.into();
        self.cursor = cursor.min(self.text.len());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn split_at_cursor(&self) -> (SharedString, SharedString) {
        let (before, after) = self.text.split_at(self.cursor);
        (
            SharedString::from(before.to_string()),
            SharedString::from(after.to_string()),
        )
    }
}

impl RenderOnce for SearchField {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let colors = self.colors;
        let show_caret = self.focused && !self.disabled;
        let opacity = if self.disabled { 0.5 } else { 1.0 };
        let (before, after) = self.split_at_cursor();
        let is_empty = self.text.is_empty();

        div()
            .id(self.id)
            .h(px(32.0))
            .mx(px(6.0))
            .mt(px(6.0))
            .px(px(10.0))
            .flex()
            .items_center()
            .bg(colors.background)
            .border_1()
            .border_color(if show_caret {
                colors.border_focused
            } else {
                colors.border
            })
            .rounded(px(4.0))
            .text_sm()
            .opacity(opacity)
            .cursor_text()
            .when(is_empty, |d| {
                d.when(show_caret, |d| d.child(caret(colors)))
                    .child(div().text_color(colors.text_muted).child(self.placeholder))
            })
            .when(!is_empty, |d| {
                d.text_color(colors.text_primary)
                    .child(before)
                    .when(show_caret, |d| d.child(caret(colors)))
                    .child(after)
            })
    }
}

fn caret(colors: ThemeColors) -> impl IntoElement {
    div().w(px(1.0)).h(px(16.0)).bg(colors.accent)
}
