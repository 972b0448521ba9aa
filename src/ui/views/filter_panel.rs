//! Inventory filter form.
//!
//! The form is drawn from its page markup: institution, regional and item
//! condition dropdowns, plus a transfer dialog with a destination dropdown.
//! The view owns every dropdown on the page and routes keystrokes to the open
//! one, the same way overlays capture text input elsewhere in the app.

use gpui::{
    anchored, canvas, deferred, div, point, prelude::FluentBuilder, px, AnyElement, Bounds,
    ClickEvent, Context, FocusHandle, Focusable, InteractiveElement, IntoElement, KeyDownEvent,
    MouseDownEvent, ParentElement, Pixels, Render, SharedString, StatefulInteractiveElement,
    Styled, Window,
};

use crate::app::{Dismiss, FilterData, OpenTransfer, SubmitFilters, ToggleTheme};
use crate::config::{AppConfig, DropdownConfig};
use crate::dropdown::{
    DropdownId, DropdownPage, KeyOutcome, Node, OptionRow, PanelPlacement, Rect,
    Role, SearchableDropdown, SelectOption,
};
use crate::form::FormState;
use crate::ui::components::{InputSize, NoResultsRow, OptionItem, SearchField, SelectTrigger};
use crate::ui::theme::Theme;

const INSTITUTION: &str = "institution";
const REGIONAL: &str = "regional";
const STATUS: &str = "status";
const DESTINATION: &str = "destination";
const TRANSFER_DIALOG: &str = "transfer-dialog";

/// What a markup button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ApplyFilters,
    ResetFilters,
    OpenTransfer,
    SubmitTransfer,
    CancelTransfer,
}

impl ButtonAction {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "filters-submit" => Some(ButtonAction::ApplyFilters),
            "filters-reset" => Some(ButtonAction::ResetFilters),
            "transfer-open" => Some(ButtonAction::OpenTransfer),
            "transfer-submit" => Some(ButtonAction::SubmitTransfer),
            "transfer-cancel" => Some(ButtonAction::CancelTransfer),
            _ => None,
        }
    }

    fn is_primary(self) -> bool {
        matches!(
            self,
            ButtonAction::ApplyFilters | ButtonAction::SubmitTransfer
        )
    }
}

fn button(id: &str, text: &str) -> Node {
    Node::new(
        id,
        Role::Button {
            text: text.to_string(),
        },
    )
}

/// Markup of the inventory filter page.
pub fn page_markup() -> Node {
    Node::new("inventory-page", Role::Page)
        .child(Node::new("filters", Role::Form).children([
            Node::select_group(INSTITUTION, "Institution", "institution_id", true),
            Node::select_group(REGIONAL, "Regional", "regional_id", true),
            Node::select_group(STATUS, "Condition", "status", false),
            Node::new("filters-actions", Role::Form).children([
                button("filters-submit", "Apply filters"),
                button("filters-reset", "Reset"),
                button("transfer-open", "Transfer item..."),
            ]),
        ]))
        .child(
            Node::new(TRANSFER_DIALOG, Role::ModalOverlay).child(
                Node::new("transfer-form", Role::Form).children([
                    Node::select_group(DESTINATION, "Destination regional", "to_regional_id", true),
                    Node::new("transfer-actions", Role::Form).children([
                        button("transfer-submit", "Transfer"),
                        button("transfer-cancel", "Cancel"),
                    ]),
                ]),
            ),
        )
}

fn to_rect(bounds: Bounds<Pixels>) -> Rect {
    Rect::new(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}

/// The inventory filter window.
pub struct FilterPanel {
    theme: Theme,
    focus_handle: FocusHandle,
    /// Focus of the open panel's search field.
    search_focus: FocusHandle,
    markup: Node,
    data: FilterData,
    filters: FormState,
    transfer: FormState,
    page: DropdownPage,
    institution: Option<DropdownId>,
    regional: Option<DropdownId>,
    status: Option<DropdownId>,
    destination: Option<DropdownId>,
    transfer_open: bool,
    status_line: Option<String>,
}

impl FilterPanel {
    pub fn new(
        config: &AppConfig,
        data: FilterData,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let focus_handle = cx.focus_handle();
        window.focus(&focus_handle);

        let markup = page_markup();
        let filters = FormState::new();
        let transfer = FormState::new();
        let mut page = DropdownPage::new();

        let mut bind = |id: &str, base: DropdownConfig, form: &FormState| {
            let base = base.on_change({
                let id = id.to_string();
                move |option| tracing::info!("{} changed to {:?}", id, option.map(|o| &o.value))
            });
            match SearchableDropdown::bind(&markup, id, config.dropdown_config(id, base), form) {
                Ok(dropdown) => Some(page.insert(dropdown)),
                Err(err) => {
                    tracing::warn!("Skipping dropdown: {}", err);
                    None
                }
            }
        };

        let institution = bind(
            INSTITUTION,
            DropdownConfig::new().placeholder("All institutions"),
            &filters,
        );
        let regional = bind(
            REGIONAL,
            DropdownConfig::new()
                .placeholder("Choose an institution first")
                .disabled(true),
            &filters,
        );
        let status = bind(
            STATUS,
            DropdownConfig::new()
                .placeholder("Any condition")
                .searchable(false),
            &filters,
        );
        let destination = bind(
            DESTINATION,
            DropdownConfig::new().placeholder("Select regional..."),
            &transfer,
        );

        let mut this = Self {
            theme: Theme::new(config.theme),
            focus_handle,
            search_focus: cx.focus_handle(),
            markup,
            data,
            filters,
            transfer,
            page,
            institution,
            regional,
            status,
            destination,
            transfer_open: false,
            status_line: None,
        };
        this.fill_options();
        this
    }

    fn fill_options(&mut self) {
        let institutions = self.data.institutions.clone();
        let statuses = self.data.statuses.clone();
        let destinations = self.data.all_regionals();
        self.with_dropdown(self.institution, |d| d.set_options(institutions));
        self.with_dropdown(self.status, |d| d.set_options(statuses));
        self.with_dropdown(self.destination, |d| d.set_options(destinations));
    }

    fn with_dropdown(&mut self, id: Option<DropdownId>, f: impl FnOnce(&mut SearchableDropdown)) {
        if let Some(dropdown) = id.and_then(|id| self.page.get_mut(id)) {
            f(dropdown);
        }
    }

    /// Reacts to a user selection.
    fn on_selected(&mut self, id: DropdownId, option: &SelectOption) {
        if Some(id) == self.institution {
            let regionals = self.data.regionals_for(&option.value);
            self.with_dropdown(self.regional, |d| {
                d.set_options(regionals);
                d.clear();
                d.set_disabled(false);
            });
        }
    }

    fn select(&mut self, id: DropdownId, index: usize, cx: &mut Context<Self>) {
        if let Some(option) = self.page.select(id, index) {
            self.on_selected(id, &option);
        }
        cx.notify();
    }

    fn toggle(&mut self, id: DropdownId, window: &mut Window, cx: &mut Context<Self>) {
        if self.page.toggle(id) {
            cx.on_next_frame(window, |this, window, cx| {
                this.page.resolve_placements();
                if this.page.take_focus_requests() && this.page.open_id().is_some() {
                    window.focus(&this.search_focus);
                }
                cx.notify();
            });
        }
        cx.notify();
    }

    /// Outside-click dismissal for the open panel of `id`.
    fn dismiss_from(&mut self, id: DropdownId, event: &MouseDownEvent, cx: &mut Context<Self>) {
        // A click on the trigger is left to its own click handler.
        let (x, y) = (f32::from(event.position.x), f32::from(event.position.y));
        if self.page.dismiss_outside(id, x, y) {
            cx.notify();
        }
    }

    fn reset_filters(&mut self) {
        for id in [self.institution, self.regional, self.status] {
            self.with_dropdown(id, |d| d.clear());
        }
        self.with_dropdown(self.regional, |d| {
            d.set_options(Vec::new());
            d.set_disabled(true);
        });
        self.status_line = None;
    }

    fn run_button(&mut self, action: ButtonAction, cx: &mut Context<Self>) {
        match action {
            ButtonAction::ApplyFilters => self.apply_filters(),
            ButtonAction::ResetFilters => self.reset_filters(),
            ButtonAction::OpenTransfer => {
                self.page.close_all();
                self.transfer_open = true;
            }
            ButtonAction::SubmitTransfer => {
                let body = self.transfer.to_json();
                if self.transfer.get("to_regional_id").unwrap_or_default().is_empty() {
                    tracing::warn!("Cannot transfer: no destination selected");
                    self.status_line = Some("Choose a destination regional first".into());
                } else {
                    tracing::info!(%body, "Submitting transfer");
                    self.status_line = Some(format!("POST /transfers {}", body));
                    self.close_transfer();
                }
            }
            ButtonAction::CancelTransfer => self.close_transfer(),
        }
        cx.notify();
    }

    fn apply_filters(&mut self) {
        let query = self.filters.to_query();
        tracing::info!(%query, "Applying inventory filters");
        self.status_line = Some(if query.is_empty() {
            "GET /inventories".to_string()
        } else {
            format!("GET /inventories?{}", query)
        });
    }

    fn close_transfer(&mut self) {
        if let Some(id) = self.destination {
            self.page.close(id);
        }
        self.with_dropdown(self.destination, |d| d.clear());
        self.transfer_open = false;
    }

    fn handle_key(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        let command = keystroke.modifiers.control || keystroke.modifiers.platform;
        let Some((id, outcome)) =
            self.page
                .handle_key(&keystroke.key, keystroke.key_char.as_deref(), command)
        else {
            return;
        };
        match outcome {
            KeyOutcome::Ignored => return,
            KeyOutcome::Selected(option) => self.on_selected(id, &option),
            KeyOutcome::Handled | KeyOutcome::Closed => {}
        }
        cx.stop_propagation();
        cx.notify();
    }

    fn render_node(&self, node: &Node, window: &Window, cx: &mut Context<Self>) -> Option<AnyElement> {
        let colors = &self.theme.colors;
        match &node.role {
            Role::Form if node.id.ends_with("-actions") => Some(
                div()
                    .flex()
                    .gap(px(8.0))
                    .pt(px(8.0))
                    .children(
                        node.children
                            .iter()
                            .filter_map(|child| self.render_node(child, window, cx)),
                    )
                    .into_any_element(),
            ),
            Role::Form | Role::FormGroup => Some(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(if node.role == Role::Form { 16.0 } else { 6.0 }))
                    .children(
                        node.children
                            .iter()
                            .filter_map(|child| self.render_node(child, window, cx)),
                    )
                    .into_any_element(),
            ),
            Role::Label { text } => Some(
                div()
                    .text_xs()
                    .text_color(colors.text_secondary)
                    .child(SharedString::from(text.clone()))
                    .into_any_element(),
            ),
            Role::Button { text } => Some(self.render_button(&node.id, text, cx)),
            Role::Container => self
                .page
                .find(&node.id)
                .map(|id| self.render_dropdown(id, window, cx)),
            _ => None,
        }
    }

    fn render_button(&self, id: &str, text: &str, cx: &mut Context<Self>) -> AnyElement {
        let colors = &self.theme.colors;
        let action = ButtonAction::from_id(id);
        let primary = action.map(ButtonAction::is_primary).unwrap_or(false);
        let hover_bg = colors.surface_hover;

        div()
            .id(SharedString::from(id.to_string()))
            .px(px(14.0))
            .py(px(8.0))
            .rounded(px(6.0))
            .text_sm()
            .cursor_pointer()
            .when(primary, |d| d.bg(colors.accent).text_color(gpui::white()))
            .when(!primary, |d| {
                d.bg(colors.surface)
                    .border_1()
                    .border_color(colors.border)
                    .text_color(colors.text_primary)
                    .hover(move |d| d.bg(hover_bg))
            })
            .child(SharedString::from(text.to_string()))
            .when_some(action, |d, action| {
                d.on_click(cx.listener(move |this, _: &ClickEvent, _, cx| {
                    this.run_button(action, cx);
                }))
            })
            .into_any_element()
    }

    fn render_dropdown(&self, id: DropdownId, window: &Window, cx: &mut Context<Self>) -> AnyElement {
        let Some(dropdown) = self.page.get(id) else {
            return div().into_any_element();
        };
        let colors = self.theme.colors;
        let binding = dropdown.binding();
        let view = cx.entity().clone();

        let trigger = SelectTrigger::new(SharedString::from(binding.trigger.clone()), colors)
            .text(dropdown.display_text().to_string(), dropdown.shows_placeholder())
            .open(dropdown.is_open())
            .disabled(dropdown.is_disabled())
            .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                this.toggle(id, window, cx);
            }));

        // Records the trigger's laid-out bounds for placement and hit tests.
        let bounds_probe = canvas(
            move |bounds, _window, cx| {
                view.update(cx, |this, _| {
                    if let Some(dropdown) = this.page.get_mut(id) {
                        dropdown.set_trigger_bounds(to_rect(bounds));
                    }
                })
            },
            |_, _, _, _| {},
        )
        .absolute()
        .size_full();

        div()
            .id(SharedString::from(binding.container.clone()))
            .relative()
            .w_full()
            .child(div().relative().child(trigger).child(bounds_probe))
            .when(dropdown.is_open(), |d| {
                d.child(self.render_panel(id, dropdown, window, cx))
            })
            .into_any_element()
    }

    fn render_panel(
        &self,
        id: DropdownId,
        dropdown: &SearchableDropdown,
        window: &Window,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let colors = self.theme.colors;
        let binding = dropdown.binding();

        let rows = dropdown.rows().into_iter().map(|row| match row {
            OptionRow::NoResults(text) => NoResultsRow::new(text.to_string(), colors).into_any_element(),
            OptionRow::Item {
                index,
                option,
                selected,
                highlighted,
            } => {
                let item = OptionItem::new(
                    SharedString::from(format!("{}-{}", binding.options_list, index)),
                    option.label.clone(),
                    colors,
                )
                .selected(selected)
                .highlighted(highlighted)
                .disabled(option.disabled);
                if option.is_selectable() {
                    item.on_click(cx.listener(move |this, _: &ClickEvent, _, cx| {
                        this.select(id, index, cx);
                    }))
                    .into_any_element()
                } else {
                    item.into_any_element()
                }
            }
        });

        let panel = div()
            .id(SharedString::from(binding.panel.clone()))
            .flex()
            .flex_col()
            .bg(colors.surface)
            .border_1()
            .border_color(colors.border)
            .rounded(px(6.0))
            .shadow_lg()
            .overflow_hidden()
            .when_some(binding.search_input.clone(), |d, search_id| {
                d.when(dropdown.is_searchable(), |d| {
                    d.child(
                        div().track_focus(&self.search_focus).child(
                            SearchField::new(SharedString::from(search_id), colors)
                                .value(dropdown.search_text().to_string(), dropdown.search_cursor())
                                .focused(self.search_focus.is_focused(window))
                                .disabled(!dropdown.search_enabled()),
                        ),
                    )
                })
            })
            .child(
                div()
                    .id(SharedString::from(binding.options_list.clone()))
                    .flex()
                    .flex_col()
                    .py(px(4.0))
                    .max_h(px(240.0))
                    .overflow_y_scroll()
                    .children(rows),
            )
            .on_mouse_down_out(cx.listener(move |this, event: &MouseDownEvent, _, cx| {
                this.dismiss_from(id, event, cx);
            }));

        let placement = dropdown.placement().or_else(|| {
            // Normal-flow panels can be drawn before layout settles;
            // overlay panels wait for real coordinates.
            (!binding.in_overlay).then(|| PanelPlacement::Inline {
                top: InputSize::Medium.height() + crate::dropdown::placement::PANEL_GAP,
            })
        });

        match placement {
            Some(PanelPlacement::Fixed { x, y, width }) => deferred(
                anchored()
                    .position(point(px(x), px(y)))
                    .snap_to_window()
                    .child(panel.w(px(width))),
            )
            .with_priority(1)
            .into_any_element(),
            Some(PanelPlacement::Inline { top }) => deferred(
                div()
                    .absolute()
                    .top(px(top))
                    .left_0()
                    .w_full()
                    .child(panel),
            )
            .with_priority(1)
            .into_any_element(),
            None => div().into_any_element(),
        }
    }

    fn render_transfer_dialog(&self, window: &Window, cx: &mut Context<Self>) -> AnyElement {
        let colors = &self.theme.colors;
        let form = self
            .markup
            .find(TRANSFER_DIALOG)
            .and_then(|dialog| dialog.children.first())
            .and_then(|form| self.render_node(form, window, cx));

        div()
            .id(TRANSFER_DIALOG)
            .absolute()
            .inset_0()
            .bg(colors.overlay)
            .flex()
            .items_start()
            .justify_center()
            .pt(px(120.0))
            .child(
                div()
                    .w(px(420.0))
                    .p(px(20.0))
                    .bg(colors.background)
                    .border_1()
                    .border_color(colors.border)
                    .rounded(px(12.0))
                    .shadow_lg()
                    .flex()
                    .flex_col()
                    .gap(px(16.0))
                    .child(
                        div()
                            .text_base()
                            .text_color(colors.text_primary)
                            .child("Transfer item"),
                    )
                    .children(form),
            )
            .into_any_element()
    }
}

impl Focusable for FilterPanel {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for FilterPanel {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = self.theme.colors;
        if self.page.open_id().is_none() && self.search_focus.is_focused(window) {
            // The search field is gone with its panel; keys come back to the form.
            cx.on_next_frame(window, |this, window, _| window.focus(&this.focus_handle));
        }
        let filters = self
            .markup
            .find("filters")
            .and_then(|form| self.render_node(form, window, cx));

        div()
            .id("filter-panel")
            .key_context("FilterPanel")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, _window, cx| {
                this.handle_key(event, cx);
            }))
            .on_action(cx.listener(|this, _: &Dismiss, _, cx| {
                if let Some(id) = this.page.open_id() {
                    this.page.close(id);
                } else if this.transfer_open {
                    this.close_transfer();
                }
                cx.notify();
            }))
            .on_action(cx.listener(|this, _: &SubmitFilters, _, cx| {
                this.apply_filters();
                cx.notify();
            }))
            .on_action(cx.listener(|this, _: &OpenTransfer, _, cx| {
                this.run_button(ButtonAction::OpenTransfer, cx);
            }))
            .on_action(cx.listener(|this, _: &ToggleTheme, _, cx| {
                this.theme = this.theme.toggled();
                cx.notify();
            }))
            .size_full()
            .relative()
            .bg(colors.background)
            .text_color(colors.text_primary)
            .flex()
            .flex_col()
            .child(
                div()
                    .h(px(48.0))
                    .px(px(24.0))
                    .flex()
                    .items_center()
                    .border_b_1()
                    .border_color(colors.border)
                    .text_base()
                    .child("Inventory filters"),
            )
            .child(div().w(px(360.0)).p(px(24.0)).children(filters))
            .when_some(self.status_line.clone(), |d, line| {
                d.child(
                    div()
                        .px(px(24.0))
                        .text_xs()
                        .font_family("monospace")
                        .text_color(colors.text_muted)
                        .child(line),
                )
            })
            .when(self.transfer_open, |d| {
                d.child(self.render_transfer_dialog(window, cx))
            })
    }
}
