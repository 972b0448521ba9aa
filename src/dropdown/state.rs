//! Searchable dropdown state machine.
//!
//! `Closed -> open() -> Open -> close() | toggle() | outside click | selection -> Closed`.
//! Disabled is a guard on every transition out of `Closed`, not a state of
//! its own, so disabling an open dropdown also closes it.

use crate::config::{ChangeCallback, DropdownConfig};
use crate::error::ConstructionError;
use crate::form::{FieldBinding, FormState};

use super::filter::filter_options;
use super::markup::{Binding, Node};
use super::placement::{PanelPlacement, Rect};
use super::search::{SearchBuffer, SearchKey};
use super::SelectOption;

/// A row of the rendered option list.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionRow<'a> {
    /// Shown when nothing matches; never clickable.
    NoResults(&'a str),
    Item {
        /// Index into the filtered options.
        index: usize,
        option: &'a SelectOption,
        selected: bool,
        highlighted: bool,
    },
}

impl OptionRow<'_> {
    pub fn is_clickable(&self) -> bool {
        match self {
            OptionRow::NoResults(_) => false,
            OptionRow::Item { option, .. } => option.is_selectable(),
        }
    }
}

/// Result of routing a keystroke to an open dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Consumed; search or highlight changed.
    Handled,
    /// An option was picked.
    Selected(SelectOption),
    /// The panel was closed.
    Closed,
    /// Not consumed.
    Ignored,
}

/// A combobox bound to one container of the page markup.
pub struct SearchableDropdown {
    binding: Binding,
    placeholder: String,
    searchable: bool,
    no_results_text: String,
    on_change: Option<ChangeCallback>,
    field: Option<FieldBinding>,

    options: Vec<SelectOption>,
    filtered: Vec<SelectOption>,
    selected_value: String,
    selected_text: String,
    open: bool,
    disabled: bool,
    search: SearchBuffer,
    highlighted: Option<usize>,

    trigger_bounds: Option<Rect>,
    placement: Option<PanelPlacement>,
    focus_requested: bool,
}

impl std::fmt::Debug for SearchableDropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchableDropdown")
            .field("container", &self.binding.container)
            .field("options", &self.options.len())
            .field("selected_value", &self.selected_value)
            .field("open", &self.open)
            .field("disabled", &self.disabled)
            .field("search", &self.search.text())
            .finish()
    }
}

impl SearchableDropdown {
    /// Binds a dropdown to `container_id` in `page`.
    ///
    /// Fails if the container or one of its required parts is missing. The
    /// hidden field is optional; when present it is registered in `form`.
    pub fn bind(
        page: &Node,
        container_id: &str,
        config: DropdownConfig,
        form: &FormState,
    ) -> Result<Self, ConstructionError> {
        let binding = Binding::resolve(page, container_id)?;
        let field = binding.hidden_field.as_ref().map(|name| form.field(name));
        Ok(Self::from_binding(binding, config, field))
    }

    fn from_binding(
        binding: Binding,
        config: DropdownConfig,
        field: Option<FieldBinding>,
    ) -> Self {
        let searchable = config.searchable && binding.search_input.is_some();
        Self {
            binding,
            placeholder: config.placeholder,
            searchable,
            no_results_text: config.no_results_text,
            on_change: config.on_change,
            field,
            options: Vec::new(),
            filtered: Vec::new(),
            selected_value: String::new(),
            selected_text: String::new(),
            open: false,
            disabled: config.disabled,
            search: SearchBuffer::new(),
            highlighted: None,
            trigger_bounds: None,
            placement: None,
            focus_requested: false,
        }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn container_id(&self) -> &str {
        &self.binding.container
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn filtered_options(&self) -> &[SelectOption] {
        &self.filtered
    }

    /// Selected value, empty when nothing is selected.
    pub fn value(&self) -> &str {
        &self.selected_value
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    /// Trigger text: the selected label or the placeholder.
    pub fn display_text(&self) -> &str {
        if self.selected_value.is_empty() {
            &self.placeholder
        } else {
            &self.selected_text
        }
    }

    /// Whether the trigger shows placeholder styling.
    pub fn shows_placeholder(&self) -> bool {
        self.selected_value.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn search_cursor(&self) -> usize {
        self.search.cursor()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Replaces the option list and drops any active filter.
    ///
    /// The selection is left alone even when its value is missing from the
    /// new list; see [`Self::has_stale_selection`].
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.search.clear();
        self.filtered = self.options.clone();
        self.highlighted = None;

        if self.has_stale_selection() {
            tracing::debug!(
                container = %self.binding.container,
                value = %self.selected_value,
                "Selected value is not in the new option list"
            );
        }
    }

    /// True when a value is selected that the current options don't contain.
    pub fn has_stale_selection(&self) -> bool {
        !self.selected_value.is_empty()
            && !self.options.iter().any(|o| o.value == self.selected_value)
    }

    /// Selects the option with `value` as if it had been clicked.
    ///
    /// Disabled options only block clicks; a programmatic value still
    /// selects them. Returns false, changing nothing, when no option matches.
    pub fn set_value(&mut self, value: &str) -> bool {
        let option = self.options.iter().find(|o| o.value == value).cloned();
        match option {
            Some(option) => {
                self.select_option(option);
                true
            }
            None => false,
        }
    }

    /// Picks the filtered option at `index`, as a click on its row does.
    pub fn select_index(&mut self, index: usize) -> Option<SelectOption> {
        if self.disabled {
            return None;
        }
        let option = self
            .filtered
            .get(index)
            .filter(|o| o.is_selectable())
            .cloned()?;
        self.select_option(option.clone());
        Some(option)
    }

    fn select_option(&mut self, option: SelectOption) {
        self.selected_value = option.value.clone();
        self.selected_text = option.label.clone();
        if let Some(field) = &self.field {
            field.set(&option.value);
        }
        self.close();

        tracing::debug!(
            container = %self.binding.container,
            value = %option.value,
            "Option selected"
        );

        if let Some(on_change) = self.on_change.clone() {
            on_change(Some(&option));
        }
    }

    /// Empties the selection without notifying `on_change`.
    pub fn clear(&mut self) {
        self.selected_value.clear();
        self.selected_text.clear();
        if let Some(field) = &self.field {
            field.clear();
        }
    }

    /// Opens this dropdown alone.
    ///
    /// Other dropdowns on the page are not touched here; go through
    /// [`super::DropdownPage::open`] to keep only one open.
    pub fn open(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.open = true;
        self.placement = None;
        self.highlighted = self
            .filtered
            .iter()
            .position(|o| !self.selected_value.is_empty() && o.value == self.selected_value);
        if self.searchable {
            self.focus_requested = true;
        }
        true
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.search.clear();
        self.filtered = self.options.clone();
        self.highlighted = None;
        self.placement = None;
    }

    /// Closes when open, opens otherwise.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
            false
        } else {
            self.open()
        }
    }

    /// Filters the list by `term` and makes it the search text.
    pub fn filter_options(&mut self, term: &str) {
        self.search.set_text(term);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, self.search.text());
        self.highlighted = None;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Whether the search input accepts typing right now.
    pub fn search_enabled(&self) -> bool {
        self.searchable && !self.disabled
    }

    /// Moves the highlight to the next selectable row, wrapping around.
    pub fn highlight_next(&mut self) {
        self.highlighted = self.step_highlight(true);
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = self.step_highlight(false);
    }

    fn step_highlight(&self, forward: bool) -> Option<usize> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        let start = match (self.highlighted, forward) {
            (Some(i), true) => i + 1,
            (Some(i), false) => i + len - 1,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        (0..len)
            .map(|step| {
                if forward {
                    (start + step) % len
                } else {
                    (start + len - step) % len
                }
            })
            .find(|&i| self.filtered[i].is_selectable())
    }

    /// Routes a keystroke to this dropdown while it is open.
    pub fn handle_key(&mut self, key: &str, typed: Option<&str>, command: bool) -> KeyOutcome {
        if !self.open || self.disabled {
            return KeyOutcome::Ignored;
        }
        let mut scratch = self.search.clone();
        match scratch.process_key(key, typed, command) {
            SearchKey::Edited | SearchKey::Moved if !self.searchable => KeyOutcome::Ignored,
            SearchKey::Edited => {
                self.search = scratch;
                self.refilter();
                KeyOutcome::Handled
            }
            SearchKey::Moved => {
                self.search = scratch;
                KeyOutcome::Handled
            }
            SearchKey::Next => {
                self.highlight_next();
                KeyOutcome::Handled
            }
            SearchKey::Previous => {
                self.highlight_previous();
                KeyOutcome::Handled
            }
            SearchKey::Confirm => {
                let highlighted = self.highlighted;
                match highlighted.and_then(|i| self.select_index(i)) {
                    Some(option) => KeyOutcome::Selected(option),
                    None => KeyOutcome::Handled,
                }
            }
            SearchKey::Dismiss => {
                self.close();
                KeyOutcome::Closed
            }
            SearchKey::Ignored => KeyOutcome::Ignored,
        }
    }

    /// Rows to draw in the options list.
    pub fn rows(&self) -> Vec<OptionRow<'_>> {
        if self.filtered.is_empty() {
            return vec![OptionRow::NoResults(&self.no_results_text)];
        }
        self.filtered
            .iter()
            .enumerate()
            .map(|(index, option)| OptionRow::Item {
                index,
                option,
                selected: !self.selected_value.is_empty() && option.value == self.selected_value,
                highlighted: self.highlighted == Some(index),
            })
            .collect()
    }

    /// Records where the trigger was laid out this frame.
    pub fn set_trigger_bounds(&mut self, bounds: Rect) {
        self.trigger_bounds = Some(bounds);
    }

    pub fn trigger_bounds(&self) -> Option<Rect> {
        self.trigger_bounds
    }

    /// Whether a window point falls on the trigger.
    pub fn trigger_contains(&self, x: f32, y: f32) -> bool {
        self.trigger_bounds
            .map(|bounds| bounds.contains(x, y))
            .unwrap_or(false)
    }

    /// Computes the panel placement from post-layout geometry.
    ///
    /// Called a frame after opening. Does nothing while closed or before the
    /// trigger has been laid out.
    pub fn resolve_placement(&mut self) -> Option<PanelPlacement> {
        if !self.open {
            return None;
        }
        let bounds = self.trigger_bounds?;
        let placement = PanelPlacement::compute(bounds, self.binding.in_overlay);
        self.placement = Some(placement);
        Some(placement)
    }

    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement
    }

    /// Takes a pending request to focus the search input.
    ///
    /// Closing before the request is taken does not withdraw it.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropdown::markup::Role;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn page() -> Node {
        Node::new("page", Role::Page)
            .child(Node::select_group("regional", "Regional", "regional_id", true))
            .child(Node::new("modal", Role::ModalOverlay).child(Node::dropdown("dest", true)))
    }

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("1", "Alpha"),
            SelectOption::new("2", "Beta"),
            SelectOption::new("3", "Gamma").disabled(true),
            SelectOption::new("4", "Delta"),
        ]
    }

    fn dropdown(config: DropdownConfig) -> (SearchableDropdown, FormState) {
        let form = FormState::new();
        let mut dropdown = SearchableDropdown::bind(&page(), "regional", config, &form).unwrap();
        dropdown.set_options(options());
        (dropdown, form)
    }

    #[test]
    fn starts_closed_with_placeholder() {
        let (dropdown, _) = dropdown(DropdownConfig::default());
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.value(), "");
        assert_eq!(dropdown.display_text(), "Select...");
        assert!(dropdown.shows_placeholder());
        assert!(dropdown.is_searchable());
    }

    #[test]
    fn searchable_requires_search_input_markup() {
        let page = Node::new("page", Role::Page).child(Node::dropdown("plain", false));
        let dropdown =
            SearchableDropdown::bind(&page, "plain", DropdownConfig::default(), &FormState::new())
                .unwrap();
        assert!(!dropdown.is_searchable());
    }

    #[test]
    fn bind_fails_for_missing_container() {
        let result = SearchableDropdown::bind(
            &page(),
            "missing",
            DropdownConfig::default(),
            &FormState::new(),
        );
        assert!(matches!(result, Err(ConstructionError::ContainerNotFound(_))));
    }

    #[test]
    fn set_value_known_and_unknown() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        assert!(dropdown.set_value("2"));
        assert_eq!(dropdown.value(), "2");
        assert_eq!(dropdown.display_text(), "Beta");

        assert!(!dropdown.set_value("99"));
        assert_eq!(dropdown.value(), "2");
    }

    #[test]
    fn set_value_selects_disabled_option() {
        let calls: Rc<RefCell<Vec<Option<SelectOption>>>> = Rc::default();
        let sink = calls.clone();
        let config = DropdownConfig::default()
            .on_change(move |option| sink.borrow_mut().push(option.cloned()));
        let (mut dropdown, form) = dropdown(config);

        assert!(dropdown.set_value("3"));
        assert_eq!(dropdown.value(), "3");
        assert_eq!(dropdown.display_text(), "Gamma");
        assert_eq!(form.get("regional_id").as_deref(), Some("3"));
        assert_eq!(
            *calls.borrow(),
            vec![Some(SelectOption::new("3", "Gamma").disabled(true))]
        );
    }

    #[test]
    fn selection_updates_hidden_field_and_calls_back_once() {
        let calls: Rc<RefCell<Vec<Option<SelectOption>>>> = Rc::default();
        let sink = calls.clone();
        let config = DropdownConfig::default()
            .on_change(move |option| sink.borrow_mut().push(option.cloned()));
        let (mut dropdown, form) = dropdown(config);

        dropdown.open();
        let picked = dropdown.select_index(1);

        assert_eq!(picked, Some(SelectOption::new("2", "Beta")));
        assert_eq!(form.get("regional_id").as_deref(), Some("2"));
        assert_eq!(*calls.borrow(), vec![Some(SelectOption::new("2", "Beta"))]);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn selection_without_callback_is_fine() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        assert!(dropdown.select_index(0).is_some());
        assert_eq!(dropdown.value(), "1");
    }

    #[test]
    fn disabled_row_cannot_be_selected() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        assert_eq!(dropdown.select_index(2), None);
        assert_eq!(dropdown.value(), "");
    }

    #[test]
    fn clear_resets_without_callback() {
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let config = DropdownConfig::default().on_change(move |_| *sink.borrow_mut() += 1);
        let (mut dropdown, form) = dropdown(config);

        dropdown.set_value("1");
        dropdown.clear();

        assert_eq!(dropdown.value(), "");
        assert_eq!(dropdown.display_text(), "Select...");
        assert_eq!(form.get("regional_id").as_deref(), Some(""));
        assert_eq!(*calls.borrow(), 1);
        assert!(dropdown.rows().iter().all(|row| !matches!(
            row,
            OptionRow::Item { selected: true, .. }
        )));
    }

    #[test]
    fn clear_on_empty_dropdown() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.clear();
        assert_eq!(dropdown.value(), "");
    }

    #[test]
    fn disabled_never_opens() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default().disabled(true));
        assert!(!dropdown.open());
        assert!(!dropdown.toggle());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn disabling_forces_close_and_keeps_selection() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.set_value("4");
        dropdown.open();
        dropdown.set_disabled(true);
        assert!(!dropdown.is_open());
        assert!(!dropdown.search_enabled());
        assert_eq!(dropdown.value(), "4");

        dropdown.set_disabled(false);
        assert!(dropdown.open());
    }

    #[test]
    fn close_clears_search_and_filter() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        dropdown.filter_options("del");
        assert_eq!(dropdown.filtered_options().len(), 1);

        dropdown.close();
        assert_eq!(dropdown.search_text(), "");
        assert_eq!(dropdown.filtered_options(), dropdown.options());
    }

    #[test]
    fn toggle_flips() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        assert!(dropdown.toggle());
        assert!(dropdown.is_open());
        assert!(!dropdown.toggle());
        assert!(!dropdown.is_open());
    }

    #[test]
    fn set_options_resets_filter_but_keeps_stale_selection() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.set_value("2");
        dropdown.filter_options("a");

        dropdown.set_options(vec![SelectOption::new("9", "Omega")]);

        assert_eq!(dropdown.search_text(), "");
        assert_eq!(dropdown.filtered_options(), &[SelectOption::new("9", "Omega")]);
        assert_eq!(dropdown.value(), "2");
        assert_eq!(dropdown.display_text(), "Beta");
        assert!(dropdown.has_stale_selection());
    }

    #[test]
    fn empty_list_renders_single_inert_row() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.set_options(Vec::new());
        let rows = dropdown.rows();
        assert_eq!(rows, vec![OptionRow::NoResults("No results found")]);
        assert!(!rows[0].is_clickable());
    }

    #[test]
    fn rows_mark_selection_and_disabled() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.set_value("1");
        let rows = dropdown.rows();
        assert_eq!(rows.len(), 4);
        assert!(matches!(rows[0], OptionRow::Item { selected: true, .. }));
        assert!(matches!(rows[1], OptionRow::Item { selected: false, .. }));
        assert!(!rows[2].is_clickable());
    }

    #[test]
    fn typing_filters_list() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        assert_eq!(dropdown.handle_key("e", Some("e"), false), KeyOutcome::Handled);
        assert_eq!(dropdown.handle_key("t", Some("t"), false), KeyOutcome::Handled);
        assert_eq!(dropdown.search_text(), "et");
        assert_eq!(dropdown.filtered_options(), &[SelectOption::new("2", "Beta")]);
    }

    #[test]
    fn keys_ignored_when_closed() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        assert_eq!(dropdown.handle_key("a", Some("a"), false), KeyOutcome::Ignored);
        assert_eq!(dropdown.search_text(), "");
    }

    #[test]
    fn non_searchable_ignores_typing_but_navigates() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default().searchable(false));
        dropdown.open();
        assert_eq!(dropdown.handle_key("a", Some("a"), false), KeyOutcome::Ignored);
        assert_eq!(dropdown.search_text(), "");
        assert_eq!(dropdown.handle_key("down", None, false), KeyOutcome::Handled);
        assert_eq!(dropdown.highlighted(), Some(0));
    }

    #[test]
    fn highlight_skips_disabled_and_wraps() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        dropdown.highlight_next();
        dropdown.highlight_next();
        assert_eq!(dropdown.highlighted(), Some(1));
        dropdown.highlight_next();
        assert_eq!(dropdown.highlighted(), Some(3));
        dropdown.highlight_next();
        assert_eq!(dropdown.highlighted(), Some(0));
        dropdown.highlight_previous();
        assert_eq!(dropdown.highlighted(), Some(3));
    }

    #[test]
    fn enter_selects_highlighted() {
        let (mut dropdown, form) = dropdown(DropdownConfig::default());
        dropdown.open();
        dropdown.handle_key("down", None, false);
        dropdown.handle_key("down", None, false);
        assert_eq!(
            dropdown.handle_key("enter", None, false),
            KeyOutcome::Selected(SelectOption::new("2", "Beta"))
        );
        assert_eq!(form.get("regional_id").as_deref(), Some("2"));
        assert!(!dropdown.is_open());
    }

    #[test]
    fn escape_closes() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        assert_eq!(dropdown.handle_key("escape", None, false), KeyOutcome::Closed);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn open_highlights_current_selection() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.set_value("4");
        dropdown.open();
        assert_eq!(dropdown.highlighted(), Some(3));
    }

    #[test]
    fn placement_waits_for_layout() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        assert_eq!(dropdown.resolve_placement(), None);

        dropdown.set_trigger_bounds(Rect::new(10.0, 20.0, 200.0, 32.0));
        assert_eq!(
            dropdown.resolve_placement(),
            Some(PanelPlacement::Inline { top: 36.0 })
        );

        dropdown.close();
        assert_eq!(dropdown.placement(), None);
    }

    #[test]
    fn overlay_dropdown_uses_fixed_placement() {
        let mut dropdown =
            SearchableDropdown::bind(&page(), "dest", DropdownConfig::default(), &FormState::new())
                .unwrap();
        dropdown.set_trigger_bounds(Rect::new(10.0, 20.0, 200.0, 32.0));
        dropdown.open();
        assert!(dropdown.resolve_placement().unwrap().is_fixed());
    }

    #[test]
    fn focus_request_survives_close() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default());
        dropdown.open();
        dropdown.close();
        assert!(dropdown.take_focus_request());
        assert!(!dropdown.take_focus_request());
    }

    #[test]
    fn non_searchable_does_not_request_focus() {
        let (mut dropdown, _) = dropdown(DropdownConfig::default().searchable(false));
        dropdown.open();
        assert!(!dropdown.take_focus_request());
    }
}
