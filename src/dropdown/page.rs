//! Dropdowns sharing one page.
//!
//! At most one dropdown on a page is open. Opening scans the page for open
//! instances and closes them first; there is no separate registry of open
//! handles. All of this runs on the UI thread, so no locking.

use super::state::{KeyOutcome, SearchableDropdown};
use super::SelectOption;

/// Handle to a dropdown within its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(usize);

/// Where a click landed, for outside-click dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// On the given dropdown's trigger.
    Dropdown(DropdownId),
    /// Anywhere else.
    Elsewhere,
}

#[derive(Debug, Default)]
pub struct DropdownPage {
    dropdowns: Vec<SearchableDropdown>,
}

impl DropdownPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dropdown: SearchableDropdown) -> DropdownId {
        self.dropdowns.push(dropdown);
        DropdownId(self.dropdowns.len() - 1)
    }

    pub fn get(&self, id: DropdownId) -> Option<&SearchableDropdown> {
        self.dropdowns.get(id.0)
    }

    pub fn get_mut(&mut self, id: DropdownId) -> Option<&mut SearchableDropdown> {
        self.dropdowns.get_mut(id.0)
    }

    /// Looks a dropdown up by its container id.
    pub fn find(&self, container_id: &str) -> Option<DropdownId> {
        self.dropdowns
            .iter()
            .position(|d| d.container_id() == container_id)
            .map(DropdownId)
    }

    pub fn ids(&self) -> impl Iterator<Item = DropdownId> {
        (0..self.dropdowns.len()).map(DropdownId)
    }

    /// The open dropdown, if any.
    pub fn open_id(&self) -> Option<DropdownId> {
        self.dropdowns.iter().position(|d| d.is_open()).map(DropdownId)
    }

    fn close_others(&mut self, keep: DropdownId) {
        for (i, dropdown) in self.dropdowns.iter_mut().enumerate() {
            if i != keep.0 && dropdown.is_open() {
                dropdown.close();
            }
        }
    }

    /// Opens `id` after closing every other open dropdown.
    ///
    /// A disabled dropdown stays closed and leaves the others as they are.
    pub fn open(&mut self, id: DropdownId) -> bool {
        match self.get(id) {
            Some(dropdown) if !dropdown.is_disabled() => {}
            _ => return false,
        }
        self.close_others(id);
        self.dropdowns[id.0].open()
    }

    pub fn close(&mut self, id: DropdownId) {
        if let Some(dropdown) = self.get_mut(id) {
            dropdown.close();
        }
    }

    /// Closes `id` if open, otherwise opens it as [`Self::open`] does.
    pub fn toggle(&mut self, id: DropdownId) -> bool {
        match self.get(id) {
            Some(dropdown) if dropdown.is_open() => {
                self.close(id);
                false
            }
            Some(_) => self.open(id),
            None => false,
        }
    }

    pub fn close_all(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.close();
        }
    }

    /// Maps a window point to the dropdown whose trigger it hits.
    pub fn hit_test(&self, x: f32, y: f32) -> ClickTarget {
        self.dropdowns
            .iter()
            .position(|d| d.trigger_contains(x, y))
            .map(|i| ClickTarget::Dropdown(DropdownId(i)))
            .unwrap_or(ClickTarget::Elsewhere)
    }

    /// Closes every open dropdown the click did not land on.
    pub fn handle_click(&mut self, target: ClickTarget) {
        for (i, dropdown) in self.dropdowns.iter_mut().enumerate() {
            if target != ClickTarget::Dropdown(DropdownId(i)) && dropdown.is_open() {
                dropdown.close();
            }
        }
    }

    /// Outside-click dismissal for the open panel of `id`.
    ///
    /// Only `id`'s own trigger counts; other triggers may be covered by an
    /// overlay or no longer drawn. Returns whether the panel was closed.
    pub fn dismiss_outside(&mut self, id: DropdownId, x: f32, y: f32) -> bool {
        match self.get_mut(id) {
            Some(dropdown) if dropdown.is_open() && !dropdown.trigger_contains(x, y) => {
                dropdown.close();
                true
            }
            _ => false,
        }
    }

    /// Picks a filtered row of `id`.
    pub fn select(&mut self, id: DropdownId, index: usize) -> Option<SelectOption> {
        self.get_mut(id)?.select_index(index)
    }

    /// Sends a keystroke to the open dropdown.
    pub fn handle_key(
        &mut self,
        key: &str,
        typed: Option<&str>,
        command: bool,
    ) -> Option<(DropdownId, KeyOutcome)> {
        let id = self.open_id()?;
        let outcome = self.dropdowns[id.0].handle_key(key, typed, command);
        Some((id, outcome))
    }

    /// Takes focus requests from every dropdown; true if any was pending.
    pub fn take_focus_requests(&mut self) -> bool {
        self.dropdowns
            .iter_mut()
            .fold(false, |any, d| d.take_focus_request() || any)
    }

    /// Resolves the placement of the open dropdown.
    pub fn resolve_placements(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.resolve_placement();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropdownConfig;
    use crate::dropdown::markup::{Node, Role};
    use crate::dropdown::placement::Rect;
    use crate::form::FormState;

    fn page() -> (DropdownPage, DropdownId, DropdownId) {
        let markup = Node::new("page", Role::Page)
            .child(Node::dropdown("x", true))
            .child(Node::dropdown("y", true));
        let form = FormState::new();
        let mut page = DropdownPage::new();
        let mut x = SearchableDropdown::bind(&markup, "x", DropdownConfig::default(), &form).unwrap();
        let mut y = SearchableDropdown::bind(&markup, "y", DropdownConfig::default(), &form).unwrap();
        x.set_options(vec![SelectOption::new("1", "Alpha")]);
        y.set_options(vec![SelectOption::new("2", "Beta")]);
        x.set_trigger_bounds(Rect::new(0.0, 0.0, 100.0, 30.0));
        y.set_trigger_bounds(Rect::new(0.0, 50.0, 100.0, 30.0));
        let x = page.insert(x);
        let y = page.insert(y);
        (page, x, y)
    }

    fn is_open(page: &DropdownPage, id: DropdownId) -> bool {
        page.get(id).map(|d| d.is_open()).unwrap_or(false)
    }

    #[test]
    fn opening_one_closes_the_other() {
        let (mut page, x, y) = page();
        assert!(page.open(x));
        assert!(page.open(y));
        assert!(!is_open(&page, x));
        assert!(is_open(&page, y));
        assert_eq!(page.open_id(), Some(y));
    }

    #[test]
    fn toggle_also_closes_others() {
        let (mut page, x, y) = page();
        page.toggle(x);
        page.toggle(y);
        assert!(!is_open(&page, x));
        assert!(is_open(&page, y));
        page.toggle(y);
        assert_eq!(page.open_id(), None);
    }

    #[test]
    fn click_outside_both_closes_open_one() {
        let (mut page, x, y) = page();
        page.open(x);
        page.open(y);
        let target = page.hit_test(500.0, 500.0);
        assert_eq!(target, ClickTarget::Elsewhere);
        page.handle_click(target);
        assert!(!is_open(&page, x));
        assert!(!is_open(&page, y));
    }

    #[test]
    fn click_on_own_trigger_keeps_it_open() {
        let (mut page, _x, y) = page();
        page.open(y);
        let target = page.hit_test(10.0, 60.0);
        assert_eq!(target, ClickTarget::Dropdown(y));
        page.handle_click(target);
        assert!(is_open(&page, y));
    }

    #[test]
    fn dismissal_ignores_covered_triggers() {
        let (mut page, x, y) = page();
        // y's trigger drawn over a stale x trigger, as in a modal.
        if let Some(d) = page.get_mut(y) {
            d.set_trigger_bounds(Rect::new(0.0, 0.0, 100.0, 30.0));
        }
        page.open(y);
        assert_eq!(page.hit_test(10.0, 10.0), ClickTarget::Dropdown(x));

        assert!(!page.dismiss_outside(y, 10.0, 10.0));
        assert!(is_open(&page, y));

        assert!(page.dismiss_outside(y, 500.0, 500.0));
        assert!(!is_open(&page, y));
        assert!(!page.dismiss_outside(y, 500.0, 500.0));
    }

    #[test]
    fn disabled_open_leaves_others_alone() {
        let (mut page, x, y) = page();
        page.open(x);
        if let Some(d) = page.get_mut(y) {
            d.set_disabled(true);
        }
        assert!(!page.open(y));
        assert!(is_open(&page, x));
        assert!(!is_open(&page, y));
    }

    #[test]
    fn keys_go_to_open_dropdown() {
        let (mut page, x, y) = page();
        assert_eq!(page.handle_key("a", Some("a"), false), None);
        page.open(y);
        assert_eq!(
            page.handle_key("e", Some("e"), false),
            Some((y, KeyOutcome::Handled))
        );
        assert_eq!(page.get(y).map(|d| d.search_text()), Some("e"));
        assert_eq!(page.get(x).map(|d| d.search_text()), Some(""));
    }

    #[test]
    fn find_by_container() {
        let (page, x, y) = page();
        assert_eq!(page.find("x"), Some(x));
        assert_eq!(page.find("y"), Some(y));
        assert_eq!(page.find("z"), None);
        assert_eq!(page.ids().count(), 2);
    }

    #[test]
    fn select_through_page() {
        let (mut page, x, _) = page();
        page.open(x);
        assert_eq!(page.select(x, 0), Some(SelectOption::new("1", "Alpha")));
        assert_eq!(page.open_id(), None);
    }

    #[test]
    fn only_searchable_dropdowns_ask_for_focus() {
        let markup = Node::new("page", Role::Page)
            .child(Node::dropdown("plain", false))
            .child(Node::dropdown("search", true));
        let form = FormState::new();
        let mut page = DropdownPage::new();
        let plain = page.insert(
            SearchableDropdown::bind(&markup, "plain", DropdownConfig::default(), &form).unwrap(),
        );
        let search = page.insert(
            SearchableDropdown::bind(&markup, "search", DropdownConfig::default(), &form).unwrap(),
        );

        page.open(plain);
        assert!(!page.take_focus_requests());
        page.open(search);
        assert!(page.take_focus_requests());
    }

    #[test]
    fn focus_requests_are_drained() {
        let (mut page, x, _) = page();
        page.open(x);
        assert!(page.take_focus_requests());
        assert!(!page.take_focus_requests());
    }
}
