//! Searchable dropdown widget state.
//!
//! Everything here is plain data driven by the host view; rendering lives in
//! [`crate::ui`]. The pieces:
//! - `option`: selectable entries
//! - `filter`: label search
//! - `search`: search box text and key handling
//! - `markup`: binding to page markup
//! - `placement`: panel positioning
//! - `state`: the per-dropdown state machine
//! - `page`: one-open-at-a-time across a page

pub mod filter;
pub mod markup;
pub mod option;
pub mod page;
pub mod placement;
pub mod search;
pub mod state;

pub use filter::filter_options;
pub use markup::{Binding, Node, Role};
pub use option::SelectOption;
pub use page::{ClickTarget, DropdownId, DropdownPage};
pub use placement::{PanelPlacement, Rect};
pub use search::{SearchBuffer, SearchKey};
pub use state::{KeyOutcome, OptionRow, SearchableDropdown};
