//! Label filtering for the search box.

use super::SelectOption;

/// Returns the options whose label contains `term`, ignoring case.
///
/// Order is preserved. A blank term keeps every option.
pub fn filter_options(options: &[SelectOption], term: &str) -> Vec<SelectOption> {
    if term.trim().is_empty() {
        return options.to_vec();
    }

    let needle = term.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
