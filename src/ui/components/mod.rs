//! Stateless dropdown building blocks, styled from the theme.

pub mod input;
pub mod option_list;

pub use input::{InputSize, SearchField, SelectTrigger};
pub use option_list::{NoResultsRow, OptionItem};
