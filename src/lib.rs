//! Inventory admin filter form built around a searchable dropdown.
//!
//! The dropdown itself is headless ([`dropdown`]); [`ui`] draws it with gpui
//! and [`app`] wires the filter window together.

pub mod app;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod form;
pub mod source;
pub mod ui;
