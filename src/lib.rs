//! Per column filter dropdowns for tui data tables.
//!
//! The widget renders a trigger cell in a table header and, when opened, a
//! popup menu for adding, toggling and removing value filters on that
//! column. It owns nothing but the transient input text and the dropdown
//! mechanics; the filter lists live with the hosting table, which passes
//! them in by reference and receives every mutation through
//! [`ColumnFilterHandlers`].

pub mod filter;
pub mod icon;
pub mod input;
pub mod theme;
pub mod ui;

pub use filter::{Column, ColumnFilterHandlers, Filter, is_active};
pub use icon::{FilterIcon, Intercept, MenuLayout, MenuMessage, RowLayout};
pub use input::FilterInput;
pub use theme::Theme;
