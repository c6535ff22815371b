//! vpager
//!
//! A terminal pager widget: a scrollable view of a text document with
//! regular-expression search in both directions and an inline command line
//! replacing the status row while it is open.
//!
//! The widget ([`state::Viewer`]) lives in a host [`region::RegionTree`] and
//! only paints when the tree delivers redraw signals, so it is fully
//! testable without a terminal. [`view::PagerApp`] wires it to crossterm.

pub mod config;
pub mod editor;
pub mod logging;
pub mod model;
pub mod region;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
