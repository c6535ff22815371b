//! Pager widget state.
//!
//! The [`Viewer`] and its operations are plain methods over a
//! [`RegionTree`](crate::region::RegionTree), testable without a terminal.

pub mod command;
pub mod layout;
pub mod overlay;
pub mod scroll;
pub mod search;
pub mod viewer;

// Re-export for convenience
pub use command::{parse_command, Command, CommandError};
pub use overlay::{skip_tokens, BottomLine, EditContext};
pub use search::{SearchDirection, SearchMode};
pub use viewer::{CloseHook, Viewer};
