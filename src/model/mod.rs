//! Domain types: the formatted document, search patterns, key actions and
//! errors.

pub mod error;
pub mod fmtext;
pub mod key_action;
pub mod pattern;

pub use error::{AppError, InputError};
pub use fmtext::FmText;
pub use key_action::KeyAction;
pub use pattern::{PatternError, SearchPattern};
