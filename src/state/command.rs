//! Commands typed into the command overlay.
//!
//! Syntax, one command per line:
//!
//! - `search [-r] <regex>`: search downwards (upwards with `-r`), the current
//!   top line included
//! - `top`, `bottom`
//! - `left [n]`, `right [n]`: shift by `n` columns or the configured width
//! - `quit`, `q`, `close`

use crate::model::pattern::{PatternError, SearchPattern};
use crate::state::search::SearchDirection;
use thiserror::Error;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for `pattern`, starting at the current top line.
    Search {
        /// Compiled expression.
        pattern: SearchPattern,
        /// Scan direction.
        direction: SearchDirection,
    },
    /// Jump to the first line.
    Top,
    /// Jump to the last page.
    Bottom,
    /// Shift left by this many columns, or the default width.
    Left(Option<usize>),
    /// Shift right by this many columns, or the default width.
    Right(Option<usize>),
    /// Close the pager.
    Quit,
}

/// A command line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank.
    #[error("no command given")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A command was given without its required argument.
    #[error("{command}: missing {what}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Description of the argument.
        what: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("{command}: not a column count: {value}")]
    BadCount {
        /// Command name.
        command: &'static str,
        /// The offending text.
        value: String,
    },

    /// The search expression did not compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Parse one command line.
///
/// The search expression is everything after `search` (and `-r`), so it may
/// contain spaces.
///
/// # Errors
///
/// Returns [`CommandError`] for blank lines, unknown commands, missing or
/// malformed arguments, and search expressions that do not compile.
pub fn parse_command(line: &str, ignore_case: bool) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (line, ""),
    };

    match name {
        "" => Err(CommandError::Empty),
        "search" => {
            let (direction, expr) = match rest.strip_prefix("-r") {
                Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => {
                    (SearchDirection::Upwards, after.trim_start())
                }
                _ => (SearchDirection::Downwards, rest),
            };
            if expr.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "search",
                    what: "pattern",
                });
            }
            let pattern = SearchPattern::with_options(expr, ignore_case)?;
            Ok(Command::Search { pattern, direction })
        }
        "top" => Ok(Command::Top),
        "bottom" => Ok(Command::Bottom),
        "left" => Ok(Command::Left(parse_count("left", rest)?)),
        "right" => Ok(Command::Right(parse_count("right", rest)?)),
        "quit" | "q" | "close" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_count(command: &'static str, arg: &str) -> Result<Option<usize>, CommandError> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse()
        .map(Some)
        .map_err(|_| CommandError::BadCount {
            command,
            value: arg.to_string(),
        })
}
