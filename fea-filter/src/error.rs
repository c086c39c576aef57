//! Errors that abort a filtering pass.

use std::{fmt, io, ops::Range, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax error at {range:?}: {message}")]
    Syntax { message: String, range: Range<usize> },
    #[error("{kind} is not supported (at {range:?})")]
    UnsupportedRule {
        kind: UnsupportedRule,
        range: Range<usize>,
    },
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    BadPattern(#[from] regex::Error),
}

/// Rule types the filter refuses to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedRule {
    /// A substitution with marked (`'`) glyphs, or an `ignore sub`.
    ContextualSubstitution,
    /// `rsub` / `reversesub`.
    ReverseChaining,
    /// `sub ... from`.
    AlternateSubstitution,
}

impl fmt::Display for UnsupportedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedRule::ContextualSubstitution => f.write_str("contextual substitution"),
            UnsupportedRule::ReverseChaining => f.write_str("reverse chaining substitution"),
            UnsupportedRule::AlternateSubstitution => f.write_str("alternate substitution"),
        }
    }
}
