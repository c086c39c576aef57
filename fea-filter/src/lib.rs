//! Validate and canonicalize OpenType feature files against a glyph set.
//!
//! Text is parsed into a list of [`ast::Statement`]s and re-emitted by a
//! [`FilterWriter`], which drops any rule or class member that refers to a
//! glyph or class not yet defined, and keeps only the first block of each
//! name.

pub mod ast;
mod diagnostic;
mod error;
mod features;
mod filter;
mod grammar;
mod lexer;
mod parse;
mod token;

pub use diagnostic::{Diagnostic, DiagnosticKind, Level};
pub use error::{Error, UnsupportedRule};
pub use features::{
    read_feature_file, read_feature_path, replace_feature, update_feature, write_feature_file,
};
pub use filter::{validate, FilterWriter, Filtered};
pub use parse::parse;
