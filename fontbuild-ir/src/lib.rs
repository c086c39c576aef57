//! The font object model shared by the fontbuild tools.
//!
//! A [`Font`] is a flat, ordered set of [`ir::Glyph`]s plus the font's
//! feature-file text. Everything that mutates glyphs on behalf of the build
//! goes through the [`GlyphSource`] trait.

pub mod error;
mod font;
pub mod ir;
mod serde;
mod source;

pub use error::Error;
pub use font::Font;
pub use source::{GlyphSource, DEFAULT_ATTACHMENT};
