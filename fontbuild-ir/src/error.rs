use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("glyph '{0}' not found")]
    MissingGlyph(String),
    #[error("anchor '{anchor}' not found in glyph '{glyph}'")]
    MissingAnchor { glyph: String, anchor: String },
    #[error(transparent)]
    YamlSerError(#[from] serde_yaml::Error),
}
