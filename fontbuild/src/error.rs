use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed composite '{spec}': {reason}")]
    MalformedSpec { spec: String, reason: String },
    #[error("io failed for '{path}': '{source}'")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Missing file '{0}'")]
    FileExpected(PathBuf),
    #[error("failed to load '{path}': {source}")]
    UfoLoad {
        path: PathBuf,
        #[source]
        source: norad::error::FontLoadError,
    },
    #[error("failed to save '{path}': {source}")]
    UfoWrite {
        path: PathBuf,
        #[source]
        source: norad::error::FontWriteError,
    },
    #[error("'{0}' is not a valid UFO glyph or anchor name")]
    InvalidName(String),
    #[error(transparent)]
    YamlSerError(#[from] serde_yaml::Error),
    #[error(transparent)]
    FontIrError(#[from] fontbuild_ir::Error),
    #[error(transparent)]
    Features(#[from] fea_filter::Error),
}
