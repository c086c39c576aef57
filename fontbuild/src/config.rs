//! The build configuration file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{generate::GlyphList, Error};

/// What to build for one font.
///
/// Relative paths are resolved against the directory of the configuration
/// file when it is loaded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Composite descriptions, built in order.
    #[serde(default)]
    pub composites: Vec<String>,
    #[serde(default, skip_serializing_if = "GlyphList::is_empty")]
    pub glyph_list: GlyphList,
    /// Feature files merged into the font, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureSource>,
    /// Whether to synthesize the mkmk feature.
    #[serde(default = "default_mkmk")]
    pub mkmk: bool,
    /// Where to write the final feature text, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_out: Option<PathBuf>,
}

/// A feature file and whether it takes precedence over what the font has.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeatureSource {
    pub path: PathBuf,
    #[serde(default)]
    pub prepend: bool,
}

fn default_mkmk() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            composites: Vec::new(),
            glyph_list: GlyphList::new(),
            features: Vec::new(),
            mkmk: default_mkmk(),
            features_out: None,
        }
    }
}

impl BuildConfig {
    pub fn from_yaml(yml: &str) -> Result<BuildConfig, Error> {
        serde_yaml::from_str(yml).map_err(Into::into)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Load a configuration, resolving its paths against its own directory.
    pub fn load(path: &Path) -> Result<BuildConfig, Error> {
        if !path.is_file() {
            return Err(Error::FileExpected(path.to_path_buf()));
        }
        let yml = fs::read_to_string(path).map_err(|source| Error::FileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = BuildConfig::from_yaml(&yml)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_yaml()?).map_err(|source| Error::FileIo {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve_paths(&mut self, dir: &Path) {
        for source in self.features.iter_mut() {
            source.path = dir.join(&source.path);
        }
        if let Some(out) = self.features_out.as_mut() {
            *out = dir.join(&*out);
        }
    }
}
