//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BuildConfig, FeatureSource};

/// Add composite glyphs and mark features to a UFO.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct Args {
    /// The UFO to build from
    #[arg(short, long)]
    pub source: PathBuf,

    /// A YAML build configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to save the result. Defaults to updating the source in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Feature files to merge after the font's own features
    #[arg(long = "features")]
    pub features: Vec<PathBuf>,

    /// Feature files to merge ahead of the font's own features, taking precedence
    #[arg(long = "prepend-features")]
    pub prepend_features: Vec<PathBuf>,

    /// Additional composite descriptions, e.g. `Aacute=A+acutecomb:top`
    #[arg(long = "composite")]
    pub composites: Vec<String>,

    /// Skip the mkmk feature
    #[arg(long)]
    #[clap(default_value = "false")]
    pub no_mkmk: bool,

    /// Write the final feature text here
    #[arg(long)]
    pub features_out: Option<PathBuf>,

    /// Write a YAML dump of the built font here
    #[arg(long)]
    pub dump_ir: Option<PathBuf>,
}

impl Args {
    /// Fold command line overrides into a loaded configuration.
    pub fn apply(&self, config: &mut BuildConfig) {
        config.composites.extend(self.composites.iter().cloned());
        config
            .features
            .extend(self.prepend_features.iter().map(|path| FeatureSource {
                path: path.clone(),
                prepend: true,
            }));
        config
            .features
            .extend(self.features.iter().map(|path| FeatureSource {
                path: path.clone(),
                prepend: false,
            }));
        if self.no_mkmk {
            config.mkmk = false;
        }
        if self.features_out.is_some() {
            config.features_out = self.features_out.clone();
        }
    }
}
