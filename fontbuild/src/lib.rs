//! Composite glyph synthesis and feature merging for a font build.
//!
//! [`build`] runs the whole pipeline over a [`Font`]: composites are built
//! from their descriptions, feature files are merged and filtered against
//! the glyph set, and the mkmk feature is synthesized from anchors.

#[cfg(feature = "cli")]
mod args;
pub mod composite;
mod config;
mod error;
pub mod generate;
pub mod mkmk;
pub mod ufo;

use std::fmt;

use fea_filter::{read_feature_path, write_feature_file};
use fontbuild_ir::Font;
use log::info;

#[cfg(feature = "cli")]
pub use args::Args;
pub use composite::CompositeSpec;
pub use config::{BuildConfig, FeatureSource};
pub use error::Error;
pub use generate::{generate_glyph, generate_glyphs, Composition, GenerateReport, GlyphList};
pub use mkmk::generate_mkmk_feature;

/// The outcome of [`build`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub glyphs: GenerateReport,
    /// Feature statements or class members dropped for undefined references.
    pub dropped_statements: usize,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; {} feature statement(s) dropped",
            self.glyphs, self.dropped_statements
        )
    }
}

/// Build composites, merge feature files, then synthesize mkmk.
pub fn build(font: &mut Font, config: &BuildConfig) -> Result<BuildReport, Error> {
    let glyphs = generate_glyphs(font, &config.composites, &config.glyph_list);

    let mut dropped_statements = 0;
    for source in &config.features {
        info!("Merging {}", source.path.display());
        let diagnostics = read_feature_path(font, &source.path, source.prepend)?;
        dropped_statements += diagnostics.iter().filter(|d| d.is_warning()).count();
    }

    if config.mkmk {
        generate_mkmk_feature(font)?;
    }
    if let Some(path) = &config.features_out {
        write_feature_file(font, path)?;
    }

    Ok(BuildReport {
        glyphs,
        dropped_statements,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use fontbuild_ir::GlyphSource;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    const FONT: &str = r#"
glyphs:
  - name: a
    width: 500
    anchors:
      - { name: top, x: 250, y: 500 }
  - name: gravecomb
    anchors:
      - { name: _top, x: 100, y: 450 }
      - { name: _marktop, x: 100, y: 450 }
  - name: acutecomb
    anchors:
      - { name: _top, x: 90, y: 450 }
      - { name: _marktop, x: 90, y: 450 }
      - { name: mkmktop, x: 90, y: 650 }
features: |
  languagesystem DFLT dflt;
"#;

    #[test]
    fn full_build() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().unwrap();
        let fea = temp_dir.path().join("extra.fea");
        fs::write(
            &fea,
            "feature ccmp {\n sub a gravecomb by agrave;\n sub a tildecomb by atilde;\n} ccmp;\n",
        )
        .unwrap();
        let out = temp_dir.path().join("out.fea");

        let mut font = Font::from_yaml(FONT).unwrap();
        let config = BuildConfig {
            composites: vec![
                "agrave=a+gravecomb:top".into(),
                "aacute=a+acutecomb:top".into(),
                "atilde=a+tildecomb:top".into(),
            ],
            glyph_list: GlyphList::from([("agrave".to_string(), "00E0".to_string())]),
            features: vec![FeatureSource {
                path: fea,
                prepend: false,
            }],
            features_out: Some(out.clone()),
            ..Default::default()
        };
        let report = build(&mut font, &config).unwrap();

        assert_eq!(vec!["agrave".to_string(), "aacute".to_string()], report.glyphs.created);
        assert_eq!(1, report.glyphs.failed);
        assert_eq!(1, report.dropped_statements);
        assert_eq!(Some(0xE0), font.glyph("agrave").unwrap().codepoint);

        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(font.features, text);
        assert!(text.starts_with("languagesystem DFLT dflt;\nfeature ccmp {\n    sub a gravecomb by agrave;\n    ;\n} ccmp;\n"));
        assert!(text.contains("pos mark acutecomb <anchor 90 650> mark @MC_mkmk_top;"));
    }

    #[test]
    fn rebuild_is_a_no_op() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut font = Font::from_yaml(FONT).unwrap();
        let config = BuildConfig {
            composites: vec!["agrave=a+gravecomb:top".into()],
            ..Default::default()
        };
        build(&mut font, &config).unwrap();
        let once = font.clone();
        let report = build(&mut font, &config).unwrap();
        assert_eq!(1, report.glyphs.skipped);
        assert_eq!(once, font);
    }
}
