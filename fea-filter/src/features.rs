//! Reading, merging and writing the feature text stored on a font.

use std::{collections::HashSet, fs, path::Path};

use fontbuild_ir::GlyphSource;
use log::{debug, info};
use regex::{NoExpand, Regex};

use crate::{diagnostic::Diagnostic, error::Error, filter::validate};

/// Replace the `feature <name> { ... } <name>;` block in the font's feature
/// text with `value`, or append `value` if there is no such block.
pub fn update_feature<S>(font: &mut S, name: &str, value: &str) -> Result<(), Error>
where
    S: GlyphSource + ?Sized,
{
    let updated = replace_feature(font.features(), name, value)?;
    font.set_features(updated);
    Ok(())
}

/// `text` with its `feature <name>` block replaced by `value`, or with
/// `value` appended if there is no such block.
pub fn replace_feature(text: &str, name: &str, value: &str) -> Result<String, Error> {
    let tag = regex::escape(name);
    let block = Regex::new(&format!(r"(?s)\bfeature\s+{tag}\s*\{{.*?\}}\s*{tag}\s*;"))?;
    if block.is_match(text) {
        debug!("Replacing feature {name}");
        Ok(block.replace_all(text, NoExpand(value)).into_owned())
    } else {
        debug!("Appending feature {name}");
        Ok(format!("{text}\n{value}"))
    }
}

/// Merge `text` with the font's feature text and keep only what is valid
/// against the font's glyphs.
///
/// With `prepend` the new text comes first, so its declarations win over
/// the font's own; otherwise the font's existing declarations win.
pub fn read_feature_file<S>(font: &mut S, text: &str, prepend: bool) -> Result<Vec<Diagnostic>, Error>
where
    S: GlyphSource + ?Sized,
{
    let existing = font.features();
    let combined = if prepend {
        format!("{text}\n{existing}")
    } else {
        format!("{existing}\n{text}")
    };
    let refs: HashSet<String> = font.glyph_names().into_iter().collect();
    let filtered = validate(&combined, refs)?;
    info!(
        "Merged feature text, {} statement(s) dropped",
        filtered.diagnostics.iter().filter(|d| d.is_warning()).count()
    );
    font.set_features(filtered.text);
    Ok(filtered.diagnostics)
}

/// Read a feature file from disk and merge it with [`read_feature_file`].
pub fn read_feature_path<S>(font: &mut S, path: &Path, prepend: bool) -> Result<Vec<Diagnostic>, Error>
where
    S: GlyphSource + ?Sized,
{
    let text = fs::read_to_string(path).map_err(|source| Error::FileIo {
        path: path.to_path_buf(),
        source,
    })?;
    read_feature_file(font, &text, prepend)
}

/// Write the font's feature text to `path`.
pub fn write_feature_file<S>(font: &S, path: &Path) -> Result<(), Error>
where
    S: GlyphSource + ?Sized,
{
    fs::write(path, font.features()).map_err(|source| Error::FileIo {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use fontbuild_ir::{ir::Glyph, Font};
    use pretty_assertions::assert_eq;

    use super::*;

    fn font_with(names: &[&str], features: &str) -> Font {
        let mut font = Font::new();
        for name in names {
            font.insert_glyph(Glyph::new(*name));
        }
        font.features = features.to_string();
        font
    }

    #[test]
    fn update_replaces_existing_block() {
        let mut font = font_with(
            &[],
            "feature mkmk {\n    lookup mkmk1 {\n    } mkmk1;\n} mkmk;\nfeature mkmkx { } mkmkx;",
        );
        update_feature(&mut font, "mkmk", "feature mkmk { pos $1; } mkmk;").unwrap();
        assert_eq!(
            "feature mkmk { pos $1; } mkmk;\nfeature mkmkx { } mkmkx;",
            font.features
        );
    }

    #[test]
    fn update_appends_missing_block() {
        let mut font = font_with(&[], "languagesystem DFLT dflt;");
        update_feature(&mut font, "mkmk", "feature mkmk { } mkmk;").unwrap();
        assert_eq!(
            "languagesystem DFLT dflt;\nfeature mkmk { } mkmk;",
            font.features
        );
    }

    #[test]
    fn prepended_text_wins() {
        let mut font = font_with(&["a", "a.alt", "a.ss01"], "feature salt { sub a by a.alt; } salt;");
        read_feature_file(&mut font, "feature salt { sub a by a.ss01; } salt;", true).unwrap();
        assert_eq!(
            "feature salt {\n    sub a by a.ss01;\n} salt;\n",
            font.features
        );
    }

    #[test]
    fn existing_text_wins_when_appending() {
        let mut font = font_with(&["a", "a.alt", "a.ss01"], "feature salt { sub a by a.alt; } salt;");
        let diagnostics =
            read_feature_file(&mut font, "feature salt { sub a by a.ss01; } salt;", false).unwrap();
        assert_eq!(
            "feature salt {\n    sub a by a.alt;\n} salt;\n",
            font.features
        );
        assert!(diagnostics.iter().all(|d| !d.is_warning()));
    }

    #[test]
    fn unknown_glyphs_are_dropped() {
        let mut font = font_with(&["a"], "");
        let diagnostics = read_feature_file(&mut font, "sub a by a.missing;", false).unwrap();
        assert_eq!(";\n", font.features);
        assert_eq!(Some("a.missing"), diagnostics[0].reference());
    }

    #[test]
    fn write_then_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.fea");
        let font = font_with(&["a", "b"], "sub a by b;\n");
        write_feature_file(&font, &path).unwrap();

        let mut other = font_with(&["a", "b"], "");
        read_feature_path(&mut other, &path, false).unwrap();
        assert_eq!("sub a by b;\n", other.features);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut font = font_with(&[], "");
        assert!(matches!(
            read_feature_path(&mut font, &dir.path().join("nope.fea"), false),
            Err(Error::FileIo { .. })
        ));
    }
}
