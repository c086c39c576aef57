//! Synthesize the mark-to-mark positioning feature from anchors.

use std::collections::HashSet;

use fea_filter::{replace_feature, validate};
use fontbuild_ir::GlyphSource;
use log::{debug, info};

use crate::error::Error;

/// One mark-to-mark lookup: accents carrying `accent_anchor` stack on
/// accents carrying `base_anchor`.
struct MarkPass {
    accent_anchor: &'static str,
    base_anchor: &'static str,
    lookup: &'static str,
    class: &'static str,
}

const PASSES: [MarkPass; 2] = [
    MarkPass {
        accent_anchor: "_marktop",
        base_anchor: "mkmktop",
        lookup: "mkmk1",
        class: "@MC_mkmk_top",
    },
    MarkPass {
        accent_anchor: "_markbottom",
        base_anchor: "mkmkbottom_acc",
        lookup: "mkmk2",
        class: "@MC_mkmk_bottom",
    },
];

/// Build `feature mkmk` from the font's anchors and merge it into the
/// font's feature text, replacing any existing `mkmk` feature.
///
/// If no glyph carries a mark anchor, or the merged text fails to validate,
/// the font is left untouched.
pub fn generate_mkmk_feature<S>(font: &mut S) -> Result<(), Error>
where
    S: GlyphSource + ?Sized,
{
    let lookups: Vec<String> = PASSES
        .iter()
        .filter_map(|pass| mark_lookup(&*font, pass))
        .collect();
    if lookups.is_empty() {
        info!("No mark-to-mark anchors, mkmk not generated");
        return Ok(());
    }
    let text = format!("feature mkmk {{\n{}}} mkmk;\n", lookups.concat());
    let merged = replace_feature(font.features(), "mkmk", &text)?;

    let refs: HashSet<String> = font.glyph_names().into_iter().collect();
    let filtered = validate(&merged, refs)?;
    font.set_features(filtered.text);
    Ok(())
}

fn mark_lookup<S>(font: &S, pass: &MarkPass) -> Option<String>
where
    S: GlyphSource + ?Sized,
{
    // anchor coordinates are truncated toward zero
    let marks: Vec<(&str, i64, i64)> = font
        .glyphs()
        .filter_map(|glyph| {
            glyph
                .anchor(pass.accent_anchor)
                .map(|a| (glyph.name.as_str(), a.x as i64, a.y as i64))
        })
        .collect();
    if marks.is_empty() {
        debug!("No '{}' anchors, {} skipped", pass.accent_anchor, pass.lookup);
        return None;
    }

    let mut text = format!("    lookup {} {{\n", pass.lookup);
    for (name, x, y) in &marks {
        text.push_str(&format!(
            "        markClass {name} <anchor {x} {y}> {};\n",
            pass.class
        ));
    }
    for glyph in font.glyphs() {
        if let Some(anchor) = glyph.anchor(pass.base_anchor) {
            text.push_str(&format!(
                "        pos mark {} <anchor {} {}> mark {};\n",
                glyph.name, anchor.x as i64, anchor.y as i64, pass.class
            ));
        }
    }
    text.push_str(&format!("    }} {};\n", pass.lookup));
    Some(text)
}

#[cfg(test)]
mod tests {
    use fontbuild_ir::{ir::Glyph, Font};
    use pretty_assertions::assert_eq;

    use super::*;

    fn glyph(name: &str, anchors: &[(&str, f64, f64)]) -> Glyph {
        let mut glyph = Glyph::new(name);
        for (anchor, x, y) in anchors {
            glyph.append_anchor(*anchor, *x, *y);
        }
        glyph
    }

    fn mark_font() -> Font {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut font = Font::new();
        font.insert_glyph(glyph("a", &[("top", 250.0, 500.0)]));
        font.insert_glyph(glyph("grave", &[("_marktop", 50.0, 450.0)]));
        font.insert_glyph(glyph(
            "circumflexcomb",
            &[("_marktop", 60.5, 450.0), ("mkmktop", 50.0, 700.0)],
        ));
        font.insert_glyph(glyph(
            "cedillacomb",
            &[("_markbottom", 80.0, 0.0), ("mkmkbottom_acc", 80.9, -200.7)],
        ));
        font
    }

    #[test]
    fn top_and_bottom_lookups() {
        let mut font = mark_font();
        generate_mkmk_feature(&mut font).unwrap();
        assert_eq!(
            "feature mkmk {\n    \
                 lookup mkmk1 {\n        \
                     markClass grave <anchor 50 450> @MC_mkmk_top;\n        \
                     markClass circumflexcomb <anchor 60 450> @MC_mkmk_top;\n        \
                     pos mark circumflexcomb <anchor 50 700> mark @MC_mkmk_top;\n    \
                 } mkmk1;\n    \
                 lookup mkmk2 {\n        \
                     markClass cedillacomb <anchor 80 0> @MC_mkmk_bottom;\n        \
                     pos mark cedillacomb <anchor 80 -200> mark @MC_mkmk_bottom;\n    \
                 } mkmk2;\n\
             } mkmk;\n",
            font.features
        );
    }

    #[test]
    fn replaces_existing_feature() {
        let mut font = mark_font();
        font.features =
            "languagesystem DFLT dflt;\nfeature mkmk { pos mark a <anchor 0 0> mark @OLD; } mkmk;\n"
                .to_string();
        generate_mkmk_feature(&mut font).unwrap();
        assert!(font.features.starts_with("languagesystem DFLT dflt;\nfeature mkmk {\n"));
        assert!(!font.features.contains("@OLD"));
        assert_eq!(1, font.features.matches("feature mkmk").count());
    }

    #[test]
    fn base_marks_need_no_accent_anchor() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut font = Font::new();
        font.insert_glyph(glyph("grave", &[("_marktop", 50.0, 450.0)]));
        font.insert_glyph(glyph("circumflexcomb", &[("mkmktop", 50.0, 700.0)]));
        generate_mkmk_feature(&mut font).unwrap();
        assert_eq!(
            "feature mkmk {\n    \
                 lookup mkmk1 {\n        \
                     markClass grave <anchor 50 450> @MC_mkmk_top;\n        \
                     pos mark circumflexcomb <anchor 50 700> mark @MC_mkmk_top;\n    \
                 } mkmk1;\n\
             } mkmk;\n",
            font.features
        );
    }

    #[test]
    fn invalid_existing_text_leaves_font_untouched() {
        let mut font = mark_font();
        font.insert_glyph(glyph("b", &[]));
        font.insert_glyph(glyph("c", &[]));
        font.features = "feature calt { sub a' b by c; } calt;".to_string();
        let before = font.clone();
        let err = generate_mkmk_feature(&mut font).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Features(fea_filter::Error::UnsupportedRule { .. })
            ),
            "{err:?}"
        );
        assert_eq!(before, font);
    }

    #[test]
    fn no_marks_leaves_font_untouched() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut font = Font::new();
        font.insert_glyph(glyph("a", &[("top", 250.0, 500.0)]));
        font.features = "feature liga { sub a a by a; } liga;".to_string();
        let before = font.clone();
        generate_mkmk_feature(&mut font).unwrap();
        assert_eq!(before, font);
    }
}
