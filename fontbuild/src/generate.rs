//! Turn composite descriptions into glyphs.

use std::{fmt, sync::OnceLock};

use fontbuild_ir::{
    ir::{Anchor, Glyph},
    GlyphSource,
};
use indexmap::IndexMap;
use log::{debug, info, warn};
use regex::Regex;

use crate::{
    composite::{self, CompositeSpec},
    error::Error,
};

/// Glyph name to hexadecimal code point, e.g. `"Aacute": "00C1"`.
pub type GlyphList = IndexMap<String, String>;

/// Anchors carried over from the base glyph to a composite.
const MARK_ANCHORS: [&str; 3] = ["top_dd", "bottom_dd", "top0315"];

/// What happened to one composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    Created(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The target glyph is already in the font.
    ExistingGlyph,
}

/// Totals for a batch of composites.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Names of the glyphs that were built, in order.
    pub created: Vec<String>,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} glyph(s) created, {} skipped, {} failed",
            self.created.len(),
            self.skipped,
            self.failed
        )
    }
}

/// Build every composite in order; failures are logged and counted.
pub fn generate_glyphs<S>(font: &mut S, specs: &[String], glyph_list: &GlyphList) -> GenerateReport
where
    S: GlyphSource + ?Sized,
{
    let mut report = GenerateReport::default();
    for text in specs.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let spec = match composite::parse(text) {
            Ok(spec) => spec,
            Err(e) => {
                warn!("{e}");
                report.failed += 1;
                continue;
            }
        };
        match generate_glyph(font, &spec, glyph_list) {
            Ok(Composition::Created(name)) => report.created.push(name),
            Ok(Composition::Skipped(_)) => report.skipped += 1,
            Err(e) => {
                warn!(
                    "Unable to build '{spec}' from base '{}': {e}",
                    spec.base_name
                );
                report.failed += 1;
            }
        }
    }
    info!("{report}");
    report
}

/// Build one composite.
///
/// A target glyph that already exists is never touched. On error the font
/// is left as it was.
pub fn generate_glyph<S>(
    font: &mut S,
    spec: &CompositeSpec,
    glyph_list: &GlyphList,
) -> Result<Composition, Error>
where
    S: GlyphSource + ?Sized,
{
    let name = spec.glyph_name.as_str();
    if font.contains(name) {
        warn!("Glyph '{name}' already exists, skipping '{spec}'");
        return Ok(Composition::Skipped(SkipReason::ExistingGlyph));
    }
    if spec.is_assembly() {
        assemble(font, spec, glyph_list)?;
    } else {
        compose(font, spec, glyph_list)?;
    }
    debug!("Built '{spec}'");
    Ok(Composition::Created(name.to_string()))
}

/// Lay the `_`-separated parts of the base side by side.
fn assemble<S>(font: &mut S, spec: &CompositeSpec, glyph_list: &GlyphList) -> Result<(), Error>
where
    S: GlyphSource + ?Sized,
{
    if !spec.accents.is_empty() {
        debug!("Accents of '{spec}' are ignored when assembling");
    }
    let parts = spec
        .parts()
        .map(|part| {
            font.glyph(part)
                .map(|glyph| (part, glyph.width))
                .ok_or_else(|| fontbuild_ir::Error::MissingGlyph(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let glyph = font.new_glyph(&spec.glyph_name);
    let mut width = 0.0;
    for (part, advance) in parts {
        glyph.append_component(part, (width, 0.0));
        width += advance;
    }
    glyph.width = width;
    glyph.codepoint = unicode_value(&spec.glyph_name, glyph_list);
    Ok(())
}

/// Place accents on the base's anchors.
fn compose<S>(font: &mut S, spec: &CompositeSpec, glyph_list: &GlyphList) -> Result<(), Error>
where
    S: GlyphSource + ?Sized,
{
    let name = spec.glyph_name.as_str();
    let base_anchors = font
        .glyph(&spec.base_name)
        .map(|base| base.anchors.clone())
        .ok_or_else(|| fontbuild_ir::Error::MissingGlyph(spec.base_name.clone()))?;
    font.compile_glyph(name, &spec.base_name, &spec.accents)?;

    let (dx, dy) = spec.offset;
    let correction = f64::from(dx) + f64::from(dy);
    let glyph = font
        .glyph_mut(name)
        .ok_or_else(|| fontbuild_ir::Error::MissingGlyph(name.to_string()))?;
    glyph.codepoint = unicode_value(name, glyph_list);
    copy_mark_anchors(glyph, &base_anchors, correction);
    if spec.has_offset() {
        glyph.width += correction;
        font.move_glyph(name, (f64::from(dx), 0.0), false)?;
    }

    if spec.accents.len() > 1 {
        font.align_components_to_anchors(name, &spec.base_name, &spec.accents)?;
    }
    Ok(())
}

/// The code point for a glyph: from the glyph list, else from a `uniXXXX`
/// name.
pub fn unicode_value(name: &str, glyph_list: &GlyphList) -> Option<u32> {
    static UNI_NAME: OnceLock<Regex> = OnceLock::new();
    if let Some(hex) = glyph_list.get(name) {
        match u32::from_str_radix(hex.trim(), 16) {
            Ok(codepoint) => return Some(codepoint),
            Err(_) => warn!("Glyph list value '{hex}' for '{name}' is not hexadecimal"),
        }
    }
    let uni_name = UNI_NAME.get_or_init(|| Regex::new(r"^uni([0-9A-F]{4})$").unwrap());
    uni_name
        .captures(name)
        .and_then(|captures| u32::from_str_radix(&captures[1], 16).ok())
}

/// Copy the mark anchors of the base, correcting x by `correction`.
///
/// The base's `top` is kept as `parent_top` on spacing modifier letters.
fn copy_mark_anchors(glyph: &mut Glyph, base_anchors: &[Anchor], correction: f64) {
    for anchor in base_anchors {
        if MARK_ANCHORS.contains(&anchor.name.as_str()) {
            glyph.append_anchor(anchor.name.as_str(), anchor.x + correction, anchor.y);
        }
    }
    let is_modifier = glyph.codepoint.is_some_and(is_spacing_modifier);
    if !is_modifier || glyph.has_anchor("parent_top") {
        return;
    }
    if let Some(top) = base_anchors.iter().find(|anchor| anchor.name == "top") {
        glyph.append_anchor("parent_top", top.x, top.y);
    }
}

fn is_spacing_modifier(codepoint: u32) -> bool {
    (0x02B0..=0x02FF).contains(&codepoint)
}
