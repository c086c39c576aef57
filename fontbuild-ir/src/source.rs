//! The operations composite generation needs from a font.

use std::collections::HashMap;

use log::{debug, warn};

use crate::{
    error::Error,
    ir::{AccentRef, Glyph},
};

/// Anchor an untagged accent attaches to.
pub const DEFAULT_ATTACHMENT: &str = "top";

/// Glyph storage plus the handful of composite-building operations.
///
/// Implementors provide lookup, creation and the feature text; the
/// composite operations are built on top of those.
pub trait GlyphSource {
    fn glyph(&self, name: &str) -> Option<&Glyph>;

    fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph>;

    /// All glyphs, in font order.
    fn glyphs(&self) -> Box<dyn Iterator<Item = &Glyph> + '_>;

    /// Create an empty glyph, replacing any existing glyph of the same name.
    fn new_glyph(&mut self, name: &str) -> &mut Glyph;

    fn features(&self) -> &str;

    fn set_features(&mut self, text: String);

    fn contains(&self, name: &str) -> bool {
        self.glyph(name).is_some()
    }

    fn glyph_names(&self) -> Vec<String> {
        self.glyphs().map(|g| g.name.clone()).collect()
    }

    /// Build `name` from a `base` component plus accents placed on anchors.
    ///
    /// Each accent is shifted so its `_<tag>` anchor lands on the `<tag>`
    /// anchor of what is below it. Non-attachment anchors of a placed
    /// accent replace those of the base, so a second accent on the same tag
    /// stacks on the first. Nothing is written unless every required base
    /// anchor exists.
    fn compile_glyph(&mut self, name: &str, base: &str, accents: &[AccentRef]) -> Result<(), Error> {
        let base_glyph = self
            .glyph(base)
            .ok_or_else(|| Error::MissingGlyph(base.to_string()))?;
        let width = base_glyph.width;
        let mut anchors: HashMap<String, (f64, f64)> = base_glyph
            .anchors
            .iter()
            .map(|a| (a.name.clone(), a.position()))
            .collect();

        let mut placed = Vec::with_capacity(accents.len());
        for accent in accents {
            let tag = accent.anchor.as_deref().unwrap_or(DEFAULT_ATTACHMENT);
            let accent_glyph = self
                .glyph(&accent.name)
                .ok_or_else(|| Error::MissingGlyph(accent.name.clone()))?;
            let Some(mark) = accent_glyph.anchor(&format!("_{tag}")) else {
                warn!(
                    "Accent '{}' has no '_{tag}' anchor, not placed in '{name}'",
                    accent.name
                );
                continue;
            };
            let (x, y) = anchors
                .get(tag)
                .copied()
                .ok_or_else(|| Error::MissingAnchor {
                    glyph: base.to_string(),
                    anchor: tag.to_string(),
                })?;
            let shift = (x - mark.x, y - mark.y);
            for anchor in accent_glyph.anchors.iter() {
                if !anchor.name.starts_with('_') {
                    anchors.insert(anchor.name.clone(), (anchor.x + shift.0, anchor.y + shift.1));
                }
            }
            placed.push((accent.name.clone(), shift));
        }

        let glyph = self.new_glyph(name);
        glyph.width = width;
        glyph.append_component(base, (0.0, 0.0));
        for (accent, shift) in placed {
            glyph.append_component(accent, shift);
        }
        debug!("Compiled '{name}' from '{base}' and {} accent(s)", accents.len());
        Ok(())
    }

    /// Move a glyph's outline and components, and its anchors if asked.
    fn move_glyph(&mut self, name: &str, (dx, dy): (f64, f64), anchors: bool) -> Result<(), Error> {
        let glyph = self
            .glyph_mut(name)
            .ok_or_else(|| Error::MissingGlyph(name.to_string()))?;
        glyph.translate(dx, dy, anchors);
        Ok(())
    }

    /// Re-seat each tagged accent component on the base's own anchors.
    ///
    /// Accents whose anchors cannot be found are left where they are. When an
    /// accent carries a mark-to-mark anchor the composite's matching
    /// `top`/`bottom` anchor is moved onto it.
    fn align_components_to_anchors(
        &mut self,
        name: &str,
        base: &str,
        accents: &[AccentRef],
    ) -> Result<(), Error> {
        if !self.contains(name) {
            return Err(Error::MissingGlyph(name.to_string()));
        }
        for accent in accents {
            let Some(tag) = accent.anchor.as_deref() else {
                continue;
            };
            let (Some(base_glyph), Some(accent_glyph)) = (self.glyph(base), self.glyph(&accent.name))
            else {
                debug!("Skipping alignment of '{}' in '{name}'", accent.name);
                continue;
            };
            let (Some(target), Some(mark)) =
                (base_glyph.anchor(tag), accent_glyph.anchor(&format!("_{tag}")))
            else {
                continue;
            };
            let offset = (target.x - mark.x, target.y - mark.y);
            let mkmk = mark_to_mark_anchor(tag).and_then(|(acc_name, replaces)| {
                accent_glyph
                    .anchor(acc_name)
                    .map(|a| (replaces, a.x + offset.0.trunc(), a.y + offset.1.trunc()))
            });

            let Some(glyph) = self.glyph_mut(name) else {
                continue;
            };
            match glyph.component_mut(&accent.name) {
                Some(component) => component.set_offset(offset),
                None => continue,
            }
            if let Some((replaces, x, y)) = mkmk {
                glyph.remove_anchor(replaces);
                glyph.append_anchor(replaces, x, y);
            }
        }
        Ok(())
    }
}

/// For an attachment tag, the accent anchor that carries the next mark and
/// the composite anchor it replaces.
fn mark_to_mark_anchor(tag: &str) -> Option<(&'static str, &'static str)> {
    match tag {
        "top" => Some(("mkmktop_acc", "top")),
        "bottom" | "bottomu" => Some(("mkmkbottom_acc", "bottom")),
        _ => None,
    }
}
