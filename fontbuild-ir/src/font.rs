//! An in-memory font.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::Error, ir::Glyph, serde::FontSerdeRepr, source::GlyphSource};

/// Glyphs in font order plus the feature file text.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(from = "FontSerdeRepr", into = "FontSerdeRepr")]
pub struct Font {
    glyphs: IndexMap<String, Glyph>,
    /// The font's OpenType feature file, as text.
    pub features: String,
}

impl Font {
    pub fn new() -> Font {
        Default::default()
    }

    pub(crate) fn from_parts(glyphs: IndexMap<String, Glyph>, features: String) -> Font {
        Font { glyphs, features }
    }

    pub(crate) fn into_parts(self) -> (IndexMap<String, Glyph>, String) {
        (self.glyphs, self.features)
    }

    /// Add a glyph, replacing any existing glyph with the same name.
    pub fn insert_glyph(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.name.clone(), glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn from_yaml(yml: &str) -> Result<Font, Error> {
        serde_yaml::from_str(yml).map_err(Into::into)
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

impl GlyphSource for Font {
    fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    fn glyph_mut(&mut self, name: &str) -> Option<&mut Glyph> {
        self.glyphs.get_mut(name)
    }

    fn glyphs(&self) -> Box<dyn Iterator<Item = &Glyph> + '_> {
        Box::new(self.glyphs.values())
    }

    fn new_glyph(&mut self, name: &str) -> &mut Glyph {
        self.glyphs.insert(name.to_string(), Glyph::new(name));
        // we just put it there
        &mut self.glyphs[name]
    }

    fn features(&self) -> &str {
        &self.features
    }

    fn set_features(&mut self, text: String) {
        self.features = text;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FONT_YAML: &str = "\
glyphs:
- name: a
  width: 500
  codepoint: 97
  anchors:
  - name: top
    x: 250
    y: 500
- name: grave
  anchors:
  - name: _top
    x: 100
    y: 450
features: |
  languagesystem DFLT dflt;
";

    #[test]
    fn load_from_yaml_keeps_order() {
        let font = Font::from_yaml(FONT_YAML).unwrap();
        assert_eq!(
            vec!["a", "grave"],
            font.glyph_names().iter().map(String::as_str).collect::<Vec<_>>()
        );
        assert_eq!(Some(97), font.glyph("a").unwrap().codepoint);
        assert_eq!("languagesystem DFLT dflt;\n", font.features());
    }

    #[test]
    fn yaml_round_trip() {
        let font = Font::from_yaml(FONT_YAML).unwrap();
        let yml = font.to_yaml().unwrap();
        assert_eq!(font, Font::from_yaml(&yml).unwrap());
    }

    #[test]
    fn new_glyph_replaces() {
        let mut font = Font::from_yaml(FONT_YAML).unwrap();
        font.new_glyph("a").width = 10.0;
        assert_eq!(2, font.len());
        assert!(font.glyph("a").unwrap().anchors.is_empty());
        assert_eq!(10.0, font.glyph("a").unwrap().width);
    }
}
