use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{font::Font, ir::Glyph};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FontSerdeRepr {
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    #[serde(default)]
    pub features: String,
}

impl From<FontSerdeRepr> for Font {
    fn from(from: FontSerdeRepr) -> Self {
        let glyphs: IndexMap<_, _> = from
            .glyphs
            .into_iter()
            .map(|glyph| (glyph.name.clone(), glyph))
            .collect();
        Font::from_parts(glyphs, from.features)
    }
}

impl From<Font> for FontSerdeRepr {
    fn from(from: Font) -> Self {
        let (glyphs, features) = from.into_parts();
        FontSerdeRepr {
            glyphs: glyphs.into_values().collect(),
            features,
        }
    }
}
