//! The composite glyph notation.
//!
//! `glyph[/dx,dy]=base[+accent[:anchor]]...`, for example
//! `Aacute=A+acutecomb:top` or `ffi=f_f_i`.

use std::{fmt, str::FromStr};

use fontbuild_ir::ir::AccentRef;

use crate::error::Error;

/// A parsed composite description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSpec {
    pub glyph_name: String,
    pub base_name: String,
    pub accents: Vec<AccentRef>,
    /// Horizontal and vertical shift applied after composition.
    pub offset: (i32, i32),
}

impl CompositeSpec {
    /// A base like `f_f_i` names a sequence of glyphs to place side by side.
    pub fn is_assembly(&self) -> bool {
        self.base_name.contains('_')
    }

    /// The glyphs placed side by side in assembly mode.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.base_name.split('_')
    }

    pub fn has_offset(&self) -> bool {
        self.offset != (0, 0)
    }
}

/// Parse one composite description.
pub fn parse(spec: &str) -> Result<CompositeSpec, Error> {
    let malformed = |reason: &str| Error::MalformedSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let (left, right) = spec
        .split_once('=')
        .ok_or_else(|| malformed("expected '='"))?;
    if right.contains('=') {
        return Err(malformed("expected exactly one '='"));
    }

    let (glyph_name, offset) = match left.split_once('/') {
        Some((name, offset)) => {
            let (dx, dy) = offset
                .split_once(',')
                .ok_or_else(|| malformed("offset must be 'dx,dy'"))?;
            let dx = dx.trim().parse::<i32>();
            let dy = dy.trim().parse::<i32>();
            match (dx, dy) {
                (Ok(dx), Ok(dy)) => (name, (dx, dy)),
                _ => return Err(malformed("offset must be two integers")),
            }
        }
        None => (left, (0, 0)),
    };
    let glyph_name = glyph_name.trim();
    if glyph_name.is_empty() {
        return Err(malformed("empty glyph name"));
    }

    let mut parts = right.split('+').map(str::trim);
    let base_name = parts.next().unwrap_or_default();
    if base_name.is_empty() {
        return Err(malformed("empty base glyph"));
    }
    let accents = parts
        .map(|part| {
            let (name, anchor) = match part.split_once(':') {
                Some((name, anchor)) => (name.trim(), Some(anchor.trim())),
                None => (part, None),
            };
            if name.is_empty() {
                return Err(malformed("empty accent name"));
            }
            if anchor.is_some_and(str::is_empty) {
                return Err(malformed("empty anchor name"));
            }
            Ok(AccentRef::new(name, anchor))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompositeSpec {
        glyph_name: glyph_name.to_string(),
        base_name: base_name.to_string(),
        accents,
        offset,
    })
}

impl FromStr for CompositeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for CompositeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyph_name)?;
        if self.has_offset() {
            write!(f, "/{},{}", self.offset.0, self.offset.1)?;
        }
        write!(f, "={}", self.base_name)?;
        for accent in &self.accents {
            write!(f, "+{}", accent.name)?;
            if let Some(anchor) = &accent.anchor {
                write!(f, ":{anchor}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn accented_letter() {
        let spec = parse("Aacute=A+acutecomb:top").unwrap();
        assert_eq!(
            CompositeSpec {
                glyph_name: "Aacute".into(),
                base_name: "A".into(),
                accents: vec![AccentRef::new("acutecomb", Some("top"))],
                offset: (0, 0),
            },
            spec
        );
        assert!(!spec.is_assembly());
    }

    #[test]
    fn offset_and_stacked_accents() {
        let spec = parse("ecircumflexacute/-20,10=e+circumflexcomb:top+acutecomb").unwrap();
        assert_eq!((-20, 10), spec.offset);
        assert_eq!(
            vec![
                AccentRef::new("circumflexcomb", Some("top")),
                AccentRef::new("acutecomb", None)
            ],
            spec.accents
        );
    }

    #[test]
    fn assembly() {
        let spec = parse("f_f_i=f_f_i").unwrap();
        assert!(spec.is_assembly());
        assert_eq!(vec!["f", "f", "i"], spec.parts().collect::<Vec<_>>());
        assert!(spec.accents.is_empty());
    }

    #[rstest]
    #[case::no_equals("Aacute")]
    #[case::two_equals("A=B=C")]
    #[case::empty_glyph("=A+acutecomb")]
    #[case::empty_glyph_with_offset("/1,2=A")]
    #[case::empty_base("Aacute=+acutecomb")]
    #[case::empty_accent("Aacute=A++acutecomb")]
    #[case::empty_anchor("Aacute=A+acutecomb:")]
    #[case::bad_offset("Aacute/1=A")]
    #[case::float_offset("Aacute/1.5,0=A")]
    #[case::word_offset("Aacute/a,b=A")]
    fn malformed(#[case] spec: &str) {
        assert!(
            matches!(parse(spec), Err(Error::MalformedSpec { .. })),
            "{spec} should not parse"
        );
    }

    #[rstest]
    #[case("Aacute=A+acutecomb:top")]
    #[case("uni01C4/30,0=D+Zcaron")]
    #[case("ffi=f_f_i")]
    #[case("ohorntilde=o+horncomb:horn+tildecomb:top")]
    fn display_round_trip(#[case] text: &str) {
        let spec: CompositeSpec = text.parse().unwrap();
        assert_eq!(text, spec.to_string());
        assert_eq!(spec, parse(&spec.to_string()).unwrap());
    }
}
