//! Serde types for the font object model.

use serde::{Deserialize, Serialize};

/// A single glyph: advance, outline, components and anchors.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Glyph {
    pub name: String,
    /// Advance width.
    #[serde(default)]
    pub width: f64,
    /// The unicode value assigned to this glyph, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codepoint: Option<u32>,
    /// Named attachment points, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<Anchor>,
    /// List of glyph components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    /// List of glyph contours.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contours: Vec<Contour>,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Self {
        Glyph {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The first anchor with the given name.
    pub fn anchor(&self, name: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|anchor| anchor.name == name)
    }

    pub fn has_anchor(&self, name: &str) -> bool {
        self.anchor(name).is_some()
    }

    pub fn append_anchor(&mut self, name: impl Into<String>, x: f64, y: f64) {
        self.anchors.push(Anchor::new(name, x, y));
    }

    /// Remove the first anchor with the given name, returning it.
    pub fn remove_anchor(&mut self, name: &str) -> Option<Anchor> {
        let idx = self.anchors.iter().position(|anchor| anchor.name == name)?;
        Some(self.anchors.remove(idx))
    }

    pub fn append_component(&mut self, base: impl Into<String>, offset: (f64, f64)) {
        self.components.push(Component::new(base, offset));
    }

    /// The first component referencing `base`.
    pub fn component_mut(&mut self, base: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.base == base)
    }

    /// Shift contours and components, and optionally anchors.
    pub fn translate(&mut self, dx: f64, dy: f64, anchors: bool) {
        for point in self.contours.iter_mut().flatten() {
            point.x += dx;
            point.y += dy;
        }
        for component in self.components.iter_mut() {
            component.transform.dx += dx;
            component.transform.dy += dy;
        }
        if anchors {
            for anchor in self.anchors.iter_mut() {
                anchor.x += dx;
                anchor.y += dy;
            }
        }
    }
}

/// A named attachment point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Anchor {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// One accent of a composite: the accent glyph and the anchor it attaches to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccentRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl AccentRef {
    pub fn new(name: impl Into<String>, anchor: Option<&str>) -> Self {
        AccentRef {
            name: name.into(),
            anchor: anchor.map(Into::into),
        }
    }
}

/// A single glyph contour consisting of a list of points.
pub type Contour = Vec<ContourPoint>;

/// A single point in a glyph contour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    pub typ: PointType,
}

/// Possible types of a point in a glyph contour, following UFO GLIF semantics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum PointType {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

/// A single glyph component, reference to another glyph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Component {
    /// The name of the referenced glyph.
    pub base: String,
    /// Affine transformation to apply to the referenced glyph.
    #[serde(default)]
    pub transform: Affine2x3,
}

impl Component {
    pub fn new(base: impl Into<String>, (dx, dy): (f64, f64)) -> Self {
        Component {
            base: base.into(),
            transform: Affine2x3::translate(dx, dy),
        }
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.transform.dx, self.transform.dy)
    }

    pub fn set_offset(&mut self, (dx, dy): (f64, f64)) {
        self.transform.dx = dx;
        self.transform.dy = dy;
    }
}

/// A 2×3 affine transformation matrix.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Affine2x3 {
    /// x-component of transformed x-basis vector.
    pub xx: f64,
    /// y-component of transformed x-basis vector.
    pub yx: f64,
    /// x-component of transformed y-basis vector.
    pub xy: f64,
    /// y-component of transformed y-basis vector.
    pub yy: f64,
    /// x-component of translation vector.
    pub dx: f64,
    /// y-component of translation vector.
    pub dy: f64,
}

impl Affine2x3 {
    pub fn translate(dx: f64, dy: f64) -> Self {
        Affine2x3 {
            xx: 1.0,
            yx: 0.0,
            xy: 0.0,
            yy: 1.0,
            dx,
            dy,
        }
    }
}

impl Default for Affine2x3 {
    fn default() -> Self {
        Affine2x3::translate(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_glyph() -> Glyph {
        let mut glyph = Glyph::new("acutecomb");
        glyph.width = 0.0;
        glyph.append_anchor("_top", 100.0, 500.0);
        glyph.append_anchor("top", 100.0, 700.0);
        glyph.contours.push(vec![
            ContourPoint {
                x: 80.0,
                y: 520.0,
                typ: PointType::Line,
            },
            ContourPoint {
                x: 140.0,
                y: 680.0,
                typ: PointType::Line,
            },
        ]);
        glyph
    }

    #[test]
    fn glyph_yaml() {
        let glyph = test_glyph();
        let yml = serde_yaml::to_string(&glyph).unwrap();
        assert_eq!(glyph, serde_yaml::from_str(&yml).unwrap());
    }

    #[test]
    fn minimal_glyph_yaml() {
        let glyph: Glyph = serde_yaml::from_str("name: space\nwidth: 250\n").unwrap();
        assert_eq!(Glyph::new("space").name, glyph.name);
        assert_eq!(250.0, glyph.width);
        assert!(glyph.anchors.is_empty());
        assert_eq!(None, glyph.codepoint);
    }

    #[test]
    fn translate_skips_anchors_when_asked() {
        let mut glyph = test_glyph();
        glyph.append_component("a", (0.0, 0.0));
        glyph.translate(20.0, 5.0, false);

        assert_eq!((100.0, 500.0), glyph.anchor("_top").unwrap().position());
        assert_eq!((20.0, 5.0), glyph.components[0].offset());
        assert_eq!(100.0, glyph.contours[0][0].x);
        assert_eq!(525.0, glyph.contours[0][0].y);
    }

    #[test]
    fn remove_first_matching_anchor() {
        let mut glyph = test_glyph();
        glyph.append_anchor("top", 0.0, 0.0);
        let removed = glyph.remove_anchor("top").unwrap();
        assert_eq!((100.0, 700.0), removed.position());
        assert_eq!((0.0, 0.0), glyph.anchor("top").unwrap().position());
    }
}
