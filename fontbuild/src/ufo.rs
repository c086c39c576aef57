//! Move glyphs and features between a UFO and a [`Font`].

use std::path::Path;

use fontbuild_ir::{ir, Font, GlyphSource};
use log::debug;

use crate::error::Error;

/// Load a UFO from disk.
pub fn load(path: &Path) -> Result<norad::Font, Error> {
    if !path.exists() {
        return Err(Error::FileExpected(path.to_path_buf()));
    }
    norad::Font::load(path).map_err(|source| Error::UfoLoad {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save(ufo: &norad::Font, path: &Path) -> Result<(), Error> {
    ufo.save(path).map_err(|source| Error::UfoWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// The default layer and feature text of a UFO.
pub fn to_ir(ufo: &norad::Font) -> Font {
    let mut font = Font::new();
    for glyph in ufo.default_layer().iter() {
        font.insert_glyph(to_ir_glyph(glyph));
    }
    font.features = ufo.features.clone();
    font
}

/// Write the named glyphs and the feature text back into the UFO.
///
/// Glyphs not named are left as the UFO has them.
pub fn apply(ufo: &mut norad::Font, font: &Font, names: &[String]) -> Result<(), Error> {
    let layer = ufo.default_layer_mut();
    for name in names {
        let glyph = font
            .glyph(name)
            .ok_or_else(|| fontbuild_ir::Error::MissingGlyph(name.clone()))?;
        layer.insert_glyph(to_norad_glyph(glyph)?);
        debug!("Wrote '{name}' to the default layer");
    }
    ufo.features = font.features().to_string();
    Ok(())
}

fn to_ir_point_type(typ: &norad::PointType) -> ir::PointType {
    match typ {
        norad::PointType::Move => ir::PointType::Move,
        norad::PointType::Line => ir::PointType::Line,
        norad::PointType::OffCurve => ir::PointType::OffCurve,
        norad::PointType::QCurve => ir::PointType::QCurve,
        norad::PointType::Curve => ir::PointType::Curve,
    }
}

fn to_norad_point_type(typ: &ir::PointType) -> norad::PointType {
    match typ {
        ir::PointType::Move => norad::PointType::Move,
        ir::PointType::Line => norad::PointType::Line,
        ir::PointType::OffCurve => norad::PointType::OffCurve,
        ir::PointType::QCurve => norad::PointType::QCurve,
        ir::PointType::Curve => norad::PointType::Curve,
    }
}

fn to_ir_contour(contour: &norad::Contour) -> ir::Contour {
    contour
        .points
        .iter()
        .map(|point| ir::ContourPoint {
            x: point.x,
            y: point.y,
            typ: to_ir_point_type(&point.typ),
        })
        .collect()
}

fn to_ir_component(component: &norad::Component) -> ir::Component {
    ir::Component {
        base: component.base.to_string(),
        transform: ir::Affine2x3 {
            xx: component.transform.x_scale,
            yx: component.transform.yx_scale,
            xy: component.transform.xy_scale,
            yy: component.transform.y_scale,
            dx: component.transform.x_offset,
            dy: component.transform.y_offset,
        },
    }
}

fn to_ir_glyph(glyph: &norad::Glyph) -> ir::Glyph {
    let mut ir_glyph = ir::Glyph::new(glyph.name().to_string());
    ir_glyph.width = glyph.width;
    ir_glyph.codepoint = glyph.codepoints.iter().next().map(u32::from);
    ir_glyph.anchors = glyph
        .anchors
        .iter()
        .filter_map(|anchor| {
            let name = anchor.name.as_ref()?;
            Some(ir::Anchor::new(name.to_string(), anchor.x, anchor.y))
        })
        .collect();
    ir_glyph.components = glyph.components.iter().map(to_ir_component).collect();
    ir_glyph.contours = glyph.contours.iter().map(to_ir_contour).collect();
    ir_glyph
}

fn norad_name(name: &str) -> Result<norad::Name, Error> {
    name.parse::<norad::Name>()
        .map_err(|_| Error::InvalidName(name.to_string()))
}

fn to_norad_glyph(glyph: &ir::Glyph) -> Result<norad::Glyph, Error> {
    let mut norad_glyph = norad::Glyph::new(&glyph.name);
    norad_glyph.width = glyph.width;
    if let Some(c) = glyph.codepoint.and_then(char::from_u32) {
        norad_glyph.codepoints.insert(c);
    }
    for anchor in &glyph.anchors {
        norad_glyph.anchors.push(norad::Anchor::new(
            anchor.x,
            anchor.y,
            Some(norad_name(&anchor.name)?),
            None,
            None,
        ));
    }
    for component in &glyph.components {
        let t = &component.transform;
        let transform = norad::AffineTransform {
            x_scale: t.xx,
            xy_scale: t.xy,
            yx_scale: t.yx,
            y_scale: t.yy,
            x_offset: t.dx,
            y_offset: t.dy,
        };
        norad_glyph.components.push(norad::Component::new(
            norad_name(&component.base)?,
            transform,
            None,
        ));
    }
    for contour in &glyph.contours {
        let points = contour
            .iter()
            .map(|p| norad::ContourPoint::new(p.x, p.y, to_norad_point_type(&p.typ), false, None, None))
            .collect();
        norad_glyph.contours.push(norad::Contour::new(points, None));
    }
    Ok(norad_glyph)
}
