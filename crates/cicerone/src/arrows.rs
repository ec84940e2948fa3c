//! Directional arrow overlays and viewport framing.
//!
//! The arrow glyph is a right-pointing image; rotation and a fixed
//! backward offset place it just outside the corridor mouth, pointing
//! at the target room. The overlay markup and its animation values are
//! part of the viewer's visual contract.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, ViewBox};
use crate::link::Link;
use crate::scene::Orientation;

/// Backward offset from the corridor mouth, along the move direction.
pub const ARROW_OFFSET: f64 = 35.0;
/// Rendered glyph edge length.
pub const ARROW_SIZE: f64 = 40.0;
/// Default glyph image reference.
pub const DEFAULT_ARROW_HREF: &str = "/icons/arrow-right.png";

const BASE_PAD: f64 = 60.0;

/// Visible viewport the framing pad is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// One positioned arrow; `room` is the navigation payload bound to the
/// glyph's hit target.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub room: String,
    pub anchor: Point,
    pub rotation: f64,
}

/// Rotation for a right-pointing glyph: vertical corridors point up or
/// down the screen, horizontal ones left or right.
pub fn arrow_rotation(link: &Link) -> f64 {
    match link.corridor.orientation() {
        Orientation::Vertical => {
            if link.to.y - link.from.y > 0.0 {
                90.0
            } else {
                -90.0
            }
        }
        Orientation::Horizontal => {
            if link.to.x - link.from.x > 0.0 {
                0.0
            } else {
                180.0
            }
        }
    }
}

/// Glyph placement: the corridor mouth pulled back by [`ARROW_OFFSET`]
/// along the normalized move direction.
pub fn arrow_anchor(link: &Link) -> Point {
    let dx = link.to.x - link.from.x;
    let dy = link.to.y - link.from.y;
    let len = dx.hypot(dy);
    let len = if len == 0.0 { 1.0 } else { len };
    Point {
        x: link.from.x - dx / len * ARROW_OFFSET,
        y: link.from.y - dy / len * ARROW_OFFSET,
    }
}

pub fn arrow_for(link: &Link) -> Arrow {
    Arrow {
        room: link.label.clone(),
        anchor: arrow_anchor(link),
        rotation: arrow_rotation(link),
    }
}

/// Zoom rectangle around a room. Small rooms get proportionally more
/// padding so zoom levels stay visually consistent across room sizes.
pub fn frame_room(rect: Rect, viewport: Viewport) -> ViewBox {
    let w_ratio = rect.width / viewport.width;
    let h_ratio = rect.height / viewport.height;
    let pad = BASE_PAD * (0.5 / w_ratio.min(h_ratio)).max(1.0);
    ViewBox {
        x: rect.x - pad,
        y: rect.y - pad,
        width: rect.width + 2.0 * pad,
        height: rect.height + 2.0 * pad,
    }
}

/// Serializes the arrow groups for the nav layer. The half-size
/// recentering translate, the 7-unit nudge loop and the opacity pulse
/// reproduce the reference overlay exactly.
pub fn overlay_markup(arrows: &[Arrow], href: &str) -> String {
    let mut out = String::new();
    for arrow in arrows {
        let _ = write!(
            out,
            "<g class=\"nav-arrow-group\" data-room=\"{}\" transform=\"translate({}, {}) rotate({}) translate(-20, -20)\">",
            escape_xml(&arrow.room),
            arrow.anchor.x,
            arrow.anchor.y,
            arrow.rotation,
        );
        let _ = write!(
            out,
            "<image class=\"nav-arrow-img\" href=\"{}\" x=\"0\" y=\"0\" width=\"40\" height=\"40\"/>",
            escape_xml(href),
        );
        out.push_str(
            "<animateTransform attributeName=\"transform\" type=\"translate\" additive=\"sum\" \
             values=\"0 0; 7 0; 0 0\" dur=\"1.6s\" repeatCount=\"indefinite\"/>",
        );
        out.push_str(
            "<animate attributeName=\"opacity\" values=\"1; 0.75; 1\" dur=\"1.6s\" repeatCount=\"indefinite\"/>",
        );
        out.push_str("</g>");
    }
    out
}

/// Splices `overlay` into the empty nav layer container and rewrites
/// the root view box. Expects the container produced by
/// [`crate::scene::install_nav_layer`].
pub fn apply_overlay(document: &str, overlay: &str, view_box: ViewBox) -> Result<String> {
    const MARKER: &str = "<g id=\"nav-layer\"/>";
    if !document.contains(MARKER) {
        return Err(Error::MissingNavLayer);
    }
    let filled = format!("<g id=\"nav-layer\">{overlay}</g>");
    let out = document.replacen(MARKER, &filled, 1);
    Ok(rewrite_view_box(&out, view_box))
}

fn rewrite_view_box(document: &str, view_box: ViewBox) -> String {
    let value = view_box.to_attr();
    let Some(svg_at) = document.find("<svg") else {
        return document.to_string();
    };
    let tag_end = document[svg_at..]
        .find('>')
        .map(|i| svg_at + i)
        .unwrap_or(document.len());
    if let Some(attr_rel) = document[svg_at..tag_end].find("viewBox=\"") {
        let value_start = svg_at + attr_rel + "viewBox=\"".len();
        if let Some(close_rel) = document[value_start..].find('"') {
            let mut out = String::with_capacity(document.len() + 16);
            out.push_str(&document[..value_start]);
            out.push_str(&value);
            out.push_str(&document[value_start + close_rel..]);
            return out;
        }
    }
    // root had no view box
    let mut out = String::with_capacity(document.len() + 24);
    out.push_str(&document[..svg_at + 4]);
    let _ = write!(out, " viewBox=\"{value}\"");
    out.push_str(&document[svg_at + 4..]);
    out
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
