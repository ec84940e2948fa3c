//! Reconstruction of rooms and corridors from a delivered floor-plan
//! document.
//!
//! The producer serializes the navigation graph as markup classes only;
//! no structured sidecar exists. Two matching rules are part of that
//! protocol and must not be "cleaned up":
//!
//! - room rectangles and labels match by *substring* on the class
//!   attribute (the rect class carries modifiers like `room entrance`),
//!   scanning direct children of the root in document order;
//! - corridors match by class *token* anywhere in the tree.

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, ViewBox};

/// Id of the container element the arrow overlay is spliced into.
pub const NAV_LAYER_ID: &str = "nav-layer";

const NAV_LAYER_MARKER: &str = "<g id=\"nav-layer\"/>";

/// Framing used when the document carries no root view box and no room
/// matches the requested one.
pub const DEFAULT_VIEW_BOX: ViewBox = ViewBox {
    x: 0.0,
    y: 0.0,
    width: 1200.0,
    height: 1780.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub label: String,
    pub rect: Rect,
}

impl Room {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corridor {
    pub rect: Rect,
}

impl Corridor {
    pub fn orientation(&self) -> Orientation {
        if self.rect.height > self.rect.width {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Rooms and corridors recovered from one document, in document order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    /// The document's own root view box, if it declares one.
    pub view_box: Option<ViewBox>,
}

/// Ensures the document carries the nav layer container, splicing an
/// empty one before the closing root tag when absent. Extraction and
/// overlay application both require the container to exist.
pub fn install_nav_layer(svg_text: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(svg_text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(Error::NoSvgRoot);
    }
    let present = root
        .descendants()
        .any(|node| node.is_element() && node.attribute("id") == Some(NAV_LAYER_ID));
    if present {
        return Ok(svg_text.to_string());
    }
    if let Some(at) = svg_text.rfind("</svg>") {
        let mut out = String::with_capacity(svg_text.len() + NAV_LAYER_MARKER.len());
        out.push_str(&svg_text[..at]);
        out.push_str(NAV_LAYER_MARKER);
        out.push_str(&svg_text[at..]);
        return Ok(out);
    }
    // self-closing root: expand it around the container
    let Some(close) = svg_text.rfind("/>") else {
        return Err(Error::NoSvgRoot);
    };
    let mut out = String::with_capacity(svg_text.len() + NAV_LAYER_MARKER.len() + 8);
    out.push_str(&svg_text[..close]);
    out.push('>');
    out.push_str(NAV_LAYER_MARKER);
    out.push_str("</svg>");
    out.push_str(&svg_text[close + 2..]);
    Ok(out)
}

impl SceneGraph {
    pub fn parse(svg_text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(svg_text)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(Error::NoSvgRoot);
        }
        let layered = root
            .descendants()
            .any(|node| node.is_element() && node.attribute("id") == Some(NAV_LAYER_ID));
        if !layered {
            return Err(Error::MissingNavLayer);
        }

        let view_box = root.attribute("viewBox").and_then(ViewBox::parse_attr);

        // Room matcher: the most recent direct-child rect whose class
        // contains "room" is armed; any other rect disarms it. A later
        // room-label text binds to the armed rect. A successful match
        // does not disarm.
        let mut rooms = Vec::new();
        let mut armed: Option<Rect> = None;
        for node in root.children().filter(|n| n.is_element()) {
            let class = node.attribute("class").unwrap_or_default();
            match node.tag_name().name() {
                "rect" => {
                    armed = if class.contains("room") {
                        Some(rect_of(&node))
                    } else {
                        None
                    };
                }
                "text" if class.contains("room-label") => {
                    if let Some(rect) = armed {
                        let label = node.text().unwrap_or_default().trim();
                        if !label.is_empty() {
                            rooms.push(Room {
                                label: label.to_string(),
                                rect,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        let corridors = root
            .descendants()
            .filter(|n| {
                n.is_element()
                    && n.tag_name().name() == "rect"
                    && class_has_token(n.attribute("class"), "corridor")
            })
            .map(|n| Corridor { rect: rect_of(&n) })
            .collect();

        Ok(Self {
            rooms,
            corridors,
            view_box,
        })
    }

    /// Looks a room up by case-insensitive, trimmed label equality.
    pub fn room_index(&self, name: &str) -> Option<usize> {
        let want = name.trim().to_lowercase();
        self.rooms
            .iter()
            .position(|room| room.label.trim().to_lowercase() == want)
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.room_index(name).map(|index| &self.rooms[index])
    }
}

fn rect_of(node: &roxmltree::Node) -> Rect {
    let attr = |name: &str| {
        node.attribute(name)
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Rect {
        x: attr("x"),
        y: attr("y"),
        width: attr("width"),
        height: attr("height"),
    }
}

fn class_has_token(class: Option<&str>, token: &str) -> bool {
    class
        .unwrap_or_default()
        .split_whitespace()
        .any(|t| t == token)
}
