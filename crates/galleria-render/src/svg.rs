//! SVG document synthesis.
//!
//! Emission order is part of the wire contract: each room rect is
//! immediately followed by its label text, corridors come after all
//! rooms, connection paths after corridors, and visible exhibits last
//! (on top of everything). The viewer reconstructs the navigation graph
//! from exactly this structure.

use std::fmt::Write as _;

use galleria_core::geom::Point;
use galleria_core::{RoomGraph, VenueMap, exhibit_route};
use rustc_hash::FxHashSet;

use crate::{EdgeMode, RenderOptions, Result};

/// Empty border around the bounding box of all rooms.
const MARGIN: f64 = 200.0;

const STYLE: &str = r#".room { fill:#fff; stroke:#2c3e50; stroke-width:3; }
.room.entrance { fill:#a9dfbf; stroke:#2ecc71; }
.room.exit { fill:#f5b7b1; stroke:#e74c3c; }
.room.restroom { fill:#aed6f1; stroke:#3498db; }
.room.service { fill:#fad7a0; stroke:#f39c12; }

.room-label { font:bold 14px Arial; fill:#2c3e50; }

.corridor { fill:#ecf0f1; stroke:#95a5a6; stroke-width:2; }

.exhibit { fill:#3498db; stroke:#2980b9; stroke-width:2; }
.exhibit-label { font:10px Arial; fill:black; text-anchor:middle; pointer-events:none; }

.conn {
  stroke:#e74c3c;
  stroke-width:4;
  fill:none;
  stroke-linecap:round;
  stroke-dasharray:12 10;
  animation: flow-red 1.2s linear infinite;
}

.conn-debug {
  stroke:black;
  stroke-width:3;
  fill:none;
  stroke-linecap:round;
  stroke-dasharray:6 6;
  animation: flow-black 0.9s linear infinite;
  opacity:0.85;
}

@keyframes flow-red {
  from { stroke-dashoffset: 0; }
  to   { stroke-dashoffset: -22; }
}

@keyframes flow-black {
  from { stroke-dashoffset: 0; }
  to   { stroke-dashoffset: -12; }
}
"#;

/// Renders a laid-out venue to an SVG document.
///
/// Pure: no I/O, fully determined by the map and options. The only
/// failure mode is route synthesis over disconnected rooms; no partial
/// document is returned in that case.
pub fn render_svg(map: &VenueMap, options: &RenderOptions) -> Result<String> {
    let width = map
        .rooms
        .iter()
        .map(|r| r.rect.right())
        .fold(0.0, f64::max)
        + MARGIN;
    let height = map
        .rooms
        .iter()
        .map(|r| r.rect.bottom())
        .fold(0.0, f64::max)
        + MARGIN;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = fmt(width),
        h = fmt(height),
    );
    out.push_str("\n<defs>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</defs>");

    for room in &map.rooms {
        let class = match room.kind.class_modifier() {
            Some(modifier) => format!("room {modifier}"),
            None => "room".to_string(),
        };
        let _ = write!(
            &mut out,
            r#"{nl}<rect x="{}" y="{}" width="{}" height="{}" rx="8" class="{}"/>"#,
            fmt(room.rect.x),
            fmt(room.rect.y),
            fmt(room.rect.width),
            fmt(room.rect.height),
            class,
            nl = '\n',
        );
        let _ = write!(
            &mut out,
            r#"{nl}<text x="{}" y="{}" class="room-label" text-anchor="middle">{}</text>"#,
            fmt(room.rect.x + room.rect.width / 2.0),
            fmt(room.rect.y + 16.0),
            escape_xml(&room.name),
            nl = '\n',
        );
    }

    for corridor in &map.corridors {
        let _ = write!(
            &mut out,
            r#"{nl}<rect x="{}" y="{}" width="{}" height="{}" class="corridor"/>"#,
            fmt(corridor.rect.x),
            fmt(corridor.rect.y),
            fmt(corridor.rect.width),
            fmt(corridor.rect.height),
            nl = '\n',
        );
    }

    render_connections(&mut out, map, options)?;

    for exhibit in &map.exhibits {
        if !exhibit.visible {
            continue;
        }
        let _ = write!(
            &mut out,
            r#"{nl}<circle cx="{}" cy="{}" r="10" class="exhibit"/>"#,
            fmt(exhibit.pos.x),
            fmt(exhibit.pos.y),
            nl = '\n',
        );
        let _ = write!(
            &mut out,
            r#"{nl}<text x="{}" y="{}" class="exhibit-label">{}</text>"#,
            fmt(exhibit.pos.x),
            fmt(exhibit.pos.y + 3.0),
            escape_xml(&exhibit.name),
            nl = '\n',
        );
    }

    out.push_str("\n</svg>");
    Ok(out)
}

fn render_connections(out: &mut String, map: &VenueMap, options: &RenderOptions) -> Result<()> {
    if options.mode == EdgeMode::None {
        return Ok(());
    }
    let rooms = RoomGraph::build(map);

    if options.mode == EdgeMode::Path {
        let Some((from, to)) = &options.focus else {
            return Ok(());
        };
        // unknown focus names silently draw nothing
        let (Some(a), Some(b)) = (map.exhibit_index(from), map.exhibit_index(to)) else {
            return Ok(());
        };
        let pts = exhibit_route(map, &rooms, a, b)?;
        let class = if map.exhibit_is_special(&map.exhibits[a])
            || map.exhibit_is_special(&map.exhibits[b])
        {
            "conn-debug"
        } else {
            "conn"
        };
        write_conn_path(out, &pts, class);
        return Ok(());
    }

    for (a, b, class) in classified_edges(map) {
        if options.mode == EdgeMode::Services && class == "conn" {
            continue;
        }
        let pts = exhibit_route(map, &rooms, a, b)?;
        write_conn_path(out, &pts, class);
    }
    Ok(())
}

/// Edge list for the full-graph modes, in discovery order.
///
/// Declared connections between two normal-room exhibits classify as
/// `conn`; every exhibit additionally pairs with every special-room
/// exhibit as `conn-debug`. Unordered pairs are drawn at most once, the
/// first classification winning.
fn classified_edges(map: &VenueMap) -> Vec<(usize, usize, &'static str)> {
    let specials: Vec<usize> = (0..map.exhibits.len())
        .filter(|&i| map.exhibit_is_special(&map.exhibits[i]))
        .collect();

    let mut drawn: FxHashSet<(String, String)> = FxHashSet::default();
    let mut edges = Vec::new();

    for (i, exhibit) in map.exhibits.iter().enumerate() {
        if !map.exhibit_is_special(exhibit) {
            for name in &exhibit.connections {
                let Some(t) = map.exhibit_index(name) else {
                    continue;
                };
                if map.exhibit_is_special(&map.exhibits[t]) {
                    continue;
                }
                if mark_drawn(&mut drawn, &exhibit.name, &map.exhibits[t].name) {
                    edges.push((i, t, "conn"));
                }
            }
        }
        for &s in &specials {
            if s == i {
                continue;
            }
            if mark_drawn(&mut drawn, &exhibit.name, &map.exhibits[s].name) {
                edges.push((i, s, "conn-debug"));
            }
        }
    }
    edges
}

fn mark_drawn(drawn: &mut FxHashSet<(String, String)>, a: &str, b: &str) -> bool {
    let key = if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    };
    drawn.insert(key)
}

fn write_conn_path(out: &mut String, pts: &[Point], class: &str) {
    let mut d = String::new();
    for (i, p) in pts.iter().enumerate() {
        if i == 0 {
            let _ = write!(&mut d, "M {:.1} {:.1}", p.x, p.y);
        } else {
            let _ = write!(&mut d, " L {:.1} {:.1}", p.x, p.y);
        }
    }
    let _ = write!(out, "\n<path d=\"{d}\" class=\"{class}\"/>");
}

fn fmt(v: f64) -> String {
    // Render numbers the way a JS writer would stringify them: a
    // round-trippable decimal form without `-0` or tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
