//! Grid placement arithmetic.
//!
//! All constants here are wire-format constants shared with the viewer
//! side; they cannot change without breaking deployed clients.

use rustc_hash::FxHashMap;

use crate::geom::{Point, vector};
use crate::model::{Corridor, DoorSide, Rect, Room};

pub const ROOM_WIDTH: f64 = 220.0;
pub const ROOM_HEIGHT: f64 = 180.0;
pub const ORIGIN_X: f64 = 100.0;
pub const ORIGIN_Y: f64 = 120.0;
pub const GAP_X: f64 = 120.0;
pub const GAP_Y: f64 = 140.0;
pub const CORRIDOR_THICKNESS: f64 = 40.0;

/// Fraction of the smaller room dimension used as the exhibit ring radius.
pub const EXHIBIT_RING_FACTOR: f64 = 0.3;

/// Pixel rectangle for a grid cell.
pub fn room_rect(row: i32, col: i32) -> Rect {
    Rect {
        x: ORIGIN_X + f64::from(col) * (ROOM_WIDTH + GAP_X),
        y: ORIGIN_Y + f64::from(row) * (ROOM_HEIGHT + GAP_Y),
        width: ROOM_WIDTH,
        height: ROOM_HEIGHT,
    }
}

/// Derives the corridor set for laid-out rooms.
///
/// One corridor per grid adjacency, scanning east (same row, col + 1) and
/// south (row + 1, same col) from each room in order. The strip spans the
/// gap between the two facing door anchors and is centered on them. No
/// corridor is created diagonally or across empty cells.
pub fn derive_corridors(rooms: &[Room]) -> Vec<Corridor> {
    let mut by_cell: FxHashMap<(i32, i32), usize> = FxHashMap::default();
    for (i, room) in rooms.iter().enumerate() {
        by_cell.insert((room.row, room.col), i);
    }

    let mut corridors = Vec::new();
    for (i, room) in rooms.iter().enumerate() {
        if let Some(&j) = by_cell.get(&(room.row, room.col + 1)) {
            let east = room.door(DoorSide::East);
            let west = rooms[j].door(DoorSide::West);
            corridors.push(Corridor {
                room_a: i,
                room_b: j,
                rect: Rect {
                    x: east.x,
                    y: east.y - CORRIDOR_THICKNESS / 2.0,
                    width: west.x - east.x,
                    height: CORRIDOR_THICKNESS,
                },
            });
        }
        if let Some(&j) = by_cell.get(&(room.row + 1, room.col)) {
            let south = room.door(DoorSide::South);
            let north = rooms[j].door(DoorSide::North);
            corridors.push(Corridor {
                room_a: i,
                room_b: j,
                rect: Rect {
                    x: south.x - CORRIDOR_THICKNESS / 2.0,
                    y: south.y,
                    width: CORRIDOR_THICKNESS,
                    height: north.y - south.y,
                },
            });
        }
    }
    corridors
}

/// Positions for `count` exhibits spread evenly on a ring around the room
/// center, starting at angle zero.
pub fn exhibit_ring(rect: &Rect, count: usize) -> Vec<Point> {
    let center = rect.center();
    let radius = rect.width.min(rect.height) * EXHIBIT_RING_FACTOR;
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            center + vector(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
