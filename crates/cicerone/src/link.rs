//! Proximity linking: which rooms can the visitor walk to from here.

use crate::geom::{Point, distance};
use crate::scene::{Corridor, Room};

/// Distance (in document units) within which corridors and rooms count
/// as reachable. Protocol constant.
pub const PROXIMITY_THRESHOLD: f64 = 230.0;

/// One candidate move: an arrow at a corridor mouth pointing at a
/// neighbouring room.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Corridor center the move starts from.
    pub from: Point,
    /// Center of the target room.
    pub to: Point,
    /// Label of the target room.
    pub label: String,
    pub corridor: Corridor,
}

/// Computes every link reachable from the room at `current`.
///
/// A corridor qualifies unless its center is strictly farther than the
/// threshold from the current room's center; every other room strictly
/// within the threshold of a qualifying corridor's center yields one
/// link. Rooms reachable through two corridors get two links, one per
/// corridor: each corridor is a distinct physical route, so no dedup.
pub fn compute_links(rooms: &[Room], corridors: &[Corridor], current: usize) -> Vec<Link> {
    let Some(origin) = rooms.get(current) else {
        return Vec::new();
    };
    let origin_center = origin.center();

    let mut links = Vec::new();
    for corridor in corridors {
        let mouth = corridor.center();
        if distance(origin_center, mouth) > PROXIMITY_THRESHOLD {
            continue;
        }
        for (index, room) in rooms.iter().enumerate() {
            if index == current {
                continue;
            }
            let target = room.center();
            if distance(mouth, target) < PROXIMITY_THRESHOLD {
                links.push(Link {
                    from: mouth,
                    to: target,
                    label: room.label.clone(),
                    corridor: *corridor,
                });
            }
        }
    }
    links
}
