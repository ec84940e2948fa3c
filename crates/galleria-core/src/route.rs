//! Connection polylines between exhibits.

use crate::geom::Point;
use crate::graph::RoomGraph;
use crate::map::VenueMap;
use crate::model::{DoorSide, Room};
use crate::{Error, Result};

/// Waypoints for the connection between two exhibits, by exhibit index.
///
/// Resolves the BFS room path between the owning rooms, then walks each
/// hop through the facing door anchor, the corridor midpoint and the far
/// door anchor, inserting intermediate room centers for longer paths. The
/// first and last waypoints are the exhibit positions themselves; two
/// exhibits in the same room connect directly.
pub fn exhibit_route(
    map: &VenueMap,
    rooms: &RoomGraph,
    from: usize,
    to: usize,
) -> Result<Vec<Point>> {
    let a = &map.exhibits[from];
    let b = &map.exhibits[to];
    let path = rooms.shortest_path(a.room, b.room)?;

    let mut pts = vec![a.pos.as_point()];
    for (i, pair) in path.windows(2).enumerate() {
        let room_a = &map.rooms[pair[0]];
        let room_b = &map.rooms[pair[1]];

        pts.push(room_a.door(door_towards(room_a, room_b)));

        let Some(ci) = rooms.corridor_between(pair[0], pair[1]) else {
            return Err(Error::NoRoute {
                from: room_a.name.clone(),
                to: room_b.name.clone(),
            });
        };
        pts.push(map.corridors[ci].center());

        pts.push(room_b.door(door_towards(room_b, room_a)));

        if i + 1 < path.len() - 1 {
            pts.push(room_b.center());
        }
    }
    pts.push(b.pos.as_point());
    Ok(pts)
}

fn door_towards(from: &Room, towards: &Room) -> DoorSide {
    if towards.col > from.col {
        DoorSide::East
    } else if towards.col < from.col {
        DoorSide::West
    } else if towards.row > from.row {
        DoorSide::South
    } else {
        DoorSide::North
    }
}
