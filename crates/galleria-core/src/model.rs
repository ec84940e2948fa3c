use serde::{Deserialize, Serialize};

use crate::geom::{Point, point};

/// Functional category of a room. Everything except `Normal` marks the
/// room as a service destination that wayfinding treats specially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    #[default]
    Normal,
    Entrance,
    Exit,
    Restroom,
    Service,
}

impl RoomKind {
    pub fn is_special(self) -> bool {
        !matches!(self, RoomKind::Normal)
    }

    /// Modifier class emitted next to the base room class, if any.
    pub fn class_modifier(self) -> Option<&'static str> {
        match self {
            RoomKind::Normal => None,
            RoomKind::Entrance => Some("entrance"),
            RoomKind::Exit => Some("exit"),
            RoomKind::Restroom => Some("restroom"),
            RoomKind::Service => Some("service"),
        }
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        point(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Serializable point. Computation uses [`crate::geom::Point`]; this type
/// exists so positions survive a serde round trip as plain `x`/`y` fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn as_point(self) -> Point {
        point(self.x, self.y)
    }
}

impl From<Point> for MapPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorSide {
    North,
    South,
    East,
    West,
}

/// A rectangular venue area with a grid position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub row: i32,
    pub col: i32,
    pub kind: RoomKind,
    pub rect: Rect,
}

impl Room {
    /// Door anchor at the midpoint of the given wall. Corridors attach
    /// here and routed polylines pass through here.
    pub fn door(&self, side: DoorSide) -> Point {
        let r = &self.rect;
        match side {
            DoorSide::North => point(r.x + r.width / 2.0, r.y),
            DoorSide::South => point(r.x + r.width / 2.0, r.y + r.height),
            DoorSide::West => point(r.x, r.y + r.height / 2.0),
            DoorSide::East => point(r.x + r.width, r.y + r.height / 2.0),
        }
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn is_special(&self) -> bool {
        self.kind.is_special()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Hallway strip between two grid-adjacent rooms. `room_a` and `room_b`
/// index into the owning map's room list; corridors are always derived,
/// never authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub room_a: usize,
    pub room_b: usize,
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

/// A point of interest placed inside a room.
///
/// `synthetic` exhibits are generated routing endpoints for special rooms;
/// they are invisible and named after their room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exhibit {
    pub name: String,
    /// Index of the owning room.
    pub room: usize,
    /// Declared connection targets, by exhibit name.
    pub connections: Vec<String>,
    pub pos: MapPoint,
    pub visible: bool,
    pub synthetic: bool,
}
