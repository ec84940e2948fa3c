#![forbid(unsafe_code)]

//! Venue floor-plan model and wayfinding core (headless).
//!
//! Design goals:
//! - deterministic geometry: identical input documents always produce
//!   identical pixel output and identical routes
//! - immutable value records built by pure transformation passes; nothing
//!   is cached or mutated across requests
//! - document order is authoritative: the layout grid's entry order drives
//!   room ordering, corridor creation order and BFS tie-breaking

pub mod doc;
pub mod error;
pub mod geom;
pub mod graph;
pub mod layout;
pub mod map;
pub mod model;
pub mod route;

pub use doc::{ExhibitDecl, GridCell, LayoutDoc, LayoutFile, VenueDoc, layout_file_from_json_str};
pub use error::{Classification, Error, Result};
pub use graph::{ExhibitGraph, RoomGraph};
pub use map::VenueMap;
pub use model::{Corridor, DoorSide, Exhibit, MapPoint, Orientation, Rect, Room, RoomKind};
pub use route::exhibit_route;
