#![forbid(unsafe_code)]

//! Client-side wayfinding over venue floor-plan documents.
//!
//! `cicerone` is the viewer half of the floor-plan protocol. It never
//! talks to the map producer: rooms and corridors are re-derived by
//! parsing the delivered SVG through the shared markup-class vocabulary
//! (`room`, `room-label`, `corridor`), since no structured sidecar
//! travels with the document.
//!
//! The pipeline runs per navigation event: [`scene`] extracts the
//! geometry, [`link`] finds which neighbouring rooms are reachable from
//! the current one, [`arrows`] renders the directional overlay and the
//! zoom framing, and [`navigator`] keeps all of it synchronized with
//! addressable back/forward state. The crate performs no I/O; the
//! navigator expresses fetches, history writes and renders as effects.

pub mod arrows;
pub mod error;
pub mod geom;
pub mod link;
pub mod navigator;
pub mod scene;

pub use arrows::{
    ARROW_OFFSET, ARROW_SIZE, Arrow, DEFAULT_ARROW_HREF, Viewport, apply_overlay, arrow_anchor,
    arrow_for, arrow_rotation, frame_room, overlay_markup,
};
pub use error::{Error, Result};
pub use geom::{Point, Rect, ViewBox};
pub use link::{Link, PROXIMITY_THRESHOLD, compute_links};
pub use navigator::{
    AddressState, NavEffect, NavEvent, NavScene, NavState, Navigator, NavigatorConfig,
};
pub use scene::{
    Corridor, DEFAULT_VIEW_BOX, NAV_LAYER_ID, Orientation, Room, SceneGraph, install_nav_layer,
};
