//! The SVG document is the only channel between producer and viewer;
//! these tests close the loop through the real client crate.

use cicerone::{Orientation, SceneGraph, arrow_for, compute_links, install_nav_layer};
use galleria::render::{RenderOptions, render_svg};
use galleria::{LayoutDoc, VenueDoc, VenueMap};

const LAYOUT: &str = r#"{
  "grid": {
    "IN":     {"row": 0, "col": 0, "type": "entrance"},
    "Egizi":  {"row": 0, "col": 1},
    "Romani": {"row": 0, "col": 2},
    "WC":     {"row": 1, "col": 0, "type": "restroom"},
    "Quadri": {"row": 1, "col": 1},
    "OUT":    {"row": 1, "col": 2, "type": "exit"}
  }
}"#;

const VENUE: &str = r#"{
  "name": "museo",
  "objects": [
    {"name": "mummia",   "room": "Egizi",  "connessi": ["collana"]},
    {"name": "collana",  "room": "Egizi"},
    {"name": "ritratto", "room": "Quadri", "connessi": ["mummia"]}
  ]
}"#;

fn scene() -> SceneGraph {
    let layout = LayoutDoc::from_json_str(LAYOUT).unwrap();
    let venue = VenueDoc::from_json_str(VENUE).unwrap();
    let map = VenueMap::assemble(&layout, &venue).unwrap();
    let svg = render_svg(&map, &RenderOptions::default()).unwrap();
    let installed = install_nav_layer(&svg).unwrap();
    SceneGraph::parse(&installed).unwrap()
}

#[test]
fn the_client_recovers_the_produced_room_set() {
    let layout = LayoutDoc::from_json_str(LAYOUT).unwrap();
    let venue = VenueDoc::from_json_str(VENUE).unwrap();
    let map = VenueMap::assemble(&layout, &venue).unwrap();
    let svg = render_svg(&map, &RenderOptions::default()).unwrap();
    let scene = SceneGraph::parse(&install_nav_layer(&svg).unwrap()).unwrap();

    let produced: Vec<&str> = map.rooms.iter().map(|room| room.name.as_str()).collect();
    let recovered: Vec<&str> = scene.rooms.iter().map(|room| room.label.as_str()).collect();
    assert_eq!(recovered, produced);
    assert_eq!(scene.corridors.len(), map.corridors.len());
}

#[test]
fn corridor_count_and_orientation_survive_the_trip() {
    let scene = scene();
    assert_eq!(scene.corridors.len(), 7);
    let vertical = scene
        .corridors
        .iter()
        .filter(|corridor| corridor.orientation() == Orientation::Vertical)
        .count();
    assert_eq!(vertical, 3);
}

#[test]
fn room_geometry_survives_the_trip() {
    let scene = scene();
    let entrance = scene.room("IN").expect("entrance recovered");
    assert_eq!(entrance.rect.x, 100.0);
    assert_eq!(entrance.rect.y, 120.0);
    assert_eq!(entrance.rect.width, 220.0);
    assert_eq!(entrance.rect.height, 180.0);
}

#[test]
fn proximity_links_follow_the_produced_corridors() {
    let scene = scene();
    let current = scene.room_index("IN").unwrap();
    let links = compute_links(&scene.rooms, &scene.corridors, current);

    let labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
    assert_eq!(labels, ["Egizi", "WC"]);

    let arrows: Vec<_> = links.iter().map(arrow_for).collect();
    assert_eq!(arrows[0].rotation, 0.0, "east neighbour, arrow points right");
    assert_eq!(arrows[1].rotation, 90.0, "south neighbour, arrow points down");
}

#[test]
fn interior_rooms_link_in_every_grid_direction() {
    let scene = scene();
    let current = scene.room_index("Quadri").unwrap();
    let links = compute_links(&scene.rooms, &scene.corridors, current);

    let mut labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(labels, ["Egizi", "OUT", "WC"]);
}
