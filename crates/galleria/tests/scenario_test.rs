//! End-to-end scenario: a minimal two-room venue served by the map
//! service and navigated by the client.

use cicerone::{AddressState, NavEffect, NavEvent, Navigator, NavigatorConfig};
use galleria::render::EdgeMode;
use galleria::service::{MapRequest, MapService, MemoryLayoutStore, MemoryVenueSource};
use galleria::{LayoutDoc, VenueDoc};

const LAYOUT: &str = r#"{"grid":{"A":{"row":0,"col":0},"B":{"row":0,"col":1}}}"#;
const VENUE: &str = r#"{"name":"g","objects":[{"name":"x1","room":"A","connessi":[]}]}"#;

fn service() -> MapService<MemoryLayoutStore, MemoryVenueSource> {
    let mut store = MemoryLayoutStore::new();
    store.insert("g", LayoutDoc::from_json_str(LAYOUT).unwrap());
    let mut source = MemoryVenueSource::new();
    source.insert(VenueDoc::from_json_str(VENUE).unwrap());
    MapService::new(store, source)
}

fn count(svg: &str, needle: &str) -> usize {
    svg.matches(needle).count()
}

#[test]
fn all_mode_yields_two_rooms_one_corridor_one_marker_no_paths() {
    let svg = service()
        .render_map_sync(&MapRequest::new("g").with_mode(EdgeMode::All))
        .unwrap();

    assert_eq!(count(&svg, "class=\"room\""), 2);
    assert_eq!(count(&svg, "class=\"room-label\""), 2);
    assert_eq!(count(&svg, "class=\"corridor\""), 1);
    assert_eq!(count(&svg, "class=\"exhibit\""), 1);
    assert_eq!(count(&svg, "<path "), 0);
}

#[test]
fn a_self_focus_draws_a_single_degenerate_path() {
    let svg = service()
        .render_map_sync(
            &MapRequest::new("g")
                .with_mode(EdgeMode::Path)
                .with_focus("x1", "x1"),
        )
        .unwrap();

    assert_eq!(count(&svg, "class=\"conn\""), 1);
    let d_start = svg.find("d=\"M ").expect("a path d attribute");
    let d_end = svg[d_start + 3..].find('"').unwrap() + d_start + 3;
    let d = &svg[d_start + 3..d_end];
    let coords: Vec<&str> = d
        .split_whitespace()
        .filter(|token| *token != "M" && *token != "L")
        .collect();
    assert_eq!(coords.len(), 4);
    assert_eq!(coords[0], coords[2]);
    assert_eq!(coords[1], coords[3]);
}

#[test]
fn the_served_document_navigates_end_to_end() {
    let svg = service()
        .render_map_sync(&MapRequest::new("g"))
        .unwrap();

    let mut nav = Navigator::new(NavigatorConfig {
        base_document_path: "/maps/g".to_string(),
        default_room: "A".to_string(),
        ..NavigatorConfig::default()
    });
    let effects = nav.handle(NavEvent::Started {
        address: AddressState::default(),
    });
    let seq = effects
        .iter()
        .find_map(|effect| match effect {
            NavEffect::FetchDocument { seq, .. } => Some(*seq),
            _ => None,
        })
        .expect("initial fetch");

    let effects = nav.handle(NavEvent::DocumentLoaded { seq, text: svg });
    let scene = effects
        .iter()
        .find_map(|effect| match effect {
            NavEffect::Render(scene) => Some(scene),
            _ => None,
        })
        .expect("a render effect");

    assert_eq!(scene.room.as_deref(), Some("A"));
    assert_eq!(scene.arrows.len(), 1);
    assert_eq!(scene.arrows[0].room, "B");
    assert_eq!(scene.arrows[0].rotation, 0.0);
    assert!(scene.document.contains("data-room=\"B\""));
    assert!(scene.document.contains("nav-arrow-group"));
}
