use galleria::render::EdgeMode;
use galleria::service::{
    FileLayoutStore, LayoutStore, MapRequest, MapService, MemoryLayoutStore, MemoryVenueSource,
    ServiceError, SourceError, StoreError, VenueSource,
};
use galleria::{Classification, LayoutDoc, VenueDoc};

const LAYOUT: &str =
    r#"{"grid":{"IN":{"row":0,"col":0,"type":"entrance"},"Egizi":{"row":0,"col":1}}}"#;
const VENUE: &str = r#"{
  "name": "museo",
  "objects": [
    {"name": "mummia", "room": "Egizi", "connessi": ["collana"]},
    {"name": "collana", "room": "Egizi"}
  ]
}"#;

fn service() -> MapService<MemoryLayoutStore, MemoryVenueSource> {
    let mut store = MemoryLayoutStore::new();
    store.insert("museo", LayoutDoc::from_json_str(LAYOUT).unwrap());
    let mut source = MemoryVenueSource::new();
    source.insert(VenueDoc::from_json_str(VENUE).unwrap());
    MapService::new(store, source)
}

struct DownStore;

impl LayoutStore for DownStore {
    fn layout(&self, _venue: &str) -> Result<Option<LayoutDoc>, StoreError> {
        Err(StoreError::Unavailable {
            message: "connection refused".to_string(),
        })
    }
}

struct DownSource;

impl VenueSource for DownSource {
    fn venue(&self, _name: &str) -> Result<Option<VenueDoc>, SourceError> {
        Err(SourceError {
            message: "timeout after 2s".to_string(),
        })
    }
}

#[test]
fn renders_a_known_venue() {
    let svg = service()
        .render_map_sync(&MapRequest::new("museo"))
        .unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"class="room entrance""#));
    assert!(svg.contains("mummia"));
}

#[test]
fn missing_layout_is_not_found() {
    let err = service()
        .render_map_sync(&MapRequest::new("pinacoteca"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::LayoutMissing { .. }));
    assert_eq!(err.classification(), Classification::NotFound);
    assert!(err.to_string().contains("pinacoteca"));
}

#[test]
fn unknown_venue_upstream_is_not_found_never_internal() {
    let mut store = MemoryLayoutStore::new();
    store.insert("museo", LayoutDoc::from_json_str(LAYOUT).unwrap());
    let service = MapService::new(store, MemoryVenueSource::new());

    let err = service
        .render_map_sync(&MapRequest::new("museo"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::VenueUnknown { .. }));
    assert_eq!(err.classification(), Classification::NotFound);
}

#[test]
fn store_outage_is_upstream_unavailable() {
    let service = MapService::new(DownStore, MemoryVenueSource::new());
    let err = service
        .render_map_sync(&MapRequest::new("museo"))
        .unwrap_err();
    assert_eq!(err.classification(), Classification::UpstreamUnavailable);
}

#[test]
fn source_outage_is_upstream_unavailable() {
    let mut store = MemoryLayoutStore::new();
    store.insert("museo", LayoutDoc::from_json_str(LAYOUT).unwrap());
    let service = MapService::new(store, DownSource);

    let err = service
        .render_map_sync(&MapRequest::new("museo"))
        .unwrap_err();
    assert_eq!(err.classification(), Classification::UpstreamUnavailable);
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn exhibit_in_unknown_room_is_invalid_input() {
    let mut store = MemoryLayoutStore::new();
    store.insert("museo", LayoutDoc::from_json_str(LAYOUT).unwrap());
    let mut source = MemoryVenueSource::new();
    source.insert(
        VenueDoc::from_json_str(
            r#"{"name":"museo","objects":[{"name":"sirena","room":"Atlantide"}]}"#,
        )
        .unwrap(),
    );
    let service = MapService::new(store, source);

    let err = service
        .render_map_sync(&MapRequest::new("museo"))
        .unwrap_err();
    assert_eq!(err.classification(), Classification::InvalidInput);
    assert!(err.to_string().contains("Atlantide"));
}

#[test]
fn focus_route_flows_through_the_request() {
    let request = MapRequest::new("museo")
        .with_mode(EdgeMode::Path)
        .with_focus("mummia", "collana");
    let svg = service().render_map_sync(&request).unwrap();
    assert!(svg.contains(r#"class="conn""#));
}

#[test]
fn async_entry_point_matches_sync() {
    let service = service();
    let request = MapRequest::new("museo").with_mode(EdgeMode::All);
    let sync = service.render_map_sync(&request).unwrap();
    let wrapped = futures::executor::block_on(service.render_map(&request)).unwrap();
    assert_eq!(wrapped, sync);
}

#[test]
fn file_store_reads_the_venue_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    std::fs::write(&path, format!(r#"{{"museo":{}}}"#, LAYOUT)).unwrap();

    let store = FileLayoutStore::new(&path);
    let layout = store.layout("museo").unwrap().unwrap();
    assert_eq!(layout.grid.len(), 2);
    assert!(store.layout("altro").unwrap().is_none());
}

#[test]
fn file_store_flags_invalid_entries_per_venue() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    std::fs::write(&path, r#"{"museo":{"grid":"rotto"}}"#).unwrap();

    let store = FileLayoutStore::new(&path);
    let err = store.layout("museo").unwrap_err();
    assert!(matches!(err, StoreError::InvalidDocument { .. }));
    assert_eq!(
        ServiceError::from(err).classification(),
        Classification::InvalidInput
    );
}

#[test]
fn file_store_missing_file_is_unavailable() {
    let store = FileLayoutStore::new("/nonexistent/layout.json");
    let err = store.layout("museo").unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
}
