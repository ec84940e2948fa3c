//! Map service over abstract layout-store and venue-source collaborators.
//!
//! This is the seam a transport mounts: [`MapService::render_map_sync`]
//! pulls the two input documents for a venue, assembles the map and
//! returns the SVG text. Every failure path carries a
//! [`Classification`] so the transport can pick a status code without
//! matching on messages.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, warn};

use galleria_core::{Classification, LayoutDoc, VenueDoc, VenueMap};

use crate::render::{EdgeMode, RenderOptions, render_svg};

/// One map request, as a transport would decode it. Mode defaults to
/// [`EdgeMode::Path`] and the focus to none, matching the query-less GET.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub venue: String,
    pub mode: EdgeMode,
    pub focus: Option<(String, String)>,
}

impl MapRequest {
    pub fn new(venue: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            mode: EdgeMode::default(),
            focus: None,
        }
    }

    pub fn with_mode(mut self, mode: EdgeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_focus(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.focus = Some((from.into(), to.into()));
        self
    }
}

/// Failure inside the layout store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or read at all.
    #[error("layout store unavailable: {message}")]
    Unavailable { message: String },
    /// The store answered, but what it holds for the venue is not a
    /// usable layout document.
    #[error("stored layout for venue '{venue}' is invalid: {message}")]
    InvalidDocument { venue: String, message: String },
}

/// Failure reaching or decoding the venue catalogue upstream. Decode
/// failures count as unavailability: a collaborator that answers with
/// garbage is as unusable as one that does not answer.
#[derive(Debug, thiserror::Error)]
#[error("venue source unavailable: {message}")]
pub struct SourceError {
    pub message: String,
}

/// Read-only layout lookup. `Ok(None)` means the store holds no layout
/// for the venue; an error means the store itself could not answer.
/// Implementations own their timeouts and are expected to return in
/// bounded time.
pub trait LayoutStore {
    fn layout(&self, venue: &str) -> std::result::Result<Option<LayoutDoc>, StoreError>;
}

/// Read-only venue catalogue lookup. Same contract as [`LayoutStore`]:
/// `Ok(None)` is an unknown venue, an error is a collaborator failure.
pub trait VenueSource {
    fn venue(&self, name: &str) -> std::result::Result<Option<VenueDoc>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no layout stored for venue '{venue}'")]
    LayoutMissing { venue: String },
    #[error("unknown venue '{venue}'")]
    VenueUnknown { venue: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Map(#[from] galleria_core::Error),
    #[error(transparent)]
    Render(#[from] galleria_render::Error),
}

impl ServiceError {
    /// Transport-agnostic failure class. An unknown venue is a
    /// [`Classification::NotFound`], never an internal fault; a stored
    /// document that cannot be used is invalid input, not unavailability.
    pub fn classification(&self) -> Classification {
        match self {
            ServiceError::LayoutMissing { .. } | ServiceError::VenueUnknown { .. } => {
                Classification::NotFound
            }
            ServiceError::Store(StoreError::Unavailable { .. }) | ServiceError::Source(_) => {
                Classification::UpstreamUnavailable
            }
            ServiceError::Store(StoreError::InvalidDocument { .. }) => Classification::InvalidInput,
            ServiceError::Map(err) => err.classification(),
            ServiceError::Render(err) => err.classification(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Stateless orchestration over the two collaborators. Each call pulls
/// fresh documents and assembles from scratch; the service caches
/// nothing.
#[derive(Debug, Clone)]
pub struct MapService<L, V> {
    layout_store: L,
    venue_source: V,
}

impl<L: LayoutStore, V: VenueSource> MapService<L, V> {
    pub fn new(layout_store: L, venue_source: V) -> Self {
        Self {
            layout_store,
            venue_source,
        }
    }

    pub fn render_map_sync(&self, request: &MapRequest) -> Result<String> {
        let layout = match self.layout_store.layout(&request.venue) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!("No layout stored for venue '{}'", request.venue);
                return Err(ServiceError::LayoutMissing {
                    venue: request.venue.clone(),
                });
            }
            Err(err) => {
                warn!("Layout store failed for venue '{}': {}", request.venue, err);
                return Err(err.into());
            }
        };
        let venue = match self.venue_source.venue(&request.venue) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                warn!("Venue '{}' not in the catalogue", request.venue);
                return Err(ServiceError::VenueUnknown {
                    venue: request.venue.clone(),
                });
            }
            Err(err) => {
                warn!("Venue source failed for '{}': {}", request.venue, err);
                return Err(err.into());
            }
        };

        let map = VenueMap::assemble(&layout, &venue)?;
        debug!(
            "Rendering venue '{}' in {} mode",
            request.venue,
            request.mode.as_str()
        );
        let svg = render_svg(
            &map,
            &RenderOptions {
                mode: request.mode,
                focus: request.focus.clone(),
            },
        )?;
        Ok(svg)
    }

    pub async fn render_map(&self, request: &MapRequest) -> Result<String> {
        self.render_map_sync(request)
    }
}

/// In-memory layout store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutStore {
    layouts: IndexMap<String, LayoutDoc>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, venue: impl Into<String>, layout: LayoutDoc) {
        self.layouts.insert(venue.into(), layout);
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn layout(&self, venue: &str) -> std::result::Result<Option<LayoutDoc>, StoreError> {
        Ok(self.layouts.get(venue).cloned())
    }
}

/// In-memory venue catalogue for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryVenueSource {
    venues: IndexMap<String, VenueDoc>,
}

impl MemoryVenueSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, venue: VenueDoc) {
        self.venues.insert(venue.name.clone(), venue);
    }
}

impl VenueSource for MemoryVenueSource {
    fn venue(&self, name: &str) -> std::result::Result<Option<VenueDoc>, SourceError> {
        Ok(self.venues.get(name).cloned())
    }
}

/// Layout store backed by a single JSON file mapping venue names to
/// layout documents. The file is re-read on every lookup; edits show up
/// without restarting the embedding process.
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    path: PathBuf,
}

impl FileLayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LayoutStore for FileLayoutStore {
    fn layout(&self, venue: &str) -> std::result::Result<Option<LayoutDoc>, StoreError> {
        let text = std::fs::read_to_string(&self.path).map_err(|err| StoreError::Unavailable {
            message: format!("{}: {}", self.path.display(), err),
        })?;
        // The outer shape is the store's own format; a file that does not
        // parse as a venue-to-document map means the store is broken. A
        // single entry that is not a usable layout is invalid input for
        // that venue only.
        let entries: IndexMap<String, serde_json::Value> =
            serde_json::from_str(&text).map_err(|err| StoreError::Unavailable {
                message: format!("{}: {}", self.path.display(), err),
            })?;
        let Some(entry) = entries.get(venue) else {
            return Ok(None);
        };
        let doc: LayoutDoc = serde_json::from_value(entry.clone()).map_err(|err| {
            StoreError::InvalidDocument {
                venue: venue.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Some(doc))
    }
}
