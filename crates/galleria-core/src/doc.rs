//! Input documents as received from the layout store and the venue
//! catalogue. Wire field names are part of the input contract: the room
//! kind travels as `type`, and the exhibit fields `connessi` / `visibile`
//! keep the catalogue's original names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::RoomKind;
use crate::{Error, Result};

/// One cell of a venue's placement grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
    #[serde(rename = "type", default)]
    pub kind: RoomKind,
}

/// Grid placement document for one venue.
///
/// Entry order is document order; rooms, corridors and BFS tie-breaking
/// all follow it, which is why the grid is an `IndexMap`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDoc {
    pub grid: IndexMap<String, GridCell>,
}

impl LayoutDoc {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::InvalidLayout {
            message: err.to_string(),
        })
    }
}

/// Multi-venue layout file: venue name to layout document.
pub type LayoutFile = IndexMap<String, LayoutDoc>;

pub fn layout_file_from_json_str(text: &str) -> Result<LayoutFile> {
    serde_json::from_str(text).map_err(|err| Error::InvalidLayout {
        message: err.to_string(),
    })
}

fn default_visible() -> bool {
    true
}

/// Exhibit declaration as published by the venue catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitDecl {
    pub name: String,
    pub room: String,
    #[serde(default)]
    pub connessi: Vec<String>,
    #[serde(default = "default_visible")]
    pub visibile: bool,
}

/// Venue document: display name plus the declared exhibits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDoc {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ExhibitDecl>,
}

impl VenueDoc {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::InvalidVenue {
            message: err.to_string(),
        })
    }
}
