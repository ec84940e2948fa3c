//! Venue assembly: input documents in, laid-out map out.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::doc::{LayoutDoc, VenueDoc};
use crate::layout;
use crate::model::{Corridor, Exhibit, MapPoint, Room};
use crate::{Error, Result};

/// A fully laid-out venue: rooms with pixel geometry, derived corridors
/// and positioned exhibits. Built fresh per request and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct VenueMap {
    pub name: String,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub exhibits: Vec<Exhibit>,
}

impl VenueMap {
    /// Assembles a venue from its layout and catalogue documents.
    ///
    /// Rooms keep grid-document order. Declared exhibits keep catalogue
    /// order and are validated against the grid; each special room then
    /// contributes one synthetic invisible exhibit named after the room.
    /// Exhibits owned by a special room sit at the room center, everyone
    /// else on the room's exhibit ring.
    pub fn assemble(layout_doc: &LayoutDoc, venue: &VenueDoc) -> Result<Self> {
        let mut rooms: Vec<Room> = Vec::with_capacity(layout_doc.grid.len());
        let mut cell_owner: FxHashMap<(i32, i32), usize> = FxHashMap::default();
        let mut room_index: FxHashMap<&str, usize> = FxHashMap::default();

        for (name, cell) in &layout_doc.grid {
            if let Some(&prev) = cell_owner.get(&(cell.row, cell.col)) {
                return Err(Error::DuplicateGridCell {
                    row: cell.row,
                    col: cell.col,
                    first: rooms[prev].name.clone(),
                    second: name.clone(),
                });
            }
            cell_owner.insert((cell.row, cell.col), rooms.len());
            room_index.insert(name.as_str(), rooms.len());
            rooms.push(Room {
                name: name.clone(),
                row: cell.row,
                col: cell.col,
                kind: cell.kind,
                rect: layout::room_rect(cell.row, cell.col),
            });
        }

        let mut exhibits: Vec<Exhibit> = Vec::new();
        let mut declared: FxHashSet<&str> = FxHashSet::default();
        for decl in &venue.objects {
            if !declared.insert(decl.name.as_str()) {
                return Err(Error::DuplicateExhibit {
                    name: decl.name.clone(),
                });
            }
            let Some(&room) = room_index.get(decl.room.as_str()) else {
                return Err(Error::UnknownRoom {
                    room: decl.room.clone(),
                    exhibit: decl.name.clone(),
                });
            };
            exhibits.push(Exhibit {
                name: decl.name.clone(),
                room,
                connections: decl.connessi.clone(),
                pos: MapPoint { x: 0.0, y: 0.0 },
                visible: decl.visibile,
                synthetic: false,
            });
        }

        for (idx, room) in rooms.iter().enumerate() {
            if room.is_special() {
                exhibits.push(Exhibit {
                    name: room.name.clone(),
                    room: idx,
                    connections: Vec::new(),
                    pos: MapPoint { x: 0.0, y: 0.0 },
                    visible: false,
                    synthetic: true,
                });
            }
        }

        let mut per_room: Vec<Vec<usize>> = vec![Vec::new(); rooms.len()];
        for (i, ex) in exhibits.iter().enumerate() {
            per_room[ex.room].push(i);
        }
        for (room_idx, members) in per_room.iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let ring = layout::exhibit_ring(&rooms[room_idx].rect, members.len());
            for (&ex_idx, pos) in members.iter().zip(ring) {
                exhibits[ex_idx].pos = pos.into();
            }
        }
        // Special rooms pin every exhibit they own to the room center,
        // declared ones included.
        for ex in &mut exhibits {
            if rooms[ex.room].is_special() {
                ex.pos = rooms[ex.room].center().into();
            }
        }

        let corridors = layout::derive_corridors(&rooms);

        debug!(
            "Assembled venue map '{}': {} rooms, {} corridors, {} exhibits",
            venue.name,
            rooms.len(),
            corridors.len(),
            exhibits.len()
        );

        Ok(Self {
            name: venue.name.clone(),
            rooms,
            corridors,
            exhibits,
        })
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    /// First exhibit with the given name. Declared exhibits precede
    /// synthetic ones, so a declared exhibit shadows a synthetic namesake.
    pub fn exhibit_index(&self, name: &str) -> Option<usize> {
        self.exhibits.iter().position(|e| e.name == name)
    }

    pub fn exhibit(&self, name: &str) -> Option<&Exhibit> {
        self.exhibit_index(name).map(|i| &self.exhibits[i])
    }

    pub fn exhibit_is_special(&self, exhibit: &Exhibit) -> bool {
        self.rooms[exhibit.room].is_special()
    }
}
