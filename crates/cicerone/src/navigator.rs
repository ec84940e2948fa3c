//! Headless navigation state machine.
//!
//! The navigator owns no I/O: history writes, document fetches and
//! rendering all come back as [`NavEffect`]s for the surrounding shell
//! to execute, and everything the shell observes (pointer input,
//! back/forward, fetch completions) arrives as a [`NavEvent`]. This
//! keeps the whole room/exhibit navigation logic testable without a
//! browser.
//!
//! Fetches follow a last-requested-wins rule: every [`NavEffect::FetchDocument`]
//! carries a fresh sequence number and completions for anything but the
//! latest outstanding request are dropped. Without this a slow fetch
//! for a room the visitor already left could replace the document they
//! are looking at.

use tracing::debug;

use crate::arrows::{self, Arrow, Viewport};
use crate::error::{Error, Result};
use crate::geom::ViewBox;
use crate::link::compute_links;
use crate::scene::{self, DEFAULT_VIEW_BOX, SceneGraph};

/// Addressable navigation state, as a shell would encode it in query
/// parameters: `room=<roomName>[/<seg>…]` plus an optional `exhibit`.
/// Sub-path segments are opaque and preserved verbatim on rewrites.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressState {
    pub room: Option<String>,
    pub exhibit: Option<String>,
}

impl AddressState {
    pub fn with_room(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
            exhibit: None,
        }
    }

    /// The room name: everything before the first sub-path separator,
    /// trimmed. Empty values count as no room.
    pub fn room_name(&self) -> Option<&str> {
        let value = self.room.as_deref()?;
        let name = value.split('/').next().unwrap_or(value).trim();
        if name.is_empty() { None } else { Some(name) }
    }

    /// Trailing sub-path segments, untouched.
    pub fn sub_path(&self) -> Vec<&str> {
        match self.room.as_deref() {
            Some(value) => value.split('/').skip(1).collect(),
            None => Vec::new(),
        }
    }

    /// Same sub-path and a new room name; any exhibit focus is dropped.
    fn rewrite_room(&self, room_name: &str) -> AddressState {
        let sub = self.sub_path();
        let room = if sub.is_empty() {
            room_name.to_string()
        } else {
            format!("{}/{}", room_name, sub.join("/"))
        };
        AddressState {
            room: Some(room),
            exhibit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Uninitialized,
    RoomSelected {
        room: String,
        sub_path: Vec<String>,
    },
    RoomFocused {
        room: String,
        sub_path: Vec<String>,
        exhibit: String,
    },
}

#[derive(Debug, Clone)]
pub enum NavEvent {
    /// First load; `address` is whatever the shell decoded.
    Started { address: AddressState },
    /// An external back/forward navigation changed the address. Shells
    /// must not echo the navigator's own address effects back here.
    HistoryChanged { address: AddressState },
    /// An arrow was activated; `room` is its target label.
    LinkActivated { room: String },
    ExhibitActivated { name: String },
    ExhibitClosed,
    DocumentLoaded { seq: u64, text: String },
    DocumentFailed { seq: u64, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Rewrite the address without a history entry.
    ReplaceAddress(AddressState),
    /// Push one new history entry.
    PushAddress(AddressState),
    /// Start fetching `path`; the completion event must echo `seq`.
    FetchDocument { seq: u64, path: String },
    Render(NavScene),
    /// Degrade inline; navigation state is untouched.
    ShowError { message: String },
}

/// One rendered navigation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NavScene {
    pub view_box: ViewBox,
    pub arrows: Vec<Arrow>,
    /// Arrow overlay markup, ready for the nav layer.
    pub overlay: String,
    /// Full document text with the overlay spliced in and the root view
    /// box rewritten.
    pub document: String,
    /// Matched current room label, if any.
    pub room: Option<String>,
    pub focused_exhibit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Document path fetched when the address has no sub-path; sub-path
    /// segments are appended to it.
    pub base_document_path: String,
    /// Room injected when the first load carries none.
    pub default_room: String,
    pub viewport: Viewport,
    /// Glyph image reference for the arrow overlay.
    pub arrow_href: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            base_document_path: "/map.svg".to_string(),
            default_room: "ingresso".to_string(),
            viewport: Viewport::default(),
            arrow_href: arrows::DEFAULT_ARROW_HREF.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedDocument {
    path: String,
    /// Document text with the nav layer installed.
    text: String,
}

#[derive(Debug, Clone)]
struct PendingFetch {
    seq: u64,
    path: String,
}

#[derive(Debug)]
pub struct Navigator {
    config: NavigatorConfig,
    address: AddressState,
    state: NavState,
    document: Option<LoadedDocument>,
    next_seq: u64,
    outstanding: Option<PendingFetch>,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            config,
            address: AddressState::default(),
            state: NavState::Uninitialized,
            document: None,
            next_seq: 0,
            outstanding: None,
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn address(&self) -> &AddressState {
        &self.address
    }

    pub fn handle(&mut self, event: NavEvent) -> Vec<NavEffect> {
        match event {
            NavEvent::Started { address } => self.on_started(address),
            NavEvent::HistoryChanged { address } => self.apply_address(address, false),
            NavEvent::LinkActivated { room } => {
                let next = self.address.rewrite_room(&room);
                self.apply_address(next, true)
            }
            NavEvent::ExhibitActivated { name } => {
                let mut next = self.address.clone();
                next.exhibit = Some(name);
                self.apply_address(next, true)
            }
            NavEvent::ExhibitClosed => {
                let mut next = self.address.clone();
                next.exhibit = None;
                self.apply_address(next, true)
            }
            NavEvent::DocumentLoaded { seq, text } => self.on_document_loaded(seq, &text),
            NavEvent::DocumentFailed { seq, message } => self.on_document_failed(seq, message),
        }
    }

    fn on_started(&mut self, address: AddressState) -> Vec<NavEffect> {
        let mut effects = Vec::new();
        let address = if address.room_name().is_none() {
            let injected = AddressState {
                room: Some(self.config.default_room.clone()),
                exhibit: address.exhibit,
            };
            // no history entry for the injected room
            effects.push(NavEffect::ReplaceAddress(injected.clone()));
            injected
        } else {
            address
        };
        effects.extend(self.apply_address(address, false));
        effects
    }

    /// Moves to `address`, pushing a history entry when asked, and either
    /// re-renders from the loaded document or fetches the one the
    /// address selects. At most one `Render` per call.
    fn apply_address(&mut self, address: AddressState, push: bool) -> Vec<NavEffect> {
        let mut effects = Vec::new();
        if push {
            effects.push(NavEffect::PushAddress(address.clone()));
        }
        let path = self.document_path_for(&address);
        self.state = state_of(&address);
        self.address = address;
        match &self.document {
            Some(doc) if doc.path == path => {
                if self.outstanding.take().is_some() {
                    debug!("Superseding in-flight fetch; rendering from the loaded document");
                }
                effects.push(self.render_effect());
            }
            _ => effects.push(self.start_fetch(path)),
        }
        effects
    }

    fn on_document_loaded(&mut self, seq: u64, text: &str) -> Vec<NavEffect> {
        let Some(pending) = self.outstanding.as_ref() else {
            debug!("Dropping document completion with nothing outstanding (seq {})", seq);
            return Vec::new();
        };
        if pending.seq != seq {
            debug!(
                "Dropping stale document completion (seq {}, latest {})",
                seq, pending.seq
            );
            return Vec::new();
        }
        let path = pending.path.clone();
        self.outstanding = None;
        match scene::install_nav_layer(text) {
            Ok(installed) => {
                self.document = Some(LoadedDocument {
                    path,
                    text: installed,
                });
                vec![self.render_effect()]
            }
            Err(err) => vec![NavEffect::ShowError {
                message: err.to_string(),
            }],
        }
    }

    fn on_document_failed(&mut self, seq: u64, message: String) -> Vec<NavEffect> {
        match self.outstanding.as_ref() {
            Some(pending) if pending.seq == seq => {
                self.outstanding = None;
                vec![NavEffect::ShowError { message }]
            }
            _ => {
                debug!("Dropping stale fetch failure (seq {})", seq);
                Vec::new()
            }
        }
    }

    fn start_fetch(&mut self, path: String) -> NavEffect {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.outstanding = Some(PendingFetch {
            seq,
            path: path.clone(),
        });
        NavEffect::FetchDocument { seq, path }
    }

    fn document_path_for(&self, address: &AddressState) -> String {
        let sub = address.sub_path();
        if sub.is_empty() {
            self.config.base_document_path.clone()
        } else {
            format!("{}/{}", self.config.base_document_path, sub.join("/"))
        }
    }

    fn render_effect(&self) -> NavEffect {
        match self.build_scene() {
            Ok(scene) => NavEffect::Render(scene),
            Err(err) => NavEffect::ShowError {
                message: err.to_string(),
            },
        }
    }

    fn build_scene(&self) -> Result<NavScene> {
        let Some(doc) = self.document.as_ref() else {
            return Err(Error::NoDocument);
        };
        let scene = SceneGraph::parse(&doc.text)?;
        let current = self
            .address
            .room_name()
            .and_then(|name| scene.room_index(name));
        let (view_box, arrows) = match current {
            Some(index) => {
                let links = compute_links(&scene.rooms, &scene.corridors, index);
                let arrows: Vec<Arrow> = links.iter().map(arrows::arrow_for).collect();
                let view_box = arrows::frame_room(scene.rooms[index].rect, self.config.viewport);
                (view_box, arrows)
            }
            // no matching room: original framing, no arrows
            None => (scene.view_box.unwrap_or(DEFAULT_VIEW_BOX), Vec::new()),
        };
        let overlay = arrows::overlay_markup(&arrows, &self.config.arrow_href);
        let document = arrows::apply_overlay(&doc.text, &overlay, view_box)?;
        Ok(NavScene {
            view_box,
            arrows,
            overlay,
            document,
            room: current.map(|index| scene.rooms[index].label.clone()),
            focused_exhibit: self.address.exhibit.clone(),
        })
    }
}

fn state_of(address: &AddressState) -> NavState {
    let sub_path = || address.sub_path().iter().map(|s| s.to_string()).collect();
    match (address.room_name(), address.exhibit.as_ref()) {
        (None, _) => NavState::Uninitialized,
        (Some(room), None) => NavState::RoomSelected {
            room: room.to_string(),
            sub_path: sub_path(),
        },
        (Some(room), Some(exhibit)) => NavState::RoomFocused {
            room: room.to_string(),
            sub_path: sub_path(),
            exhibit: exhibit.clone(),
        },
    }
}
