#![forbid(unsafe_code)]

pub mod svg;

pub use svg::render_svg;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] galleria_core::Error),
}

impl Error {
    pub fn classification(&self) -> galleria_core::Classification {
        match self {
            Error::Core(err) => err.classification(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Which connection edges a rendered document carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Every declared normal-to-normal connection once, plus the full
    /// exhibit-to-special matrix once, deduplicated.
    All,
    /// Only the requested focus pair's route, or nothing when unset.
    #[default]
    Path,
    /// Only edges touching at least one special room.
    Services,
    None,
}

impl EdgeMode {
    /// Parses the wire form (`all|path|services|none`), case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "path" => Some(Self::Path),
            "services" => Some(Self::Services),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Path => "path",
            Self::Services => "services",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: EdgeMode,
    /// Exhibit pair highlighted in `Path` mode. Names that match no
    /// exhibit draw no route; the rest of the document is unaffected.
    pub focus: Option<(String, String)>,
}
