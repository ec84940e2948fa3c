pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure classes. Transport layers map these to status codes; the
/// library never picks a status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    NotFound,
    InvalidInput,
    UpstreamUnavailable,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid layout document: {message}")]
    InvalidLayout { message: String },

    #[error("Invalid venue document: {message}")]
    InvalidVenue { message: String },

    #[error("Rooms '{first}' and '{second}' share grid cell ({row}, {col})")]
    DuplicateGridCell {
        row: i32,
        col: i32,
        first: String,
        second: String,
    },

    #[error("Duplicate exhibit name '{name}'")]
    DuplicateExhibit { name: String },

    #[error("Room '{room}' is not defined in the layout (required by exhibit '{exhibit}')")]
    UnknownRoom { room: String, exhibit: String },

    #[error("Unknown exhibit '{name}'")]
    UnknownExhibit { name: String },

    #[error("No route between '{from}' and '{to}'")]
    NoRoute { from: String, to: String },
}

impl Error {
    pub fn classification(&self) -> Classification {
        match self {
            Error::UnknownExhibit { .. } | Error::NoRoute { .. } => Classification::NotFound,
            Error::InvalidLayout { .. }
            | Error::InvalidVenue { .. }
            | Error::DuplicateGridCell { .. }
            | Error::DuplicateExhibit { .. }
            | Error::UnknownRoom { .. } => Classification::InvalidInput,
        }
    }
}
