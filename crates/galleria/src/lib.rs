#![forbid(unsafe_code)]

//! `galleria` generates interactive venue floor plans headlessly.
//!
//! The crate is a thin facade: the data model, grid layout and wayfinding
//! graphs come from `galleria-core`, the SVG producer from
//! `galleria-render`. On top it adds the pipeline helpers in [`render`]
//! and the [`service`] layer a transport would mount.
//!
//! Everything is CPU-bound and runtime-agnostic: the async entry points
//! are thin wrappers over their `_sync` counterparts and never perform
//! I/O of their own.

pub use galleria_core::*;

pub mod service;

pub mod render {
    pub use galleria_render::{EdgeMode, RenderOptions, render_svg};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Assemble(#[from] galleria_core::Error),
        #[error(transparent)]
        Render(#[from] galleria_render::Error),
    }

    impl HeadlessError {
        /// Transport-agnostic failure class of the wrapped error.
        pub fn classification(&self) -> galleria_core::Classification {
            match self {
                HeadlessError::Assemble(err) => err.classification(),
                HeadlessError::Render(err) => err.classification(),
            }
        }
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Synchronous generation helper (executor-free): assemble the venue
    /// map from its two input documents and render it.
    pub fn generate_venue_svg_sync(
        layout: &galleria_core::LayoutDoc,
        venue: &galleria_core::VenueDoc,
        options: &RenderOptions,
    ) -> Result<String> {
        let map = galleria_core::VenueMap::assemble(layout, venue)?;
        Ok(render_svg(&map, options)?)
    }

    pub async fn generate_venue_svg(
        layout: &galleria_core::LayoutDoc,
        venue: &galleria_core::VenueDoc,
        options: &RenderOptions,
    ) -> Result<String> {
        generate_venue_svg_sync(layout, venue, options)
    }
}
