//! # slippy
//!
//! The interaction core of a slippy map: Web Mercator projection math,
//! pan/zoom clamping, gesture recognition, viewport animation and the
//! controller that ties them together.
//!
//! A host feeds raw input to a [`ViewportController`] and calls
//! [`ViewportController::frame`] once per animation frame. The controller
//! owns the [`ViewportState`], reports changes as [`MapEvent`]s and computes
//! which tiles are visible. Rendering and tile fetching stay with the host.

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{BoundsClamper, LimitBounds},
    config::MapConfig,
    controller::ViewportController,
    crs,
    geo::{LatLng, LatLngBounds, Point, TileCoord, TileId},
    viewport::ViewportState,
};

pub use crate::input::{
    events::{InputEvent, MapEvent, MapEventKind},
    gestures::GestureRecognizer,
    handler::{EventManager, ViewportCommand},
};

pub use crate::animation::{AnimationScheduler, EasingFunction};

pub use crate::tiles::{TileGrid, TileProvider, TileSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
