//! Prelude module for common slippy types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use slippy::prelude::*;`

pub use crate::core::{
    bounds::{BoundsClamper, LimitBounds},
    config::MapConfig,
    controller::ViewportController,
    geo::{LatLng, LatLngBounds, Point, TileCoord, TileId},
    viewport::ViewportState,
};

pub use crate::input::{
    events::{
        InputEvent, KeyModifiers, MapEvent, MapEventKind, MouseButton, PointerKind,
        TouchEventType, TouchPoint, WarningKind,
    },
    gestures::{GestureConfig, GestureMode, GestureOptions},
    handler::{Intent, ViewportCommand},
};

pub use crate::animation::{AnimationScheduler, EasingFunction, ZoomAnchor};

pub use crate::tiles::{TileGrid, TileProvider, TileSource, VisibleTile};

pub use crate::traits::Lerp;

pub use crate::MapError;
