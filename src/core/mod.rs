pub mod bounds;
pub mod config;
pub mod constants;
pub mod controller;
pub mod crs;
pub mod geo;
pub mod viewport;

pub use bounds::{BoundsClamper, LimitBounds};
pub use config::MapConfig;
pub use controller::ViewportController;
pub use geo::{LatLng, LatLngBounds, Point, TileCoord, TileId};
pub use viewport::ViewportState;
