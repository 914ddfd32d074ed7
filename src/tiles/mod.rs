pub mod grid;
pub mod source;

// Re-exports for convenience
pub use grid::{select_dpr, TileGrid, VisibleTile};
pub use source::{TileProvider, TileSource};
