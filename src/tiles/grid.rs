use crate::core::constants::TILE_SIZE;
use crate::core::geo::{Point, TileCoord, TileId};
use crate::core::viewport::ViewportState;
use crate::tiles::source::TileSource;

/// Deepest tile zoom a grid is computed for
const MAX_TILE_ZOOM: f64 = 30.0;

/// A tile that intersects the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub id: TileId,
    /// Top-left corner on screen in pixels
    pub position: Point,
    /// Edge length on screen in pixels
    pub size: f64,
}

/// Tiles covering a viewport at the nearest integer zoom
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    /// Integer zoom the tiles are requested at
    pub zoom: u8,
    /// Screen scale of one tile relative to its native size
    pub scale: f64,
    /// Device-pixel-ratio tier the provider is asked for
    pub dpr: f64,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
    pub tiles: Vec<VisibleTile>,
}

impl TileGrid {
    pub fn for_viewport(state: &ViewportState, dprs: &[f64], device_pixel_ratio: f64) -> Self {
        let zoom = if state.zoom.is_finite() {
            state.zoom.round().clamp(0.0, MAX_TILE_ZOOM)
        } else {
            0.0
        };
        let scale = 2_f64.powf(state.zoom - zoom);
        let tile_px = TILE_SIZE * scale;

        // Tile coordinate under the screen center, at the integer zoom
        let shown = state.pixel_to_tile(state.screen_center());
        let center = TileCoord::new(shown.x / scale, shown.y / scale);
        let half_width = state.width as f64 / 2.0 / tile_px;
        let half_height = state.height as f64 / 2.0 / tile_px;

        let last_row = (1_i64 << zoom as u8) - 1;
        let min_x = (center.x - half_width).floor() as i64;
        let max_x = (center.x + half_width).ceil() as i64 - 1;
        let min_y = ((center.y - half_height).floor() as i64).clamp(0, last_row);
        let max_y = ((center.y + half_height).ceil() as i64 - 1).clamp(0, last_row);

        let origin = state.screen_center();
        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let column = TileCoord::new(x as f64, y as f64);
                tiles.push(VisibleTile {
                    id: column.to_tile_id(zoom as u8),
                    position: Point::new(
                        origin.x + (column.x - center.x) * tile_px,
                        origin.y + (column.y - center.y) * tile_px,
                    ),
                    size: tile_px,
                });
            }
        }

        log::trace!(
            "tile grid z{} x {}..={} y {}..={} ({} tiles)",
            zoom,
            min_x,
            max_x,
            min_y,
            max_y,
            tiles.len()
        );

        Self {
            zoom: zoom as u8,
            scale,
            dpr: select_dpr(dprs, device_pixel_ratio),
            min_x,
            max_x,
            min_y,
            max_y,
            tiles,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(|tile| tile.id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Provider URLs for every visible tile, in row-major order
    pub fn urls<S: TileSource + ?Sized>(&self, source: &S) -> Vec<String> {
        self.ids()
            .map(|id| source.url(id.x, id.y, id.z, self.dpr))
            .collect()
    }
}

/// Smallest available tier that covers the device ratio, else the largest tier
pub fn select_dpr(dprs: &[f64], device_pixel_ratio: f64) -> f64 {
    let tiers = dprs.iter().copied().filter(|dpr| dpr.is_finite() && *dpr > 0.0);
    let covering = tiers
        .clone()
        .filter(|dpr| *dpr >= device_pixel_ratio)
        .fold(None, |best: Option<f64>, dpr| Some(best.map_or(dpr, |b| b.min(dpr))));
    covering
        .or_else(|| tiers.fold(None, |best: Option<f64>, dpr| Some(best.map_or(dpr, |b| b.max(dpr)))))
        .unwrap_or(1.0)
}
