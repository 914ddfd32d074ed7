//! Web Mercator coordinate reference system.
//!
//! Converts between geographic coordinates, continuous tile-grid coordinates
//! and screen pixels. Tile coordinates follow the slippy-map convention: the
//! grid at zoom `z` spans `2^z` tiles per axis, `x` grows eastward from the
//! antimeridian and `y` grows southward from the northern projection limit.
//!
//! Screen pixels are measured from the top-left corner of a viewport of
//! `width x height` pixels whose center shows `center`, shifted by the
//! uncommitted drag offset `pixel_delta`.

use crate::core::constants::{ABSOLUTE_BOUNDS_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point, TileCoord};
use once_cell::sync::Lazy;
use std::f64::consts::PI;

/// The full tile extent at the reference zoom expressed geographically.
/// Hard clamp applied by [`pixel_to_lat_lng`].
pub static ABSOLUTE_MIN_MAX: Lazy<LatLngBounds> = Lazy::new(|| {
    let extent = 2_f64.powi(ABSOLUTE_BOUNDS_ZOOM);
    let z = ABSOLUTE_BOUNDS_ZOOM as f64;
    LatLngBounds::from_min_max(
        tile2lat(extent, z),
        tile2lat(0.0, z),
        tile2lng(0.0, z),
        tile2lng(extent, z),
    )
});

/// Number of tiles per axis at `zoom`
#[inline]
pub fn world_tiles(zoom: f64) -> f64 {
    2_f64.powf(zoom)
}

/// Continuous tile column of longitude `lon`
pub fn lng2tile(lon: f64, zoom: f64) -> f64 {
    (lon + 180.0) / 360.0 * world_tiles(zoom)
}

/// Latitude is clamped to the projection limit so the poles map to the grid
/// edges instead of infinity.
pub fn lat2tile(lat: f64, zoom: f64) -> f64 {
    let lat_rad = LatLng::clamp_lat(lat).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * world_tiles(zoom)
}

/// Longitude of the west edge of tile column `x`
pub fn tile2lng(x: f64, zoom: f64) -> f64 {
    x / world_tiles(zoom) * 360.0 - 180.0
}

/// Latitude of the north edge of tile row `y`
pub fn tile2lat(y: f64, zoom: f64) -> f64 {
    let n = PI - 2.0 * PI * y / world_tiles(zoom);
    n.sinh().atan().to_degrees()
}

pub fn lat_lng_to_tile(lat_lng: &LatLng, zoom: f64) -> TileCoord {
    TileCoord::new(lng2tile(lat_lng.lng, zoom), lat2tile(lat_lng.lat, zoom))
}

pub fn tile_to_lat_lng(tile: &TileCoord, zoom: f64) -> LatLng {
    LatLng::new(tile2lat(tile.y, zoom), tile2lng(tile.x, zoom))
}

/// Converts a screen pixel into a geographic coordinate.
///
/// The result is always inside [`ABSOLUTE_MIN_MAX`], independent of any
/// configured pan limit.
pub fn pixel_to_lat_lng(
    pixel: Point,
    center: LatLng,
    zoom: f64,
    width: f64,
    height: f64,
    pixel_delta: Point,
) -> LatLng {
    let offset = Point::new(
        (pixel.x - width / 2.0 - pixel_delta.x) / TILE_SIZE,
        (pixel.y - height / 2.0 - pixel_delta.y) / TILE_SIZE,
    );

    let center_tile = lat_lng_to_tile(&center, zoom);
    let tile = TileCoord::new(center_tile.x + offset.x, center_tile.y + offset.y);
    let lat_lng = tile_to_lat_lng(&tile, zoom);

    let limits = &*ABSOLUTE_MIN_MAX;
    LatLng::new(
        lat_lng.lat.clamp(limits.min_lat(), limits.max_lat()),
        lat_lng.lng.clamp(limits.min_lng(), limits.max_lng()),
    )
}

/// Converts a geographic coordinate into a screen pixel. Inverse of
/// [`pixel_to_lat_lng`] inside the projection domain.
pub fn lat_lng_to_pixel(
    lat_lng: LatLng,
    center: LatLng,
    zoom: f64,
    width: f64,
    height: f64,
    pixel_delta: Point,
) -> Point {
    let center_tile = lat_lng_to_tile(&center, zoom);
    let tile = lat_lng_to_tile(&lat_lng, zoom);

    Point::new(
        (tile.x - center_tile.x) * TILE_SIZE + width / 2.0 + pixel_delta.x,
        (tile.y - center_tile.y) * TILE_SIZE + height / 2.0 + pixel_delta.y,
    )
}
