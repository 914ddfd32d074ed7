use crate::core::constants::TILE_SIZE;
use crate::core::crs;
use crate::core::geo::{LatLng, LatLngBounds, Point, TileCoord};
use serde::{Deserialize, Serialize};

/// The view of the map: center, zoom, screen dimensions and the in-flight
/// drag offset that has not been folded into `center` yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current (possibly fractional) zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub width: u32,
    pub height: u32,
    /// Uncommitted drag offset in pixels
    pub pixel_delta: Point,
}

impl ViewportState {
    pub fn new(center: LatLng, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            pixel_delta: Point::zero(),
        }
    }

    pub fn size(&self) -> Point {
        Point::new(self.width as f64, self.height as f64)
    }

    /// Pixel in the middle of the viewport
    pub fn screen_center(&self) -> Point {
        self.size().multiply(0.5)
    }

    /// Length of the viewport diagonal in pixels
    pub fn diagonal(&self) -> f64 {
        self.size().length()
    }

    pub fn center_tile(&self) -> TileCoord {
        crs::lat_lng_to_tile(&self.center, self.zoom)
    }

    /// Geographic coordinate shown at `pixel`
    pub fn pixel_to_lat_lng(&self, pixel: Point) -> LatLng {
        crs::pixel_to_lat_lng(
            pixel,
            self.center,
            self.zoom,
            self.width as f64,
            self.height as f64,
            self.pixel_delta,
        )
    }

    /// Pixel where `lat_lng` is shown
    pub fn lat_lng_to_pixel(&self, lat_lng: LatLng) -> Point {
        crs::lat_lng_to_pixel(
            lat_lng,
            self.center,
            self.zoom,
            self.width as f64,
            self.height as f64,
            self.pixel_delta,
        )
    }

    /// Tile coordinate shown at `pixel`, without the geographic clamp
    pub fn pixel_to_tile(&self, pixel: Point) -> TileCoord {
        let center = self.center_tile();
        let half = self.screen_center();
        TileCoord::new(
            center.x + (pixel.x - half.x - self.pixel_delta.x) / TILE_SIZE,
            center.y + (pixel.y - half.y - self.pixel_delta.y) / TILE_SIZE,
        )
    }

    /// Geographic coordinate at `pixel` on the continuous grid. Latitude is
    /// kept in the projection domain, longitude is neither clamped nor wrapped.
    pub fn unclamped_lat_lng(&self, pixel: Point) -> LatLng {
        let lat_lng = crs::tile_to_lat_lng(&self.pixel_to_tile(pixel), self.zoom);
        LatLng::new(LatLng::clamp_lat(lat_lng.lat), lat_lng.lng)
    }

    /// Geographic coordinate actually shown in the middle of the screen,
    /// i.e. `center` moved by the in-flight drag offset.
    pub fn effective_center(&self) -> LatLng {
        self.unclamped_lat_lng(self.screen_center()).normalized()
    }

    /// Visible area computed at the viewport corners
    pub fn bounds(&self) -> LatLngBounds {
        let shown = Self {
            center: self.center.normalized(),
            ..*self
        };
        let nw = shown.pixel_to_lat_lng(Point::zero());
        let se = shown.pixel_to_lat_lng(self.size());
        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Adds a drag displacement to the uncommitted offset
    pub fn panned_by(&self, delta: Point) -> Self {
        Self {
            pixel_delta: self.pixel_delta.add(&delta),
            ..*self
        }
    }

    /// Folds `pixel_delta` into `center`
    pub fn committed(&self) -> Self {
        if self.pixel_delta.is_zero() {
            return *self;
        }
        Self {
            center: self.effective_center(),
            pixel_delta: Point::zero(),
            ..*self
        }
    }

    /// Changes the zoom while keeping the content under `anchor` fixed on screen.
    pub fn zoomed_around(&self, zoom: f64, anchor: Point) -> Self {
        let offset = anchor
            .subtract(&self.screen_center())
            .subtract(&self.pixel_delta)
            .multiply(1.0 / TILE_SIZE);
        let center = self.center_tile();
        let scale = 2_f64.powf(zoom - self.zoom);
        let anchor_tile = TileCoord::new((center.x + offset.x) * scale, (center.y + offset.y) * scale);
        let new_center = TileCoord::new(anchor_tile.x - offset.x, anchor_tile.y - offset.y);

        Self {
            center: crs::tile_to_lat_lng(&new_center, zoom),
            zoom,
            ..*self
        }
    }

    /// Center that puts `lat_lng` at `pixel` when shown at `zoom`
    pub fn center_for_anchor(&self, lat_lng: LatLng, pixel: Point, zoom: f64) -> LatLng {
        let anchor_tile = crs::lat_lng_to_tile(&lat_lng, zoom);
        let offset = pixel
            .subtract(&self.screen_center())
            .subtract(&self.pixel_delta)
            .multiply(1.0 / TILE_SIZE);
        crs::tile_to_lat_lng(
            &TileCoord::new(anchor_tile.x - offset.x, anchor_tile.y - offset.y),
            zoom,
        )
    }

    /// Pixel distance between this view's center and `other` measured in screens
    pub fn distance_in_screens(&self, other: LatLng) -> f64 {
        let from = self.screen_center();
        let to = self.lat_lng_to_pixel(other).subtract(&self.pixel_delta);
        let dx = (to.x - from.x).abs() / (self.width.max(1) as f64);
        let dy = (to.y - from.y).abs() / (self.height.max(1) as f64);
        dx.max(dy)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 1.0, 800, 600)
    }
}
