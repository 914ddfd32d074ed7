//! Clamping of candidate viewports to zoom limits and pan bounds.
//!
//! All geographic limits are applied on the continuous tile grid of the
//! candidate zoom, where both axes are linear in screen pixels. Latitude and
//! longitude are then recovered through the CRS only for the axes that
//! actually moved, which keeps clamping idempotent.

use crate::core::constants::TILE_SIZE;
use crate::core::crs::{self, ABSOLUTE_MIN_MAX};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::viewport::ViewportState;
use serde::{Deserialize, Serialize};

/// Tile-grid slack below which a coordinate already counts as inside a range
const TILE_EPSILON: f64 = 1e-9;

/// How far the map may be panned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitBounds {
    /// Only the projection's own latitude domain applies
    None,
    /// The viewport center must stay inside the bounds
    Center,
    /// The whole visible rectangle must stay inside the bounds
    #[default]
    Edge,
}

/// Closed interval on one tile-grid axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    lo: f64,
    hi: f64,
}

impl AxisRange {
    fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Shrinks the range by `half` on both sides, collapsing to the midpoint
    /// when the viewport is wider than the range.
    fn shrunk(&self, half: f64) -> Self {
        let lo = self.lo + half;
        let hi = self.hi - half;
        if lo > hi {
            let mid = (self.lo + self.hi) / 2.0;
            Self::new(mid, mid)
        } else {
            Self::new(lo, hi)
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        if value >= self.lo - TILE_EPSILON && value <= self.hi + TILE_EPSILON {
            value
        } else {
            value.clamp(self.lo, self.hi)
        }
    }
}

/// Produces the nearest admissible viewport for a candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsClamper {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub limit: LimitBounds,
    /// Pan limit for `Center` and `Edge`; the projection bounds when absent
    pub bounds: Option<LatLngBounds>,
}

impl BoundsClamper {
    pub fn new(
        min_zoom: f64,
        max_zoom: f64,
        limit: LimitBounds,
        bounds: Option<LatLngBounds>,
    ) -> Self {
        Self {
            min_zoom,
            max_zoom,
            limit,
            bounds,
        }
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        self.min_zoom.max(self.max_zoom.min(zoom))
    }

    /// The configured bounds cut to the projection domain
    pub fn limits(&self) -> LatLngBounds {
        self.bounds
            .unwrap_or(*ABSOLUTE_MIN_MAX)
            .clamped_to_projection()
    }

    /// Admissible tile-grid ranges for the viewport center at `zoom`.
    /// `None` on the x axis means longitude is unrestricted.
    fn center_ranges(&self, zoom: f64, width: u32, height: u32) -> (Option<AxisRange>, AxisRange) {
        let world = &*ABSOLUTE_MIN_MAX;
        let projection_y = AxisRange::new(
            crs::lat2tile(world.max_lat(), zoom),
            crs::lat2tile(world.min_lat(), zoom),
        );

        if self.limit == LimitBounds::None {
            return (None, projection_y);
        }

        let limits = self.limits();
        let x = AxisRange::new(
            crs::lng2tile(limits.min_lng(), zoom),
            crs::lng2tile(limits.max_lng(), zoom),
        );
        let y = AxisRange::new(
            crs::lat2tile(limits.max_lat(), zoom),
            crs::lat2tile(limits.min_lat(), zoom),
        );

        match self.limit {
            LimitBounds::Edge => {
                let half_width = width as f64 / 2.0 / TILE_SIZE;
                let half_height = height as f64 / 2.0 / TILE_SIZE;
                (Some(x.shrunk(half_width)), y.shrunk(half_height))
            }
            _ => (Some(x), y),
        }
    }

    /// Clamps zoom first, then the center, then the in-flight drag offset so
    /// that the content shown on screen obeys the same limits.
    pub fn clamp(&self, candidate: &ViewportState) -> ViewportState {
        let zoom = self.clamp_zoom(candidate.zoom);
        let mut center = candidate.center.sanitized_or(LatLng::default());
        let mut pixel_delta = if candidate.pixel_delta.is_finite() {
            candidate.pixel_delta
        } else {
            Point::zero()
        };

        let (x_range, y_range) = self.center_ranges(zoom, candidate.width, candidate.height);
        let tile = crs::lat_lng_to_tile(&center, zoom);

        let x = x_range.map_or(tile.x, |range| range.clamp(tile.x));
        let y = y_range.clamp(tile.y);
        if x != tile.x {
            center.lng = crs::tile2lng(x, zoom);
        }
        if y != tile.y {
            center.lat = crs::tile2lat(y, zoom);
        }

        let shown_x = x - pixel_delta.x / TILE_SIZE;
        let shown_y = y - pixel_delta.y / TILE_SIZE;
        if let Some(range) = x_range {
            let clamped = range.clamp(shown_x);
            if clamped != shown_x {
                pixel_delta.x = (x - clamped) * TILE_SIZE;
            }
        }
        let clamped = y_range.clamp(shown_y);
        if clamped != shown_y {
            pixel_delta.y = (y - clamped) * TILE_SIZE;
        }

        ViewportState {
            center,
            zoom,
            width: candidate.width,
            height: candidate.height,
            pixel_delta,
        }
    }
}

impl Default for BoundsClamper {
    fn default() -> Self {
        Self::new(
            crate::core::constants::DEFAULT_MIN_ZOOM as f64,
            crate::core::constants::DEFAULT_MAX_ZOOM as f64,
            LimitBounds::default(),
            None,
        )
    }
}
