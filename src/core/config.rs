//! Configuration for the viewport engine
//!
//! `MapConfig` carries every option a map widget recognizes. It can be built
//! fluently in code or parsed from JSON using the same camelCase option names
//! a web map component would accept.

use crate::animation::interpolation::EasingFunction;
use crate::core::bounds::{BoundsClamper, LimitBounds};
use crate::core::constants::{
    ANIMATION_TIME_MS, DEFAULT_ANIMATE_MAX_SCREENS, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::input::gestures::GestureConfig;
use crate::{MapError, Result};
use instant::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub limit_bounds: LimitBounds,
    /// Pan limit used by `center` and `edge`; the whole projection when absent
    pub bounds: Option<LatLngBounds>,
    pub animate: bool,
    /// Jump instead of animating when the target is further than this many screens
    pub animate_max_screens: f64,
    pub animation_duration_ms: u64,
    pub easing: EasingFunction,
    /// Wheel zoom only while the meta/ctrl key is held
    pub meta_wheel_zoom: bool,
    /// Touch panning needs two fingers
    pub two_finger_drag: bool,
    /// Round the zoom to an integer when a gesture ends
    pub zoom_snap: bool,
    /// Keep moving after a fast drag is released
    pub inertia: bool,
    pub mouse_events: bool,
    pub touch_events: bool,
    /// Device-pixel-ratio tiers available from the tile provider
    pub dprs: Vec<f64>,
    pub device_pixel_ratio: f64,
    pub gesture: GestureConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::default(),
            zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            limit_bounds: LimitBounds::default(),
            bounds: None,
            animate: true,
            animate_max_screens: DEFAULT_ANIMATE_MAX_SCREENS,
            animation_duration_ms: ANIMATION_TIME_MS,
            easing: EasingFunction::EaseOutQuad,
            meta_wheel_zoom: false,
            two_finger_drag: false,
            zoom_snap: true,
            inertia: true,
            mouse_events: true,
            touch_events: true,
            dprs: vec![1.0],
            device_pixel_ratio: 1.0,
            gesture: GestureConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON options object and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidConfig(format!(
                "minZoom {} is greater than maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.center.lat.is_finite() || !self.center.lng.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "center {:?} is not finite",
                self.center
            )));
        }
        if !self.zoom.is_finite() {
            return Err(MapError::InvalidConfig(format!("zoom {} is not finite", self.zoom)));
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "bounds {:?} are not ordered south-west to north-east",
                    bounds
                )));
            }
        }
        if self.dprs.is_empty() || self.dprs.iter().any(|dpr| !dpr.is_finite() || *dpr <= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "dprs {:?} must be a non-empty list of positive ratios",
                self.dprs
            )));
        }
        if self.animate_max_screens.is_nan() || self.animate_max_screens < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "animateMaxScreens {} must not be negative",
                self.animate_max_screens
            )));
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Clamper for the configured limits
    pub fn clamper(&self) -> BoundsClamper {
        BoundsClamper::new(
            self.min_zoom as f64,
            self.max_zoom as f64,
            self.limit_bounds,
            self.bounds,
        )
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_limit_bounds(mut self, limit: LimitBounds, bounds: Option<LatLngBounds>) -> Self {
        self.limit_bounds = limit;
        self.bounds = bounds;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_meta_wheel_zoom(mut self, enabled: bool) -> Self {
        self.meta_wheel_zoom = enabled;
        self
    }

    pub fn with_two_finger_drag(mut self, enabled: bool) -> Self {
        self.two_finger_drag = enabled;
        self
    }

    pub fn with_zoom_snap(mut self, enabled: bool) -> Self {
        self.zoom_snap = enabled;
        self
    }

    pub fn with_inertia(mut self, enabled: bool) -> Self {
        self.inertia = enabled;
        self
    }

    pub fn with_input_sources(mut self, mouse_events: bool, touch_events: bool) -> Self {
        self.mouse_events = mouse_events;
        self.touch_events = touch_events;
        self
    }

    pub fn with_dprs(mut self, dprs: Vec<f64>, device_pixel_ratio: f64) -> Self {
        self.dprs = dprs;
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.min_zoom, 1);
        assert_eq!(config.max_zoom, 18);
        assert_eq!(config.limit_bounds, LimitBounds::Edge);
        assert!(config.animate);
        assert!(config.zoom_snap);
        assert!(config.mouse_events && config.touch_events);
        assert_eq!(config.dprs, vec![1.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = MapConfig::from_json(
            r#"{
                "center": { "lat": 50.1102, "lng": 3.1506 },
                "zoom": 6,
                "limitBounds": "center",
                "metaWheelZoom": true,
                "twoFingerDrag": true,
                "zoomSnap": false,
                "dprs": [1, 2],
                "gesture": { "clickTolerance": 4.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.center, LatLng::new(50.1102, 3.1506));
        assert_eq!(config.zoom, 6.0);
        assert_eq!(config.limit_bounds, LimitBounds::Center);
        assert!(config.meta_wheel_zoom);
        assert!(config.two_finger_drag);
        assert!(!config.zoom_snap);
        assert_eq!(config.dprs, vec![1.0, 2.0]);
        assert_eq!(config.gesture.click_tolerance, 4.0);
        // Untouched options keep their defaults
        assert_eq!(config.max_zoom, 18);
        assert_eq!(config.gesture.double_click_delay_ms, 300);
    }

    #[test]
    fn test_invalid_configs() {
        let inverted = MapConfig::default().with_zoom_limits(10, 2);
        assert!(matches!(inverted.validate(), Err(MapError::InvalidConfig(_))));

        let nan_center = MapConfig::default().with_center(LatLng::new(f64::NAN, 0.0));
        assert!(matches!(nan_center.validate(), Err(MapError::InvalidCoordinates(_))));

        let no_dprs = MapConfig::default().with_dprs(vec![], 1.0);
        assert!(no_dprs.validate().is_err());

        let bad_bounds = MapConfig::default().with_limit_bounds(
            LimitBounds::Edge,
            Some(LatLngBounds::from_coords(10.0, 0.0, -10.0, 5.0)),
        );
        assert!(bad_bounds.validate().is_err());

        assert!(matches!(
            MapConfig::from_json("{ \"zoom\": \"far\" }"),
            Err(MapError::Serialization(_))
        ));
    }
}
