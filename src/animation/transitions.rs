use crate::animation::interpolation::EasingFunction;
use crate::core::geo::{LatLng, Point};
use crate::core::viewport::ViewportState;
use crate::traits::Lerp;
use instant::{Duration, Instant};

/// Geographic point that stays under a fixed pixel for the whole animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomAnchor {
    pub lat_lng: LatLng,
    pub pixel: Point,
}

/// One eased move between two viewports
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: ViewportState,
    pub to: ViewportState,
    pub start_time: Instant,
    pub duration: Duration,
    pub easing: EasingFunction,
    pub anchor: Option<ZoomAnchor>,
}

impl Transition {
    /// Linear progress in `[0, 1]`; a zero duration is complete immediately
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Interpolated viewport at `now` and whether the transition is complete
    pub fn state_at(&self, now: Instant) -> (ViewportState, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.to, true);
        }

        let t = self.easing.apply(progress);
        let zoom = self.from.zoom.lerp(&self.to.zoom, t);
        let center = match &self.anchor {
            Some(anchor) => self.from.center_for_anchor(anchor.lat_lng, anchor.pixel, zoom),
            None => self.from.center.lerp(&self.to.center, t),
        };

        let state = ViewportState {
            center,
            zoom,
            ..self.to
        };
        (state, false)
    }
}

/// What `start` did with the requested transition
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// Animations are disabled; the target applies at once and nothing is notified
    Immediate(ViewportState),
    /// The scheduler went from idle to running
    Started,
    /// A running transition was replaced without a stop/start pair
    Superseded,
}

/// A single frame produced while running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub state: ViewportState,
    pub finished: bool,
}

/// Drives at most one transition at a time
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    enabled: bool,
    current: Option<Transition>,
}

impl AnimationScheduler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Transition> {
        self.current.as_ref()
    }

    /// Target of the running transition
    pub fn target(&self) -> Option<&ViewportState> {
        self.current.as_ref().map(|transition| &transition.to)
    }

    /// Starts moving from `from` to `to`. When a transition is already running
    /// the caller passes the currently shown state as `from`, so chained
    /// animations continue without a jump.
    pub fn start(
        &mut self,
        from: ViewportState,
        to: ViewportState,
        duration: Duration,
        easing: EasingFunction,
        anchor: Option<ZoomAnchor>,
        now: Instant,
    ) -> StartOutcome {
        if !self.enabled {
            self.current = None;
            return StartOutcome::Immediate(to);
        }

        let superseded = self.current.is_some();
        self.current = Some(Transition {
            from,
            to,
            start_time: now,
            duration,
            easing,
            anchor,
        });

        if superseded {
            log::debug!("animation superseded, new target zoom {:.2}", to.zoom);
            StartOutcome::Superseded
        } else {
            log::debug!("animation started towards zoom {:.2}", to.zoom);
            StartOutcome::Started
        }
    }

    /// Advances the running transition. Returns `None` when idle.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationFrame> {
        let transition = self.current.as_ref()?;
        let (state, finished) = transition.state_at(now);
        log::trace!("animation tick zoom {:.3} finished {}", state.zoom, finished);
        if finished {
            self.current = None;
            log::debug!("animation finished");
        }
        Some(AnimationFrame { state, finished })
    }

    /// Cancels the running transition. Returns `true` only if one was running,
    /// so the caller emits exactly one stop notification.
    pub fn stop(&mut self) -> bool {
        let was_running = self.current.take().is_some();
        if was_running {
            log::debug!("animation cancelled");
        }
        was_running
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(lat: f64, lng: f64, zoom: f64) -> ViewportState {
        ViewportState::new(LatLng::new(lat, lng), zoom, 800, 600)
    }

    #[test]
    fn test_runs_to_completion() {
        let mut scheduler = AnimationScheduler::new(true);
        let start = Instant::now();
        let outcome = scheduler.start(
            view(0.0, 0.0, 5.0),
            view(10.0, 20.0, 7.0),
            Duration::from_millis(300),
            EasingFunction::Linear,
            None,
            start,
        );
        assert_eq!(outcome, StartOutcome::Started);
        assert!(scheduler.is_running());

        let mid = scheduler.tick(start + Duration::from_millis(150)).unwrap();
        assert!(!mid.finished);
        assert!((mid.state.zoom - 6.0).abs() < 1e-9);
        assert!((mid.state.center.lat - 5.0).abs() < 1e-9);
        assert!((mid.state.center.lng - 10.0).abs() < 1e-9);

        let end = scheduler.tick(start + Duration::from_millis(400)).unwrap();
        assert!(end.finished);
        assert_eq!(end.state, view(10.0, 20.0, 7.0));
        assert!(!scheduler.is_running());
        assert!(scheduler.tick(start + Duration::from_millis(500)).is_none());
    }

    #[test]
    fn test_disabled_applies_immediately() {
        let mut scheduler = AnimationScheduler::new(false);
        let target = view(1.0, 2.0, 9.0);
        let outcome = scheduler.start(
            view(0.0, 0.0, 5.0),
            target,
            Duration::from_millis(300),
            EasingFunction::EaseOutQuad,
            None,
            Instant::now(),
        );
        assert_eq!(outcome, StartOutcome::Immediate(target));
        assert!(!scheduler.is_running());
        assert!(!scheduler.stop());
    }

    #[test]
    fn test_zero_duration_finishes_on_next_tick() {
        let mut scheduler = AnimationScheduler::new(true);
        let now = Instant::now();
        scheduler.start(
            view(0.0, 0.0, 5.0),
            view(0.0, 0.0, 6.0),
            Duration::ZERO,
            EasingFunction::Linear,
            None,
            now,
        );
        let frame = scheduler.tick(now).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.state.zoom, 6.0);
    }

    #[test]
    fn test_supersede_reports_no_restart() {
        let mut scheduler = AnimationScheduler::new(true);
        let now = Instant::now();
        scheduler.start(
            view(0.0, 0.0, 5.0),
            view(0.0, 0.0, 6.0),
            Duration::from_millis(300),
            EasingFunction::Linear,
            None,
            now,
        );
        let shown = scheduler.tick(now + Duration::from_millis(100)).unwrap().state;
        let outcome = scheduler.start(
            shown,
            view(0.0, 0.0, 8.0),
            Duration::from_millis(300),
            EasingFunction::Linear,
            None,
            now + Duration::from_millis(100),
        );
        assert_eq!(outcome, StartOutcome::Superseded);

        // Continues from the shown state, not from the first origin
        let frame = scheduler.tick(now + Duration::from_millis(100)).unwrap();
        assert!((frame.state.zoom - shown.zoom).abs() < 1e-9);
        assert_eq!(scheduler.target().map(|t| t.zoom), Some(8.0));
    }

    #[test]
    fn test_stop_reports_once() {
        let mut scheduler = AnimationScheduler::new(true);
        let now = Instant::now();
        scheduler.start(
            view(0.0, 0.0, 5.0),
            view(0.0, 0.0, 6.0),
            Duration::from_millis(300),
            EasingFunction::Linear,
            None,
            now,
        );
        assert!(scheduler.stop());
        assert!(!scheduler.stop());
    }

    #[test]
    fn test_anchor_stays_fixed_during_zoom() {
        let from = view(50.879, 4.6997, 12.0);
        let pixel = Point::new(650.0, 120.0);
        let lat_lng = from.pixel_to_lat_lng(pixel);
        let to = from.zoomed_around(14.0, pixel);

        let mut scheduler = AnimationScheduler::new(true);
        let now = Instant::now();
        scheduler.start(
            from,
            to,
            Duration::from_millis(300),
            EasingFunction::EaseOutQuad,
            Some(ZoomAnchor { lat_lng, pixel }),
            now,
        );

        for ms in [30, 120, 250] {
            let frame = scheduler.tick(now + Duration::from_millis(ms)).unwrap();
            assert!(frame.state.zoom > 12.0 && frame.state.zoom < 14.0);
            assert!(frame.state.lat_lng_to_pixel(lat_lng).distance_to(&pixel) < 1e-6);
        }
    }
}
