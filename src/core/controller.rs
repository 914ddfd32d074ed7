//! The viewport controller owns the authoritative [`ViewportState`].
//!
//! Gesture recognition and the animation scheduler never touch the state
//! directly. They hand [`ViewportCommand`]s to the controller, which routes
//! every candidate through the [`BoundsClamper`] before committing it and
//! tells collaborators about the result through the [`EventManager`].

use crate::animation::{AnimationScheduler, StartOutcome, ZoomAnchor};
use crate::core::bounds::BoundsClamper;
use crate::core::config::MapConfig;
use crate::core::constants::ZOOM_ANIMATION_THRESHOLD;
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::viewport::ViewportState;
use crate::input::events::{InputEvent, MapEvent, MapEventKind};
use crate::input::gestures::{GestureMode, GestureOptions, GestureRecognizer};
use crate::input::handler::{EventManager, Intent, ViewportCommand};
use crate::tiles::grid::TileGrid;
use crate::Result;
use crossbeam_channel::Receiver;
use instant::{Duration, Instant};

pub struct ViewportController {
    config: MapConfig,
    clamper: BoundsClamper,
    state: ViewportState,
    animation: AnimationScheduler,
    gestures: GestureRecognizer,
    events: EventManager,
    mounted: bool,
}

impl ViewportController {
    /// Validates `config` and clamps the initial view into the configured limits
    pub fn new(config: MapConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;

        let clamper = config.clamper();
        let requested = ViewportState::new(config.center, config.zoom, width, height);
        let state = clamper.clamp(&requested);
        if state.zoom != requested.zoom {
            log::warn!(
                "initial zoom {} outside [{}, {}], using {}",
                requested.zoom,
                config.min_zoom,
                config.max_zoom,
                state.zoom
            );
        }
        if state.center != requested.center {
            log::warn!(
                "initial center {:?} outside the pan limits, using {:?}",
                requested.center,
                state.center
            );
        }

        let gestures = GestureRecognizer::new(config.gesture.clone(), gesture_options(&config));
        let animation = AnimationScheduler::new(config.animate);

        Ok(Self {
            config,
            clamper,
            state,
            animation,
            gestures,
            events: EventManager::new(),
            mounted: false,
        })
    }

    /// Announces the initial view. Only the first call emits.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        let event = self.bounds_event(true);
        self.events.emit(event);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn center(&self) -> LatLng {
        self.state.center
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    /// Visible area at the viewport corners
    pub fn bounds(&self) -> LatLngBounds {
        self.state.bounds()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn gesture_mode(&self) -> GestureMode {
        self.gestures.mode()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    pub fn subscribe(&mut self) -> Receiver<MapEvent> {
        self.events.subscribe()
    }

    pub fn pixel_to_lat_lng(&self, pixel: Point) -> LatLng {
        self.state.pixel_to_lat_lng(pixel)
    }

    pub fn lat_lng_to_pixel(&self, lat_lng: LatLng) -> Point {
        self.state.lat_lng_to_pixel(lat_lng)
    }

    /// Tiles covering the current view for the configured pixel ratio
    pub fn visible_tiles(&self) -> TileGrid {
        TileGrid::for_viewport(&self.state, &self.config.dprs, self.config.device_pixel_ratio)
    }

    /// Feeds raw input to gesture recognition. Nothing changes until the next
    /// [`frame`](Self::frame).
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.gestures.handle_event(event);
    }

    /// Per-frame entry point. Applies everything recognized since the last
    /// frame, then advances the animation. Returns whether another frame is
    /// needed.
    pub fn frame(&mut self, now: Instant) -> bool {
        let intents = self.gestures.drain();
        if !intents.is_empty() {
            log::trace!("frame with {} intents", intents.len());
        }

        for intent in intents {
            match intent {
                Intent::Command(command) => self.apply_command(command, now),
                Intent::Click { pixel, source } => {
                    let lat_lng = self.state.pixel_to_lat_lng(pixel);
                    self.events.emit(MapEvent::Click {
                        event: source,
                        lat_lng,
                        pixel,
                    });
                }
                Intent::Warning(kind) => self.events.emit(MapEvent::GestureWarning(kind)),
            }
        }

        if let Some(frame) = self.animation.tick(now) {
            self.apply_command(
                ViewportCommand::AnimationTick {
                    center: frame.state.center,
                    zoom: frame.state.zoom,
                },
                now,
            );
            if frame.finished {
                self.events.emit(MapEvent::AnimationStop);
            }
        }

        self.animation.is_running() || self.gestures.is_active() || self.gestures.has_pending()
    }

    /// Applies one command. Commands that do not continue or replace an
    /// animation cancel the running one first.
    pub fn apply_command(&mut self, command: ViewportCommand, now: Instant) {
        if !command.supersedes_animation() {
            self.stop_animation();
        }

        match command {
            ViewportCommand::PanBy { delta } => {
                if delta.is_finite() {
                    self.commit(self.state.panned_by(delta));
                }
            }
            ViewportCommand::CommitPan => self.commit(self.state.committed()),
            ViewportCommand::ZoomBy {
                delta,
                anchor,
                snap,
                animate,
            } => {
                let delta = if delta.is_finite() { delta } else { 0.0 };
                // Animated zooms chain onto the running target
                let base = match self.animation.target() {
                    Some(target) if animate => target.zoom,
                    _ => self.state.zoom,
                };
                let mut zoom = base + delta;
                if snap {
                    zoom = zoom.round();
                }
                self.zoom_around(zoom, anchor, animate, now);
            }
            ViewportCommand::ZoomAt {
                zoom,
                anchor,
                animate,
            } => {
                let zoom = if zoom.is_finite() { zoom } else { self.state.zoom };
                self.zoom_around(zoom, anchor, animate, now);
            }
            ViewportCommand::SetCenterZoom {
                center,
                zoom,
                animate,
            } => self.set_view(center, zoom, animate, now),
            ViewportCommand::Fling { offset } => {
                if offset.is_finite() && !offset.is_zero() {
                    self.fling(offset, now);
                }
            }
            ViewportCommand::AnimationTick { center, zoom } => {
                if center.lat.is_finite() && center.lng.is_finite() && zoom.is_finite() {
                    self.commit(ViewportState {
                        center,
                        zoom,
                        ..self.state
                    });
                }
            }
            ViewportCommand::CancelAnimation => {}
        }
    }

    pub fn set_center_zoom(&mut self, center: LatLng, zoom: f64, animate: bool, now: Instant) {
        self.apply_command(
            ViewportCommand::SetCenterZoom {
                center,
                zoom,
                animate,
            },
            now,
        );
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.state.width && height == self.state.height {
            return;
        }
        log::debug!("resized to {}x{}", width, height);
        self.commit(ViewportState {
            width,
            height,
            ..self.state
        });
    }

    /// Turns animated transitions on or off. Disabling stops a running one.
    pub fn set_animate(&mut self, animate: bool) {
        self.config.animate = animate;
        self.animation.set_enabled(animate);
        if !animate {
            self.stop_animation();
        }
    }

    /// Changes the options that steer input handling. `animate` is set
    /// separately through [`set_animate`](Self::set_animate).
    pub fn set_gesture_options(&mut self, options: GestureOptions) {
        self.config.mouse_events = options.mouse_events;
        self.config.touch_events = options.touch_events;
        self.config.meta_wheel_zoom = options.meta_wheel_zoom;
        self.config.two_finger_drag = options.two_finger_drag;
        self.config.zoom_snap = options.zoom_snap;
        self.config.inertia = options.inertia;
        self.gestures.set_options(options);
    }

    /// Stops a running animation, leaving the view where the last tick put it
    pub fn stop_animation(&mut self) {
        if self.animation.stop() {
            self.events.emit(MapEvent::AnimationStop);
        }
    }

    fn zoom_around(&mut self, zoom: f64, anchor: Point, animate: bool, now: Instant) {
        let anchor = if anchor.is_finite() {
            anchor
        } else {
            self.state.screen_center()
        };
        let zoom = self.clamper.clamp_zoom(zoom);

        if !animate {
            self.commit(self.state.zoomed_around(zoom, anchor));
            return;
        }

        let from = self.commit_pan_for_animation();
        let anchored = from.zoomed_around(zoom, anchor);
        let target = self.clamper.clamp(&anchored);
        // A target moved by the pan limits cannot keep the anchor fixed
        let anchor = (target.center == anchored.center).then(|| ZoomAnchor {
            lat_lng: from.unclamped_lat_lng(anchor),
            pixel: anchor,
        });
        self.animate_to(from, target, anchor, self.config.animation_duration(), now);
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animate: bool, now: Instant) {
        let center = center.sanitized_or(self.state.center);
        let zoom = if zoom.is_finite() { zoom } else { self.state.zoom };

        let from = self.commit_pan_for_animation();
        let target = self.clamper.clamp(&ViewportState {
            center,
            zoom,
            ..from
        });

        if animate {
            self.animate_to(from, target, None, self.config.animation_duration(), now);
        } else {
            self.commit(target);
        }
    }

    /// Continues a released drag: the content keeps moving by `offset`
    fn fling(&mut self, offset: Point, now: Instant) {
        let from = self.commit_pan_for_animation();
        let center = from.unclamped_lat_lng(from.screen_center().subtract(&offset));
        let target = self.clamper.clamp(&ViewportState { center, ..from });

        let diagonal = from.diagonal().max(1.0);
        let ratio = (offset.length() / diagonal).min(1.0);
        let duration = self.config.gesture.diagonal_throw_time().mul_f64(ratio);
        log::debug!("fling by {:?} over {:?}", offset, duration);
        self.animate_to(from, target, None, duration, now);
    }

    /// Animations interpolate `center`, so a pending drag offset is folded in first
    fn commit_pan_for_animation(&mut self) -> ViewportState {
        if !self.state.pixel_delta.is_zero() {
            self.commit(self.state.committed());
        }
        self.state
    }

    fn animate_to(
        &mut self,
        from: ViewportState,
        target: ViewportState,
        anchor: Option<ZoomAnchor>,
        duration: Duration,
        now: Instant,
    ) {
        if target.center == from.center && target.zoom == from.zoom {
            self.stop_animation();
            return;
        }

        let screens = from.distance_in_screens(target.center);
        let zoom_change = (target.zoom - from.zoom).abs();
        if screens > self.config.animate_max_screens || zoom_change > ZOOM_ANIMATION_THRESHOLD {
            log::debug!(
                "skipping animation over {:.1} screens and {:.1} zoom levels",
                screens,
                zoom_change
            );
            self.stop_animation();
            self.commit(target);
            return;
        }

        match self
            .animation
            .start(from, target, duration, self.config.easing, anchor, now)
        {
            StartOutcome::Started => self.events.emit(MapEvent::AnimationStart),
            StartOutcome::Superseded => {}
            StartOutcome::Immediate(state) => self.commit(state),
        }
    }

    /// Clamps `candidate`, stores it and notifies when the committed view changed
    fn commit(&mut self, candidate: ViewportState) {
        let next = self.clamper.clamp(&candidate);
        let previous = std::mem::replace(&mut self.state, next);

        // The in-flight drag offset is not part of the committed view
        let changed = previous.center != next.center
            || previous.zoom != next.zoom
            || previous.width != next.width
            || previous.height != next.height;
        if changed {
            let event = self.bounds_event(false);
            self.events.emit(event);
        }
    }

    fn bounds_event(&self, initial: bool) -> MapEvent {
        MapEvent::BoundsChanged {
            center: self.state.center.normalized(),
            zoom: self.state.zoom,
            bounds: self.state.bounds(),
            initial,
        }
    }
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("state", &self.state)
            .field("animating", &self.animation.is_running())
            .field("gesture", &self.gestures.mode())
            .finish()
    }
}

fn gesture_options(config: &MapConfig) -> GestureOptions {
    GestureOptions {
        mouse_events: config.mouse_events,
        touch_events: config.touch_events,
        meta_wheel_zoom: config.meta_wheel_zoom,
        two_finger_drag: config.two_finger_drag,
        zoom_snap: config.zoom_snap,
        inertia: config.inertia,
    }
}
