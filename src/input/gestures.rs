use crate::core::constants::{
    CLICK_TIMEOUT_MS, CLICK_TOLERANCE, DIAGONAL_THROW_TIME_MS, DOUBLE_CLICK_DELAY_MS,
    DOUBLE_CLICK_DISTANCE, MIN_DRAG_FOR_THROW, SCROLL_PIXELS_FOR_ZOOM_LEVEL,
    THROW_SAMPLE_WINDOW_MS, TOUCH_MOUSE_SUPPRESSION_MS,
};
use crate::core::geo::Point;
use crate::input::events::{
    InputEvent, KeyModifiers, MouseButton, PointerKind, TouchEventType, TouchPoint, WarningKind,
};
use crate::input::handler::{Intent, ViewportCommand};
use fxhash::FxHashMap as HashMap;
use instant::{Duration, Instant};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Thresholds used by gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Maximum pointer displacement in pixels for a press to count as a click
    pub click_tolerance: f64,
    /// Maximum press duration for a click
    pub click_timeout_ms: u64,
    /// Maximum time between two clicks of a double click
    pub double_click_delay_ms: u64,
    /// Maximum distance between two clicks of a double click
    pub double_click_distance: f64,
    /// Wheel delta that changes the zoom by one level
    pub wheel_pixels_per_zoom_level: f64,
    /// Pointer samples older than this are ignored when measuring a throw
    pub throw_sample_window_ms: u64,
    /// Minimum recent movement in pixels for a release to become a throw
    pub min_drag_for_throw: f64,
    /// Duration of a throw across the full viewport diagonal
    pub diagonal_throw_time_ms: u64,
    /// Mouse input is ignored this long after the last touch ends
    pub touch_mouse_suppression_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_tolerance: CLICK_TOLERANCE,
            click_timeout_ms: CLICK_TIMEOUT_MS,
            double_click_delay_ms: DOUBLE_CLICK_DELAY_MS,
            double_click_distance: DOUBLE_CLICK_DISTANCE,
            wheel_pixels_per_zoom_level: SCROLL_PIXELS_FOR_ZOOM_LEVEL,
            throw_sample_window_ms: THROW_SAMPLE_WINDOW_MS,
            min_drag_for_throw: MIN_DRAG_FOR_THROW,
            diagonal_throw_time_ms: DIAGONAL_THROW_TIME_MS,
            touch_mouse_suppression_ms: TOUCH_MOUSE_SUPPRESSION_MS,
        }
    }
}

impl GestureConfig {
    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }

    pub fn double_click_delay(&self) -> Duration {
        Duration::from_millis(self.double_click_delay_ms)
    }

    pub fn throw_sample_window(&self) -> Duration {
        Duration::from_millis(self.throw_sample_window_ms)
    }

    pub fn diagonal_throw_time(&self) -> Duration {
        Duration::from_millis(self.diagonal_throw_time_ms)
    }

    pub fn touch_mouse_suppression(&self) -> Duration {
        Duration::from_millis(self.touch_mouse_suppression_ms)
    }
}

/// Map options that change how input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOptions {
    pub mouse_events: bool,
    pub touch_events: bool,
    pub meta_wheel_zoom: bool,
    pub two_finger_drag: bool,
    pub zoom_snap: bool,
    pub inertia: bool,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            mouse_events: true,
            touch_events: true,
            meta_wheel_zoom: false,
            two_finger_drag: false,
            zoom_snap: true,
            inertia: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureMode {
    #[default]
    Idle,
    Panning,
    Pinching,
    /// Wheel input is waiting for the next frame
    WheelZooming,
}

#[derive(Debug, Clone, Copy)]
struct PinchBaseline {
    midpoint: Point,
    distance: f64,
}

/// One pointer-down to pointer-up sequence. Created on the first down and
/// dropped when the last pointer lifts.
#[derive(Debug, Clone)]
struct Interaction {
    source: PointerKind,
    mode: GestureMode,
    start_position: Point,
    start_time: Instant,
    last_position: Point,
    touches: HashMap<u64, Point>,
    pinch: Option<PinchBaseline>,
    pinch_anchor: Point,
    max_touches: usize,
    moved: bool,
    panned: bool,
    pinched: bool,
    warned: bool,
    samples: VecDeque<(Instant, Point)>,
}

impl Interaction {
    fn new(source: PointerKind, position: Point, time: Instant) -> Self {
        let mut samples = VecDeque::new();
        samples.push_back((time, position));
        Self {
            source,
            mode: GestureMode::Panning,
            start_position: position,
            start_time: time,
            last_position: position,
            touches: HashMap::default(),
            pinch: None,
            pinch_anchor: position,
            max_touches: 1,
            moved: false,
            panned: false,
            pinched: false,
            warned: false,
            samples,
        }
    }

    /// Moves the single tracked pointer and returns the displacement
    fn track_pointer(&mut self, position: Point, time: Instant, config: &GestureConfig) -> Point {
        let delta = position.subtract(&self.last_position);
        self.last_position = position;
        self.note_displacement(position, config);

        self.samples.push_back((time, position));
        let window = config.throw_sample_window();
        while let Some((sampled_at, _)) = self.samples.front() {
            if time.saturating_duration_since(*sampled_at) <= window {
                break;
            }
            self.samples.pop_front();
        }
        delta
    }

    fn note_displacement(&mut self, position: Point, config: &GestureConfig) {
        if position.distance_to(&self.start_position) > config.click_tolerance {
            self.moved = true;
        }
    }

    /// Movement over the recent sample window ending at `release`
    fn throw_offset(&self, release: Point, time: Instant, window: Duration) -> Option<Point> {
        self.samples
            .iter()
            .find(|(sampled_at, _)| time.saturating_duration_since(*sampled_at) <= window)
            .map(|(_, position)| release.subtract(position))
    }

    /// Makes the tracked touches match `touches`. Returns the last position of
    /// a touch that went away, if any.
    fn sync_touches(&mut self, touches: &[TouchPoint]) -> Option<Point> {
        let mut lifted = None;
        self.touches.retain(|id, last| {
            let listed = touches.iter().any(|touch| touch.id == *id);
            if !listed && lifted.is_none() {
                lifted = Some(*last);
            }
            listed
        });
        for touch in touches {
            self.touches.entry(touch.id).or_insert(touch.position);
        }
        lifted
    }

    /// The two touches with the lowest ids drive a pinch
    fn pinch_pair(&self) -> Option<(Point, Point)> {
        let mut ids: Vec<&u64> = self.touches.keys().collect();
        ids.sort();
        match ids.as_slice() {
            [a, b, ..] => Some((self.touches[*a], self.touches[*b])),
            _ => None,
        }
    }

    /// Re-derives the mode after fingers were added or lifted
    fn retarget(&mut self) {
        self.max_touches = self.max_touches.max(self.touches.len());
        match self.pinch_pair() {
            Some((a, b)) => {
                self.mode = GestureMode::Pinching;
                self.pinch = Some(PinchBaseline {
                    midpoint: a.midpoint(&b),
                    distance: a.distance_to(&b),
                });
            }
            None => {
                self.mode = GestureMode::Panning;
                self.pinch = None;
                if let Some(position) = self.touches.values().next() {
                    self.last_position = *position;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingZoom {
    delta: f64,
    anchor: Point,
    snap: bool,
    animate: bool,
}

/// Turns raw pointer, touch and wheel input into viewport intents.
///
/// Continuous movement is accumulated and released once per frame by
/// [`GestureRecognizer::drain`]; discrete intents keep their order relative to
/// the movement around them.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    options: GestureOptions,
    interaction: Option<Interaction>,
    last_click: Option<(Point, Instant)>,
    last_touch_end: Option<Instant>,
    pending_pan: Point,
    pending_zoom: Option<PendingZoom>,
    queue: Vec<Intent>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig, options: GestureOptions) -> Self {
        Self {
            config,
            options,
            interaction: None,
            last_click: None,
            last_touch_end: None,
            pending_pan: Point::zero(),
            pending_zoom: None,
            queue: Vec::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn options(&self) -> GestureOptions {
        self.options
    }

    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    pub fn mode(&self) -> GestureMode {
        match &self.interaction {
            Some(interaction) => interaction.mode,
            None if self.pending_zoom.is_some() => GestureMode::WheelZooming,
            None => GestureMode::Idle,
        }
    }

    /// A pointer is currently down
    pub fn is_active(&self) -> bool {
        self.interaction.is_some()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty() || !self.pending_pan.is_zero() || self.pending_zoom.is_some()
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseDown {
                position,
                button,
                time,
                on_interactive,
            } => self.mouse_down(*position, *button, *time, *on_interactive),
            InputEvent::MouseMove { position, time } => self.mouse_move(*position, *time),
            InputEvent::MouseUp { position, time } => self.mouse_up(*position, *time),
            InputEvent::Wheel {
                delta,
                position,
                modifiers,
                ..
            } => self.wheel(*delta, *position, *modifiers),
            InputEvent::Touch {
                event_type,
                touches,
                time,
                on_interactive,
            } => {
                if !self.options.touch_events {
                    return;
                }
                match event_type {
                    TouchEventType::Start => self.touch_start(touches, *time, *on_interactive),
                    TouchEventType::Move => self.touch_move(touches, *time),
                    TouchEventType::End => self.touch_end(touches, *time),
                    TouchEventType::Cancel => self.cancel(*time),
                }
            }
            InputEvent::Cancel { time } => self.cancel(*time),
        }
    }

    /// Everything recognized since the previous frame, in order
    pub fn drain(&mut self) -> Vec<Intent> {
        self.flush_continuous();
        std::mem::take(&mut self.queue)
    }

    fn mouse_down(&mut self, position: Point, button: MouseButton, time: Instant, on_interactive: bool) {
        if !self.options.mouse_events || button != MouseButton::Left {
            return;
        }
        if self.touch_suppresses_mouse(time) {
            log::debug!("mouse down ignored while touch input is active");
            return;
        }
        if self.interaction.is_some() {
            log::debug!("duplicate mouse down ignored");
            return;
        }
        if on_interactive {
            log::debug!("mouse down on interactive child ignored");
            return;
        }
        self.begin(PointerKind::Mouse, position, time);
    }

    fn mouse_move(&mut self, position: Point, time: Instant) {
        let delta = match self.interaction.as_mut() {
            Some(interaction) if interaction.source == PointerKind::Mouse => {
                interaction.track_pointer(position, time, &self.config)
            }
            _ => return,
        };
        self.push_pan(delta);
    }

    fn mouse_up(&mut self, position: Point, time: Instant) {
        match &self.interaction {
            Some(interaction) if interaction.source == PointerKind::Mouse => {}
            _ => {
                log::debug!("mouse up without a matching down ignored");
                return;
            }
        }
        self.mouse_move(position, time);
        self.finish(Some(position), time);
    }

    fn wheel(&mut self, delta: f64, position: Point, modifiers: KeyModifiers) {
        if !self.options.mouse_events || !delta.is_finite() || delta == 0.0 {
            return;
        }
        if self.options.meta_wheel_zoom && !modifiers.zoom_modifier() {
            self.push_discrete(Intent::Warning(WarningKind::MetaWheelZoom));
            return;
        }
        let levels = -delta / self.config.wheel_pixels_per_zoom_level;
        // The next drag move would cancel an animated zoom before it ran
        let animate = self.interaction.is_none();
        self.push_zoom(levels, position, self.options.zoom_snap, animate);
    }

    fn touch_start(&mut self, touches: &[TouchPoint], time: Instant, on_interactive: bool) {
        if matches!(&self.interaction, Some(interaction) if interaction.source == PointerKind::Mouse) {
            log::debug!("touch started during a mouse gesture, touch takes over");
            self.finish(None, time);
        }

        if self.interaction.is_none() {
            if on_interactive {
                log::debug!("touch start on interactive child ignored");
                return;
            }
            let Some(first) = touches.first() else {
                return;
            };
            self.begin(PointerKind::Touch, first.position, time);
        }

        if let Some(interaction) = self.interaction.as_mut() {
            interaction.sync_touches(touches);
            interaction.retarget();
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint], time: Instant) {
        let Some(interaction) = self.interaction.as_mut() else {
            return;
        };
        if interaction.source != PointerKind::Touch {
            return;
        }
        for touch in touches {
            if let Some(last) = interaction.touches.get_mut(&touch.id) {
                *last = touch.position;
            }
        }

        if let Some(baseline) = interaction.pinch {
            let Some((a, b)) = interaction.pinch_pair() else {
                return;
            };
            let midpoint = a.midpoint(&b);
            let distance = a.distance_to(&b);
            let levels = if baseline.distance > 0.0 && distance > 0.0 {
                (distance / baseline.distance).log2()
            } else {
                0.0
            };
            interaction.pinch = Some(PinchBaseline { midpoint, distance });
            interaction.pinch_anchor = midpoint;
            interaction.moved = true;
            if levels != 0.0 {
                interaction.pinched = true;
            }

            self.push_pan(midpoint.subtract(&baseline.midpoint));
            if levels != 0.0 {
                self.push_zoom(levels, midpoint, false, false);
            }
            return;
        }

        let Some(position) = interaction.touches.values().next().copied() else {
            return;
        };
        if self.options.two_finger_drag {
            interaction.note_displacement(position, &self.config);
            if interaction.moved && !interaction.warned {
                interaction.warned = true;
                self.push_discrete(Intent::Warning(WarningKind::TwoFingerDrag));
            }
            return;
        }
        let delta = interaction.track_pointer(position, time, &self.config);
        self.push_pan(delta);
    }

    fn touch_end(&mut self, touches: &[TouchPoint], time: Instant) {
        let Some(interaction) = self.interaction.as_mut() else {
            log::debug!("touch end without an active gesture ignored");
            return;
        };
        if interaction.source != PointerKind::Touch {
            return;
        }
        let Some(lifted) = interaction.sync_touches(touches) else {
            log::debug!("touch end for an untracked touch ignored");
            return;
        };

        if interaction.touches.is_empty() {
            self.last_touch_end = Some(time);
            self.finish(Some(lifted), time);
        } else {
            interaction.retarget();
        }
    }

    fn cancel(&mut self, time: Instant) {
        if matches!(&self.interaction, Some(interaction) if interaction.source == PointerKind::Touch) {
            self.last_touch_end = Some(time);
        }
        self.finish(None, time);
    }

    fn touch_suppresses_mouse(&self, time: Instant) -> bool {
        if matches!(&self.interaction, Some(interaction) if interaction.source == PointerKind::Touch) {
            return true;
        }
        self.last_touch_end.map_or(false, |ended| {
            time.saturating_duration_since(ended) < self.config.touch_mouse_suppression()
        })
    }

    fn begin(&mut self, source: PointerKind, position: Point, time: Instant) {
        log::trace!("{:?} gesture started at {:?}", source, position);
        self.push_discrete(Intent::Command(ViewportCommand::CancelAnimation));
        self.interaction = Some(Interaction::new(source, position, time));
    }

    /// Ends the interaction. `release` is `None` when it was cancelled, which
    /// suppresses click and throw detection.
    fn finish(&mut self, release: Option<Point>, time: Instant) {
        let Some(interaction) = self.interaction.take() else {
            return;
        };

        if interaction.panned {
            self.push_discrete(Intent::Command(ViewportCommand::CommitPan));
        }
        if interaction.pinched && self.options.zoom_snap {
            self.push_discrete(Intent::Command(ViewportCommand::ZoomBy {
                delta: 0.0,
                anchor: interaction.pinch_anchor,
                snap: true,
                animate: true,
            }));
        }

        let Some(position) = release else {
            return;
        };
        let single = interaction.max_touches <= 1;
        let elapsed = time.saturating_duration_since(interaction.start_time);

        if !interaction.moved && single && elapsed <= self.config.click_timeout() {
            self.click(position, interaction.source, time);
        } else if interaction.panned && single && !interaction.pinched && self.options.inertia {
            let window = self.config.throw_sample_window();
            if let Some(offset) = interaction.throw_offset(position, time, window) {
                if offset.length() > self.config.min_drag_for_throw {
                    log::debug!("throw by {:?}", offset);
                    self.push_discrete(Intent::Command(ViewportCommand::Fling { offset }));
                }
            }
        }
    }

    fn click(&mut self, position: Point, source: PointerKind, time: Instant) {
        let double = self.last_click.map_or(false, |(previous, at)| {
            time.saturating_duration_since(at) <= self.config.double_click_delay()
                && previous.distance_to(&position) <= self.config.double_click_distance
        });

        if double {
            self.last_click = None;
            self.push_discrete(Intent::Command(ViewportCommand::ZoomBy {
                delta: 1.0,
                anchor: position,
                snap: self.options.zoom_snap,
                animate: true,
            }));
        } else {
            self.last_click = Some((position, time));
            self.push_discrete(Intent::Click {
                pixel: position,
                source,
            });
        }
    }

    fn push_pan(&mut self, delta: Point) {
        if delta.is_zero() || !delta.is_finite() {
            return;
        }
        if let Some(interaction) = self.interaction.as_mut() {
            interaction.panned = true;
        }
        self.pending_pan = self.pending_pan.add(&delta);
    }

    fn push_zoom(&mut self, delta: f64, anchor: Point, snap: bool, animate: bool) {
        match self.pending_zoom.as_mut() {
            Some(pending) if pending.snap == snap && pending.animate == animate => {
                pending.delta += delta;
                pending.anchor = anchor;
            }
            _ => {
                self.flush_continuous();
                self.pending_zoom = Some(PendingZoom {
                    delta,
                    anchor,
                    snap,
                    animate,
                });
            }
        }
    }

    fn push_discrete(&mut self, intent: Intent) {
        self.flush_continuous();
        // Repeated warnings within one frame collapse into one
        if matches!(intent, Intent::Warning(_)) && self.queue.last() == Some(&intent) {
            return;
        }
        self.queue.push(intent);
    }

    fn flush_continuous(&mut self) {
        if !self.pending_pan.is_zero() {
            let delta = std::mem::replace(&mut self.pending_pan, Point::zero());
            self.queue.push(Intent::Command(ViewportCommand::PanBy { delta }));
        }
        if let Some(zoom) = self.pending_zoom.take() {
            self.queue.push(Intent::Command(ViewportCommand::ZoomBy {
                delta: zoom.delta,
                anchor: zoom.anchor,
                snap: zoom.snap,
                animate: zoom.animate,
            }));
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default(), GestureOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    fn down(position: Point, time: Instant) -> InputEvent {
        InputEvent::MouseDown {
            position,
            button: MouseButton::Left,
            time,
            on_interactive: false,
        }
    }

    fn moved(position: Point, time: Instant) -> InputEvent {
        InputEvent::MouseMove { position, time }
    }

    fn up(position: Point, time: Instant) -> InputEvent {
        InputEvent::MouseUp { position, time }
    }

    fn wheel(delta: f64, position: Point, time: Instant) -> InputEvent {
        InputEvent::Wheel {
            delta,
            position,
            modifiers: KeyModifiers::default(),
            time,
        }
    }

    fn touch(event_type: TouchEventType, touches: &[(u64, f64, f64)], time: Instant) -> InputEvent {
        InputEvent::Touch {
            event_type,
            touches: touches
                .iter()
                .map(|(id, x, y)| TouchPoint::new(*id, Point::new(*x, *y)))
                .collect(),
            time,
            on_interactive: false,
        }
    }

    fn recognizer(options: GestureOptions) -> GestureRecognizer {
        GestureRecognizer::new(GestureConfig::default(), options)
    }

    const CANCEL: Intent = Intent::Command(ViewportCommand::CancelAnimation);

    #[test]
    fn test_drag_coalesces_per_frame() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&down(Point::new(100.0, 100.0), t0));
        assert_eq!(gestures.mode(), GestureMode::Panning);
        gestures.handle_event(&moved(Point::new(110.0, 100.0), at(t0, 200)));
        gestures.handle_event(&moved(Point::new(130.0, 95.0), at(t0, 210)));

        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Command(ViewportCommand::PanBy {
                    delta: Point::new(30.0, -5.0)
                }),
            ]
        );

        // Released after holding still, so no throw
        gestures.handle_event(&up(Point::new(130.0, 95.0), at(t0, 600)));
        assert_eq!(gestures.drain(), vec![Intent::Command(ViewportCommand::CommitPan)]);
        assert_eq!(gestures.mode(), GestureMode::Idle);
    }

    #[test]
    fn test_click_and_double_click() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();
        let p = Point::new(200.0, 150.0);

        gestures.handle_event(&down(p, t0));
        gestures.handle_event(&moved(Point::new(201.0, 150.0), at(t0, 20)));
        gestures.handle_event(&up(Point::new(201.0, 150.0), at(t0, 50)));
        let first = gestures.drain();
        assert_eq!(
            first.last(),
            Some(&Intent::Click {
                pixel: Point::new(201.0, 150.0),
                source: PointerKind::Mouse
            })
        );

        gestures.handle_event(&down(p, at(t0, 150)));
        gestures.handle_event(&up(p, at(t0, 180)));
        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Command(ViewportCommand::ZoomBy {
                    delta: 1.0,
                    anchor: p,
                    snap: true,
                    animate: true
                }),
            ]
        );
    }

    #[test]
    fn test_no_click_after_drag_or_long_press() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&down(Point::new(0.0, 0.0), t0));
        gestures.handle_event(&moved(Point::new(5.0, 0.0), at(t0, 400)));
        gestures.handle_event(&up(Point::new(5.0, 0.0), at(t0, 450)));
        assert!(!gestures
            .drain()
            .iter()
            .any(|intent| matches!(intent, Intent::Click { .. })));

        gestures.handle_event(&down(Point::new(0.0, 0.0), at(t0, 2000)));
        gestures.handle_event(&up(Point::new(0.0, 0.0), at(t0, 2500)));
        assert_eq!(gestures.drain(), vec![CANCEL]);
    }

    #[test]
    fn test_fast_release_throws() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&down(Point::new(100.0, 100.0), t0));
        gestures.handle_event(&moved(Point::new(150.0, 100.0), at(t0, 20)));
        gestures.handle_event(&moved(Point::new(200.0, 100.0), at(t0, 40)));
        gestures.handle_event(&up(Point::new(220.0, 100.0), at(t0, 50)));

        let intents = gestures.drain();
        assert_eq!(
            intents.last(),
            Some(&Intent::Command(ViewportCommand::Fling {
                offset: Point::new(120.0, 0.0)
            }))
        );

        let mut calm = recognizer(GestureOptions {
            inertia: false,
            ..Default::default()
        });
        calm.handle_event(&down(Point::new(100.0, 100.0), t0));
        calm.handle_event(&moved(Point::new(200.0, 100.0), at(t0, 40)));
        calm.handle_event(&up(Point::new(220.0, 100.0), at(t0, 50)));
        assert_eq!(
            calm.drain().last(),
            Some(&Intent::Command(ViewportCommand::CommitPan))
        );
    }

    #[test]
    fn test_wheel_batches_into_one_zoom() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();
        let p = Point::new(400.0, 300.0);

        gestures.handle_event(&wheel(-150.0, p, t0));
        gestures.handle_event(&wheel(-150.0, p, at(t0, 5)));
        assert_eq!(gestures.mode(), GestureMode::WheelZooming);

        assert_eq!(
            gestures.drain(),
            vec![Intent::Command(ViewportCommand::ZoomBy {
                delta: 2.0,
                anchor: p,
                snap: true,
                animate: true
            })]
        );
        assert_eq!(gestures.mode(), GestureMode::Idle);
    }

    #[test]
    fn test_wheel_during_drag_is_not_animated() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&down(Point::new(100.0, 100.0), t0));
        gestures.handle_event(&moved(Point::new(110.0, 100.0), at(t0, 16)));
        gestures.handle_event(&wheel(-150.0, Point::new(110.0, 100.0), at(t0, 20)));

        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Command(ViewportCommand::PanBy {
                    delta: Point::new(10.0, 0.0)
                }),
                Intent::Command(ViewportCommand::ZoomBy {
                    delta: 1.0,
                    anchor: Point::new(110.0, 100.0),
                    snap: true,
                    animate: false
                }),
            ]
        );
        assert_eq!(gestures.mode(), GestureMode::Panning);
    }

    #[test]
    fn test_meta_wheel_zoom_requires_modifier() {
        let mut gestures = recognizer(GestureOptions {
            meta_wheel_zoom: true,
            ..Default::default()
        });
        let t0 = Instant::now();

        gestures.handle_event(&wheel(100.0, Point::zero(), t0));
        gestures.handle_event(&wheel(100.0, Point::zero(), at(t0, 5)));
        assert_eq!(
            gestures.drain(),
            vec![Intent::Warning(WarningKind::MetaWheelZoom)]
        );

        gestures.handle_event(&InputEvent::Wheel {
            delta: 150.0,
            position: Point::zero(),
            modifiers: KeyModifiers {
                meta: true,
                ..Default::default()
            },
            time: at(t0, 10),
        });
        assert!(matches!(
            gestures.drain().as_slice(),
            [Intent::Command(ViewportCommand::ZoomBy { delta, .. })] if *delta == -1.0
        ));
    }

    #[test]
    fn test_pinch_zooms_around_midpoint() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&touch(TouchEventType::Start, &[(1, 300.0, 300.0)], t0));
        gestures.handle_event(&touch(
            TouchEventType::Start,
            &[(1, 300.0, 300.0), (2, 500.0, 300.0)],
            at(t0, 10),
        ));
        assert_eq!(gestures.mode(), GestureMode::Pinching);
        gestures.handle_event(&touch(
            TouchEventType::Move,
            &[(1, 200.0, 300.0), (2, 600.0, 300.0)],
            at(t0, 30),
        ));

        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Command(ViewportCommand::ZoomBy {
                    delta: 1.0,
                    anchor: Point::new(400.0, 300.0),
                    snap: false,
                    animate: false
                }),
            ]
        );

        gestures.handle_event(&touch(TouchEventType::End, &[(1, 200.0, 300.0)], at(t0, 60)));
        assert_eq!(gestures.mode(), GestureMode::Panning);
        gestures.handle_event(&touch(TouchEventType::End, &[], at(t0, 70)));
        assert_eq!(
            gestures.drain(),
            vec![Intent::Command(ViewportCommand::ZoomBy {
                delta: 0.0,
                anchor: Point::new(400.0, 300.0),
                snap: true,
                animate: true
            })]
        );
    }

    #[test]
    fn test_two_finger_drag_warns_on_single_touch() {
        let mut gestures = recognizer(GestureOptions {
            two_finger_drag: true,
            ..Default::default()
        });
        let t0 = Instant::now();

        gestures.handle_event(&touch(TouchEventType::Start, &[(1, 100.0, 100.0)], t0));
        gestures.handle_event(&touch(TouchEventType::Move, &[(1, 100.0, 160.0)], at(t0, 20)));
        gestures.handle_event(&touch(TouchEventType::Move, &[(1, 100.0, 220.0)], at(t0, 40)));
        gestures.handle_event(&touch(TouchEventType::End, &[], at(t0, 60)));

        assert_eq!(
            gestures.drain(),
            vec![CANCEL, Intent::Warning(WarningKind::TwoFingerDrag)]
        );
    }

    #[test]
    fn test_touch_suppresses_mouse() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&touch(TouchEventType::Start, &[(1, 10.0, 10.0)], t0));
        gestures.handle_event(&down(Point::new(10.0, 10.0), at(t0, 5)));
        gestures.handle_event(&touch(TouchEventType::End, &[], at(t0, 50)));
        // Emulated mouse events right after the tap
        gestures.handle_event(&down(Point::new(10.0, 10.0), at(t0, 60)));
        gestures.handle_event(&up(Point::new(10.0, 10.0), at(t0, 70)));

        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Click {
                    pixel: Point::new(10.0, 10.0),
                    source: PointerKind::Touch
                },
            ]
        );

        gestures.handle_event(&down(Point::new(10.0, 10.0), at(t0, 1000)));
        assert_eq!(gestures.drain(), vec![CANCEL]);
    }

    #[test]
    fn test_orphan_and_duplicate_pointers_ignored() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&up(Point::new(5.0, 5.0), t0));
        gestures.handle_event(&touch(TouchEventType::End, &[], t0));
        assert!(gestures.drain().is_empty());

        gestures.handle_event(&down(Point::new(5.0, 5.0), at(t0, 10)));
        gestures.handle_event(&down(Point::new(50.0, 50.0), at(t0, 20)));
        assert_eq!(gestures.drain(), vec![CANCEL]);
    }

    #[test]
    fn test_interactive_children_and_disabled_sources() {
        let t0 = Instant::now();
        let mut gestures = GestureRecognizer::default();
        gestures.handle_event(&InputEvent::MouseDown {
            position: Point::new(1.0, 1.0),
            button: MouseButton::Left,
            time: t0,
            on_interactive: true,
        });
        gestures.handle_event(&moved(Point::new(80.0, 1.0), at(t0, 10)));
        assert!(gestures.drain().is_empty());
        assert!(!gestures.is_active());

        let mut no_mouse = recognizer(GestureOptions {
            mouse_events: false,
            ..Default::default()
        });
        no_mouse.handle_event(&down(Point::zero(), t0));
        no_mouse.handle_event(&wheel(-150.0, Point::zero(), t0));
        assert!(no_mouse.drain().is_empty());
    }

    #[test]
    fn test_cancel_commits_without_click() {
        let mut gestures = GestureRecognizer::default();
        let t0 = Instant::now();

        gestures.handle_event(&down(Point::new(0.0, 0.0), t0));
        gestures.handle_event(&moved(Point::new(1.0, 0.0), at(t0, 10)));
        gestures.handle_event(&InputEvent::Cancel { time: at(t0, 20) });

        assert_eq!(
            gestures.drain(),
            vec![
                CANCEL,
                Intent::Command(ViewportCommand::PanBy {
                    delta: Point::new(1.0, 0.0)
                }),
                Intent::Command(ViewportCommand::CommitPan),
            ]
        );
    }
}
