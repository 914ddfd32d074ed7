use crate::core::geo::{LatLng, LatLngBounds, Point};
use instant::Instant;
use serde::{Deserialize, Serialize};

/// Raw input delivered by the host toolkit
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed. `on_interactive` is set when the pointer is over
    /// an interactive child such as a marker.
    MouseDown {
        position: Point,
        button: MouseButton,
        time: Instant,
        on_interactive: bool,
    },
    MouseMove {
        position: Point,
        time: Instant,
    },
    MouseUp {
        position: Point,
        time: Instant,
    },
    /// Scroll wheel; positive `delta` scrolls down (zooms out)
    Wheel {
        delta: f64,
        position: Point,
        modifiers: KeyModifiers,
        time: Instant,
    },
    /// Touch events (multi-touch). `touches` lists every finger still on the
    /// surface after the event, like the DOM `TouchEvent.touches` list.
    Touch {
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
        time: Instant,
        on_interactive: bool,
    },
    /// Pointer capture lost; whatever gesture is in progress ends now
    Cancel { time: Instant },
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    /// The modifier that unlocks wheel zoom: meta on macOS, ctrl elsewhere
    pub fn zoom_modifier(&self) -> bool {
        self.meta || self.ctrl
    }
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Kind of pointer that produced an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Hint a rendering layer may show when input was ignored on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Wheel without the zoom modifier while `metaWheelZoom` is on
    MetaWheelZoom,
    /// One-finger drag while `twoFingerDrag` is on
    TwoFingerDrag,
}

impl InputEvent {
    /// Time the host observed the event
    pub fn time(&self) -> Instant {
        match self {
            InputEvent::MouseDown { time, .. }
            | InputEvent::MouseMove { time, .. }
            | InputEvent::MouseUp { time, .. }
            | InputEvent::Wheel { time, .. }
            | InputEvent::Touch { time, .. }
            | InputEvent::Cancel { time } => *time,
        }
    }

    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::MouseDown { position, .. }
            | InputEvent::MouseMove { position, .. }
            | InputEvent::MouseUp { position, .. }
            | InputEvent::Wheel { position, .. } => Some(*position),
            InputEvent::Touch { touches, .. } => touches.first().map(|t| t.position),
            InputEvent::Cancel { .. } => None,
        }
    }

    /// Checks if this is a mouse event
    pub fn is_mouse_event(&self) -> bool {
        matches!(
            self,
            InputEvent::MouseDown { .. }
                | InputEvent::MouseMove { .. }
                | InputEvent::MouseUp { .. }
                | InputEvent::Wheel { .. }
        )
    }

    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }
}

/// Notifications emitted to collaborators such as a rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The committed view changed, or the map was mounted (`initial`)
    BoundsChanged {
        center: LatLng,
        zoom: f64,
        bounds: LatLngBounds,
        initial: bool,
    },
    /// Mouse/touch click on the map
    Click {
        event: PointerKind,
        lat_lng: LatLng,
        pixel: Point,
    },
    AnimationStart,
    AnimationStop,
    /// Input was ignored on purpose; a hint may be shown
    GestureWarning(WarningKind),
}

/// Discriminant of [`MapEvent`] used to register listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    BoundsChanged,
    Click,
    AnimationStart,
    AnimationStop,
    GestureWarning,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::BoundsChanged { .. } => MapEventKind::BoundsChanged,
            MapEvent::Click { .. } => MapEventKind::Click,
            MapEvent::AnimationStart => MapEventKind::AnimationStart,
            MapEvent::AnimationStop => MapEventKind::AnimationStop,
            MapEvent::GestureWarning(_) => MapEventKind::GestureWarning,
        }
    }
}
