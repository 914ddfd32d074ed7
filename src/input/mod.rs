pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{
    InputEvent, KeyModifiers, MapEvent, MapEventKind, MouseButton, PointerKind, TouchEventType,
    TouchPoint, WarningKind,
};
pub use gestures::{GestureConfig, GestureMode, GestureOptions, GestureRecognizer};
pub use handler::{EventManager, Intent, ViewportCommand};
