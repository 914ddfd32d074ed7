use crate::core::geo::{LatLng, Point};
use crate::input::events::{MapEvent, MapEventKind, PointerKind, WarningKind};
use crossbeam_channel::{unbounded, Receiver, Sender};
use fxhash::FxHashMap as HashMap;

/// Change requested of the viewport. Gesture recognition, animation and
/// programmatic calls all speak this one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportCommand {
    /// Move the content by a pixel displacement without touching `center`
    PanBy { delta: Point },
    /// Fold the in-flight drag offset into `center`
    CommitPan,
    /// Change the zoom by `delta` levels keeping `anchor` fixed on screen.
    /// `snap` rounds the resulting zoom, `animate` asks for an eased move.
    ZoomBy {
        delta: f64,
        anchor: Point,
        snap: bool,
        animate: bool,
    },
    /// Go to an absolute zoom keeping `anchor` fixed on screen
    ZoomAt {
        zoom: f64,
        anchor: Point,
        animate: bool,
    },
    SetCenterZoom {
        center: LatLng,
        zoom: f64,
        animate: bool,
    },
    /// Keep moving the content by `offset` pixels after a drag is released
    Fling { offset: Point },
    /// Interpolated state produced by the animation scheduler
    AnimationTick { center: LatLng, zoom: f64 },
    CancelAnimation,
}

impl ViewportCommand {
    /// Commands that replace a running animation instead of cancelling it
    pub fn supersedes_animation(&self) -> bool {
        matches!(
            self,
            ViewportCommand::ZoomBy { animate: true, .. }
                | ViewportCommand::ZoomAt { animate: true, .. }
                | ViewportCommand::SetCenterZoom { animate: true, .. }
                | ViewportCommand::Fling { .. }
                | ViewportCommand::AnimationTick { .. }
        )
    }
}

/// Output of gesture recognition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Command(ViewportCommand),
    Click { pixel: Point, source: PointerKind },
    Warning(WarningKind),
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Delivers map events to registered callbacks and channel subscribers
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<MapEventKind, Vec<EventCallback>>,
    subscribers: Vec<Sender<MapEvent>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(callback));
    }

    /// Open a channel that receives every event from now on
    pub fn subscribe(&mut self) -> Receiver<MapEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: MapEvent) {
        if let Some(callbacks) = self.listeners.get(&event.kind()) {
            for callback in callbacks {
                callback(&event);
            }
        }

        // Dropped receivers unsubscribe themselves
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
