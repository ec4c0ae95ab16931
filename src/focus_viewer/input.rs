//! Input and gesture dispatch for the focus viewer.
//!
//! The dispatcher is host neutral: the terminal front end translates its own
//! events into [`InputEvent`]s, and device classification comes from an
//! injected [`ViewportProbe`].

use super::engine::{Direction, FocusEngine};
use std::fmt;
use std::time::{Duration, Instant};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Escape.
    Escape,
}

/// Direction a swipe travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved up.
    Up,
    /// Finger moved down.
    Down,
    /// Finger moved left.
    Left,
    /// Finger moved right.
    Right,
}

impl SwipeDirection {
    /// Navigation triggered by the swipe.
    ///
    /// Content follows the finger, so the move goes the opposite way: a swipe
    /// up brings the row below into focus.
    pub fn navigation(self) -> Direction {
        match self {
            SwipeDirection::Up => Direction::Down,
            SwipeDirection::Down => Direction::Up,
            SwipeDirection::Left => Direction::Right,
            SwipeDirection::Right => Direction::Left,
        }
    }
}

/// An input event fed to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press.
    Key(NavKey),
    /// Completed swipe.
    Swipe(SwipeDirection),
    /// Tap or click on a neighbour preview.
    Tap(Direction),
    /// Viewport resized (pixels).
    Resize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Native orientation-change signal (pixels at signal time).
    OrientationChange {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// What the dispatcher did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The focus moved.
    Moved(Direction),
    /// Nothing happened.
    Ignored,
    /// The viewer should close.
    Close(CloseReason),
}

/// Why the viewer closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The user asked to close.
    User,
    /// A handheld device was rotated to landscape.
    Landscape,
}

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Height at least as large as width.
    #[default]
    Portrait,
    /// Width larger than height.
    Landscape,
}

impl Orientation {
    /// Classify a viewport.
    pub fn classify(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Platform capability query: is this a handheld-class viewport?
pub trait ViewportProbe: fmt::Debug {
    /// Check whether a viewport of this size belongs to a compact device.
    fn is_compact_viewport(&self, width: u32, height: u32) -> bool;
}

/// User agent fragments that identify handheld devices (matched case-insensitively).
pub const MOBILE_AGENT_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Probe based on a user agent string and a width threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentProbe {
    user_agent: Option<String>,
    max_width: u32,
}

impl UserAgentProbe {
    /// Create a probe; widths below `max_width` count as handheld.
    pub fn new(user_agent: Option<String>, max_width: u32) -> Self {
        Self {
            user_agent,
            max_width,
        }
    }

    fn is_mobile_agent(&self) -> bool {
        let Some(ref agent) = self.user_agent else {
            return false;
        };
        let agent = agent.to_lowercase();
        MOBILE_AGENT_MARKERS.iter().any(|m| agent.contains(m))
    }
}

impl ViewportProbe for UserAgentProbe {
    fn is_compact_viewport(&self, width: u32, _height: u32) -> bool {
        self.is_mobile_agent() && width < self.max_width
    }
}

/// Maps input to engine transitions and closes the viewer when needed.
#[derive(Debug)]
pub struct InputDispatcher {
    probe: Box<dyn ViewportProbe>,
    orientation: Orientation,
    orientation_debounce: Duration,
    pending_orientation: Option<Instant>,
    viewport: Option<(u32, u32)>,
    closed: bool,
}

impl InputDispatcher {
    /// Create a dispatcher.
    pub fn new(probe: Box<dyn ViewportProbe>, orientation_debounce: Duration) -> Self {
        Self {
            probe,
            orientation: Orientation::default(),
            orientation_debounce,
            pending_orientation: None,
            viewport: None,
            closed: false,
        }
    }

    /// Last classified orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Check whether the dispatcher stopped accepting input.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Check whether an orientation re-check is waiting.
    pub fn has_pending_check(&self) -> bool {
        self.pending_orientation.is_some()
    }

    /// Handle one event.
    pub fn dispatch(&mut self, engine: &mut FocusEngine, event: InputEvent, now: Instant) -> Dispatch {
        if self.closed {
            return Dispatch::Ignored;
        }

        match event {
            InputEvent::Key(NavKey::Up) => self.navigate(engine, Direction::Up, now),
            InputEvent::Key(NavKey::Down) => self.navigate(engine, Direction::Down, now),
            InputEvent::Key(NavKey::Left) => self.navigate(engine, Direction::Left, now),
            InputEvent::Key(NavKey::Right) => self.navigate(engine, Direction::Right, now),
            InputEvent::Key(NavKey::Escape) => self.close_with(CloseReason::User),
            InputEvent::Swipe(swipe) => self.navigate(engine, swipe.navigation(), now),
            InputEvent::Tap(direction) => self.navigate(engine, direction, now),
            InputEvent::Resize { width, height } => self.check_orientation(width, height),
            InputEvent::OrientationChange { width, height } => {
                // Wait for the viewport to settle; a later signal restarts the wait.
                self.viewport = Some((width, height));
                self.pending_orientation = Some(now + self.orientation_debounce);
                Dispatch::Ignored
            },
        }
    }

    /// Run a due orientation re-check against the latest known viewport.
    pub fn tick(&mut self, now: Instant) -> Dispatch {
        if self.closed {
            return Dispatch::Ignored;
        }
        match (self.pending_orientation, self.viewport) {
            (Some(due), Some((width, height))) if now >= due => {
                self.pending_orientation = None;
                self.check_orientation(width, height)
            },
            _ => Dispatch::Ignored,
        }
    }

    /// Classify the viewport and close on a handheld in landscape.
    pub fn check_orientation(&mut self, width: u32, height: u32) -> Dispatch {
        if self.closed {
            return Dispatch::Ignored;
        }

        self.viewport = Some((width, height));
        self.orientation = Orientation::classify(width, height);
        if self.orientation == Orientation::Landscape && self.probe.is_compact_viewport(width, height) {
            tracing::info!("Closing focus viewer: handheld viewport in landscape ({}x{})", width, height);
            return self.close_with(CloseReason::Landscape);
        }
        Dispatch::Ignored
    }

    /// Stop accepting input and drop pending checks.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending_orientation = None;
    }

    fn close_with(&mut self, reason: CloseReason) -> Dispatch {
        self.close();
        Dispatch::Close(reason)
    }

    fn navigate(&mut self, engine: &mut FocusEngine, direction: Direction, now: Instant) -> Dispatch {
        if engine.step(direction, now) {
            Dispatch::Moved(direction)
        } else {
            Dispatch::Ignored
        }
    }
}

/// Turns a press/drag/release pointer sequence into a swipe.
///
/// Positions are terminal cells. Cells are about twice as tall as they are
/// wide, so vertical travel counts double when picking the dominant axis and
/// checking the minimum distance.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<(u16, u16, Instant)>,
    min_distance: u16,
    max_duration: Duration,
}

impl SwipeTracker {
    /// Create a tracker.
    pub fn new(min_distance: u16, max_duration: Duration) -> Self {
        Self {
            origin: None,
            min_distance,
            max_duration,
        }
    }

    /// Pointer pressed.
    pub fn press(&mut self, col: u16, row: u16, now: Instant) {
        self.origin = Some((col, row, now));
    }

    /// Check whether a press is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Pointer released; returns the swipe if the gesture qualifies.
    pub fn release(&mut self, col: u16, row: u16, now: Instant) -> Option<SwipeDirection> {
        let (start_col, start_row, started) = self.origin.take()?;
        if now.saturating_duration_since(started) > self.max_duration {
            return None;
        }

        let dx = i32::from(col) - i32::from(start_col);
        let dy = (i32::from(row) - i32::from(start_row)) * 2;
        let distance = dx.abs().max(dy.abs());
        if distance < i32::from(self.min_distance.max(1)) {
            return None;
        }

        Some(if dx.abs() >= dy.abs() {
            if dx < 0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            }
        } else if dy < 0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        })
    }

    /// Forget any tracked press.
    pub fn reset(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus_viewer::engine::{FocusCoordinate, TableExtent};

    #[derive(Debug)]
    struct Fixed(bool);

    impl ViewportProbe for Fixed {
        fn is_compact_viewport(&self, _width: u32, _height: u32) -> bool {
            self.0
        }
    }

    const DEBOUNCE: Duration = Duration::from_millis(300);

    fn setup(compact: bool) -> (InputDispatcher, FocusEngine) {
        let dispatcher = InputDispatcher::new(Box::new(Fixed(compact)), DEBOUNCE);
        let engine = FocusEngine::new(
            FocusCoordinate::new(1, 1),
            TableExtent::new(3, 3),
            Duration::from_millis(300),
        );
        (dispatcher, engine)
    }

    #[test]
    fn arrow_keys_move_focus() {
        let (mut d, mut e) = setup(false);
        let now = Instant::now();
        assert_eq!(d.dispatch(&mut e, InputEvent::Key(NavKey::Up), now), Dispatch::Moved(Direction::Up));
        assert_eq!(e.focus(), FocusCoordinate::new(0, 1));
        assert_eq!(d.dispatch(&mut e, InputEvent::Key(NavKey::Up), now), Dispatch::Ignored);
        assert_eq!(d.dispatch(&mut e, InputEvent::Key(NavKey::Right), now), Dispatch::Moved(Direction::Right));
        assert_eq!(e.focus(), FocusCoordinate::new(0, 2));
    }

    #[test]
    fn swipes_move_against_the_gesture() {
        let (mut d, mut e) = setup(false);
        let now = Instant::now();
        d.dispatch(&mut e, InputEvent::Swipe(SwipeDirection::Up), now);
        assert_eq!(e.focus(), FocusCoordinate::new(2, 1));
        d.dispatch(&mut e, InputEvent::Swipe(SwipeDirection::Left), now);
        assert_eq!(e.focus(), FocusCoordinate::new(2, 2));
        d.dispatch(&mut e, InputEvent::Swipe(SwipeDirection::Down), now);
        assert_eq!(e.focus(), FocusCoordinate::new(1, 2));
        d.dispatch(&mut e, InputEvent::Swipe(SwipeDirection::Right), now);
        assert_eq!(e.focus(), FocusCoordinate::new(1, 1));
    }

    #[test]
    fn escape_closes_and_blocks_further_input() {
        let (mut d, mut e) = setup(false);
        let now = Instant::now();
        assert_eq!(
            d.dispatch(&mut e, InputEvent::Key(NavKey::Escape), now),
            Dispatch::Close(CloseReason::User)
        );
        assert!(d.is_closed());
        assert_eq!(d.dispatch(&mut e, InputEvent::Key(NavKey::Down), now), Dispatch::Ignored);
        assert_eq!(e.focus(), FocusCoordinate::new(1, 1));
    }

    #[test]
    fn landscape_on_handheld_closes() {
        let (mut d, mut e) = setup(true);
        let now = Instant::now();
        let event = InputEvent::Resize { width: 800, height: 400 };
        assert_eq!(d.dispatch(&mut e, event, now), Dispatch::Close(CloseReason::Landscape));
        assert_eq!(d.orientation(), Orientation::Landscape);
    }

    #[test]
    fn portrait_handheld_and_landscape_desktop_stay_open() {
        let (mut d, mut e) = setup(true);
        let now = Instant::now();
        let portrait = InputEvent::Resize { width: 400, height: 800 };
        assert_eq!(d.dispatch(&mut e, portrait, now), Dispatch::Ignored);
        assert_eq!(d.orientation(), Orientation::Portrait);

        let (mut d, mut e) = setup(false);
        let landscape = InputEvent::Resize { width: 1600, height: 900 };
        assert_eq!(d.dispatch(&mut e, landscape, now), Dispatch::Ignored);
        assert!(!d.is_closed());
    }

    #[test]
    fn orientation_change_waits_for_debounce() {
        let (mut d, mut e) = setup(true);
        let t0 = Instant::now();
        let event = InputEvent::OrientationChange { width: 800, height: 400 };
        assert_eq!(d.dispatch(&mut e, event, t0), Dispatch::Ignored);
        assert!(d.has_pending_check());

        assert_eq!(d.tick(t0 + Duration::from_millis(100)), Dispatch::Ignored);
        assert_eq!(d.tick(t0 + DEBOUNCE), Dispatch::Close(CloseReason::Landscape));
        assert!(!d.has_pending_check());
    }

    #[test]
    fn debounced_check_uses_settled_viewport() {
        let (mut d, mut e) = setup(true);
        let t0 = Instant::now();
        d.dispatch(&mut e, InputEvent::OrientationChange { width: 800, height: 400 }, t0);
        let settled = InputEvent::Resize { width: 400, height: 800 };
        assert_eq!(d.dispatch(&mut e, settled, t0 + Duration::from_millis(50)), Dispatch::Ignored);
        assert!(d.has_pending_check());

        assert_eq!(d.tick(t0 + DEBOUNCE), Dispatch::Ignored);
        assert!(!d.is_closed());
        assert_eq!(d.orientation(), Orientation::Portrait);
    }

    #[test]
    fn close_cancels_pending_orientation_check() {
        let (mut d, mut e) = setup(true);
        let t0 = Instant::now();
        d.dispatch(&mut e, InputEvent::OrientationChange { width: 800, height: 400 }, t0);
        d.close();
        assert!(!d.has_pending_check());
        assert_eq!(d.tick(t0 + DEBOUNCE), Dispatch::Ignored);
    }

    #[test]
    fn user_agent_probe_needs_mobile_agent_and_narrow_width() {
        let phone = UserAgentProbe::new(Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".into()), 1024);
        assert!(phone.is_compact_viewport(844, 390));
        assert!(!phone.is_compact_viewport(1280, 800));

        let desktop = UserAgentProbe::new(Some("Mozilla/5.0 (X11; Linux x86_64)".into()), 1024);
        assert!(!desktop.is_compact_viewport(800, 400));
        assert!(!UserAgentProbe::new(None, 1024).is_compact_viewport(800, 400));

        let opera = UserAgentProbe::new(Some("Opera Mini/8.0".into()), 1024);
        assert!(opera.is_compact_viewport(600, 300));
    }

    #[test]
    fn swipe_tracker_classifies_drags() {
        let mut t = SwipeTracker::new(2, Duration::from_millis(500));
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(100);

        t.press(10, 10, t0);
        assert_eq!(t.release(4, 10, later), Some(SwipeDirection::Left));
        t.press(10, 10, t0);
        assert_eq!(t.release(10, 7, later), Some(SwipeDirection::Up));
        t.press(10, 10, t0);
        assert_eq!(t.release(11, 12, later), Some(SwipeDirection::Down));
        t.press(10, 10, t0);
        assert_eq!(t.release(11, 10, later), None);
        assert!(!t.is_tracking());
    }

    #[test]
    fn slow_drags_are_not_swipes() {
        let mut t = SwipeTracker::new(2, Duration::from_millis(500));
        let t0 = Instant::now();
        t.press(0, 0, t0);
        assert_eq!(t.release(20, 0, t0 + Duration::from_millis(600)), None);
        assert_eq!(t.release(20, 0, t0), None);
    }
}
