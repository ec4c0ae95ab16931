//! Focus navigation engine.
//!
//! Owns the focus coordinate of one viewer session and the animation tag
//! raised by each successful move. Moves are validated against the current
//! table extent, which the host re-syncs because filtering or column changes
//! can alter it between frames.

use std::time::{Duration, Instant};

/// One of the four navigation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous row.
    Up,
    /// Next row.
    Down,
    /// Previous visible column.
    Left,
    /// Next visible column.
    Right,
}

impl Direction {
    /// All directions, in preview order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Tag name used by the renderer.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Arrow glyph for the direction.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }
}

/// A (row, visible column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FocusCoordinate {
    /// Row index into the table rows.
    pub row_index: usize,
    /// Column index into the visible columns.
    pub col_index: usize,
}

impl FocusCoordinate {
    /// Create a coordinate.
    pub fn new(row_index: usize, col_index: usize) -> Self {
        Self {
            row_index,
            col_index,
        }
    }

    /// Neighbour in `direction`, if it does not underflow.
    pub fn neighbour(self, direction: Direction) -> Option<Self> {
        let Self {
            row_index: r,
            col_index: c,
        } = self;
        match direction {
            Direction::Up => Some(Self::new(r.checked_sub(1)?, c)),
            Direction::Down => Some(Self::new(r.checked_add(1)?, c)),
            Direction::Left => Some(Self::new(r, c.checked_sub(1)?)),
            Direction::Right => Some(Self::new(r, c.checked_add(1)?)),
        }
    }
}

/// Row count and visible column count of the table being navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableExtent {
    /// Number of rows.
    pub rows: usize,
    /// Number of visible columns.
    pub cols: usize,
}

impl TableExtent {
    /// Create an extent.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Check whether the coordinate lies inside the table.
    pub fn contains(&self, coord: FocusCoordinate) -> bool {
        coord.row_index < self.rows && coord.col_index < self.cols
    }

    /// Check whether there is nothing to navigate.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct AnimationTag {
    direction: Direction,
    expires_at: Instant,
}

/// Focus state machine.
#[derive(Debug, Clone)]
pub struct FocusEngine {
    focus: FocusCoordinate,
    extent: TableExtent,
    animation: Option<AnimationTag>,
    animation_duration: Duration,
}

impl FocusEngine {
    /// Create an engine focused on `initial`.
    pub fn new(initial: FocusCoordinate, extent: TableExtent, animation_duration: Duration) -> Self {
        Self {
            focus: initial,
            extent,
            animation: None,
            animation_duration,
        }
    }

    /// Current focus.
    pub fn focus(&self) -> FocusCoordinate {
        self.focus
    }

    /// Extent the engine validates against.
    pub fn extent(&self) -> TableExtent {
        self.extent
    }

    /// Update the extent after the table changed shape.
    ///
    /// The focus is left alone; a stale focus reads as placeholder data.
    pub fn sync_extent(&mut self, extent: TableExtent) {
        if extent != self.extent {
            tracing::debug!(
                "Focus extent changed from {:?} to {:?}",
                self.extent,
                extent
            );
            self.extent = extent;
        }
    }

    /// Jump directly to a coordinate without range checks.
    pub fn set_focus(&mut self, coord: FocusCoordinate) {
        self.focus = coord;
    }

    /// Target of a move in `direction`, if the move is allowed.
    pub fn target(&self, direction: Direction) -> Option<FocusCoordinate> {
        self.focus
            .neighbour(direction)
            .filter(|target| self.extent.contains(*target))
    }

    /// Check whether a move in `direction` would be committed.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.target(direction).is_some()
    }

    /// Move in `direction` at time `now`.
    ///
    /// Returns `false` and changes nothing when the move is not allowed.
    pub fn step(&mut self, direction: Direction, now: Instant) -> bool {
        let Some(target) = self.target(direction) else {
            return false;
        };

        self.focus = target;
        // Replacing the tag also replaces its pending reset.
        self.animation = Some(AnimationTag {
            direction,
            expires_at: now + self.animation_duration,
        });
        true
    }

    /// Move to the previous row.
    pub fn move_up(&mut self) -> bool {
        self.step(Direction::Up, Instant::now())
    }

    /// Move to the next row.
    pub fn move_down(&mut self) -> bool {
        self.step(Direction::Down, Instant::now())
    }

    /// Move to the previous visible column.
    pub fn move_left(&mut self) -> bool {
        self.step(Direction::Left, Instant::now())
    }

    /// Move to the next visible column.
    pub fn move_right(&mut self) -> bool {
        self.step(Direction::Right, Instant::now())
    }

    /// Direction of the last move while its animation is still showing.
    pub fn animation_direction(&self) -> Option<Direction> {
        self.animation.map(|tag| tag.direction)
    }

    /// When the pending animation reset fires, if any.
    pub fn animation_deadline(&self) -> Option<Instant> {
        self.animation.map(|tag| tag.expires_at)
    }

    /// Fire the deferred animation reset if it is due.
    pub fn tick(&mut self, now: Instant) {
        if let Some(tag) = self.animation {
            if now >= tag.expires_at {
                self.animation = None;
            }
        }
    }

    /// Drop any pending animation reset.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIM: Duration = Duration::from_millis(300);

    fn engine(rows: usize, cols: usize) -> FocusEngine {
        FocusEngine::new(
            FocusCoordinate::default(),
            TableExtent::new(rows, cols),
            ANIM,
        )
    }

    #[test]
    fn scenario_three_by_four() {
        let mut e = engine(3, 4);
        assert!(e.move_right());
        assert!(e.move_right());
        assert!(e.move_right());
        assert_eq!(e.focus(), FocusCoordinate::new(0, 3));
        assert!(!e.move_right());
        assert_eq!(e.focus(), FocusCoordinate::new(0, 3));

        assert!(e.move_down());
        assert!(e.move_down());
        assert_eq!(e.focus(), FocusCoordinate::new(2, 3));
        assert!(!e.move_down());
        assert_eq!(e.focus(), FocusCoordinate::new(2, 3));
    }

    #[test]
    fn boundary_moves_are_idempotent() {
        let mut e = engine(2, 2);
        assert!(!e.move_up());
        assert!(!e.move_left());
        assert_eq!(e.focus(), FocusCoordinate::new(0, 0));
        assert_eq!(e.animation_direction(), None);

        e.set_focus(FocusCoordinate::new(1, 1));
        assert!(!e.move_down());
        assert!(!e.move_right());
        assert_eq!(e.focus(), FocusCoordinate::new(1, 1));
    }

    #[test]
    fn interior_round_trips() {
        let mut e = engine(5, 5);
        let start = FocusCoordinate::new(2, 2);
        e.set_focus(start);
        assert!(e.move_right());
        assert!(e.move_left());
        assert_eq!(e.focus(), start);
        assert!(e.move_down());
        assert!(e.move_up());
        assert_eq!(e.focus(), start);
    }

    #[test]
    fn reachable_coordinates_stay_in_bounds() {
        let mut e = engine(3, 2);
        let pattern = [
            Direction::Right,
            Direction::Down,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
            Direction::Up,
            Direction::Up,
        ];
        let now = Instant::now();
        for direction in pattern.iter().cycle().take(40) {
            e.step(*direction, now);
            assert!(e.extent().contains(e.focus()), "{:?}", e.focus());
        }
    }

    #[test]
    fn empty_table_refuses_every_move() {
        let mut e = engine(0, 3);
        for direction in Direction::ALL {
            assert!(!e.can_move(direction));
        }
        assert!(!e.move_down());
        assert_eq!(e.focus(), FocusCoordinate::default());
    }

    #[test]
    fn stale_focus_does_not_move_further_out() {
        let mut e = engine(10, 4);
        e.set_focus(FocusCoordinate::new(8, 1));
        e.sync_extent(TableExtent::new(3, 4));
        assert!(!e.move_up());
        assert!(!e.move_right());
        assert_eq!(e.focus(), FocusCoordinate::new(8, 1));
    }

    #[test]
    fn animation_tag_clears_after_duration() {
        let mut e = engine(3, 3);
        let t0 = Instant::now();
        assert!(e.step(Direction::Down, t0));
        assert_eq!(e.animation_direction(), Some(Direction::Down));

        e.tick(t0 + Duration::from_millis(299));
        assert_eq!(e.animation_direction(), Some(Direction::Down));

        e.tick(t0 + ANIM);
        assert_eq!(e.animation_direction(), None);
    }

    #[test]
    fn newer_move_replaces_pending_reset() {
        let mut e = engine(3, 3);
        let t0 = Instant::now();
        e.step(Direction::Down, t0);
        let t1 = t0 + Duration::from_millis(200);
        e.step(Direction::Right, t1);

        e.tick(t0 + ANIM);
        assert_eq!(e.animation_direction(), Some(Direction::Right));
        assert_eq!(e.animation_deadline(), Some(t1 + ANIM));

        e.tick(t1 + ANIM);
        assert_eq!(e.animation_direction(), None);
    }

    #[test]
    fn refused_move_keeps_previous_tag() {
        let mut e = engine(2, 1);
        let t0 = Instant::now();
        e.step(Direction::Down, t0);
        assert!(!e.step(Direction::Right, t0));
        assert_eq!(e.animation_direction(), Some(Direction::Down));
        e.cancel_animation();
        assert_eq!(e.animation_direction(), None);
    }
}
