//! Focus viewer: single-cell navigation over a table.
//!
//! The viewer shows one cell at a time with previews of its four neighbours.
//! Navigation state lives in [`engine`], neighbour lookups in [`adjacent`],
//! input mapping in [`input`]; this module ties them into a session the
//! host can open, drive and close.

pub mod adjacent;
pub mod engine;
pub mod identifiers;
pub mod input;
pub mod ui;

pub use adjacent::{AdjacentCell, AdjacentCells, CurrentCell};
pub use engine::{Direction, FocusCoordinate, FocusEngine, TableExtent};
pub use input::{
    CloseReason, Dispatch, InputDispatcher, InputEvent, NavKey, Orientation, SwipeDirection,
    SwipeTracker, UserAgentProbe, ViewportProbe,
};

use crate::config::Settings;
use crate::data::styling::ShadingResolver;
use crate::data::{Column, Row};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Table handed to the viewer when it opens.
#[derive(Debug, Clone, Default)]
pub struct FocusTable {
    /// Title shown in the header.
    pub title: String,
    /// Rows in display order (already filtered and sorted).
    pub rows: Vec<Row>,
    /// All columns with their visibility flags.
    pub columns: Vec<Column>,
}

/// One open viewer session.
#[derive(Debug)]
pub struct FocusSession {
    title: String,
    rows: Vec<Row>,
    columns: Vec<Column>,
    identifiers: Vec<String>,
    preferred_key: Option<String>,
    engine: FocusEngine,
    dispatcher: InputDispatcher,
}

impl FocusSession {
    fn new(
        table: FocusTable,
        initial: FocusCoordinate,
        settings: &Settings,
        probe: Box<dyn ViewportProbe>,
    ) -> Self {
        let columns = navigable_columns(&table.columns);
        let identifiers =
            identifiers::derive_identifiers(&table.rows, &columns, settings.preferred_key.as_deref());
        let extent = TableExtent::new(table.rows.len(), columns.len());

        Self {
            title: table.title,
            rows: table.rows,
            columns,
            identifiers,
            preferred_key: settings.preferred_key.clone(),
            engine: FocusEngine::new(initial, extent, settings.viewer.animation),
            dispatcher: InputDispatcher::new(probe, settings.viewer.orientation_debounce),
        }
    }

    /// Table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rows being navigated.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Columns being navigated.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Per-row identifiers.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Navigation engine.
    pub fn engine(&self) -> &FocusEngine {
        &self.engine
    }

    /// Check whether there is anything to show.
    pub fn has_data(&self) -> bool {
        !self.rows.is_empty() && !self.columns.is_empty()
    }

    /// Focused cell (placeholders when out of range).
    pub fn current_cell(&self) -> CurrentCell {
        adjacent::current_cell(
            self.engine.focus(),
            &self.rows,
            &self.columns,
            &self.identifiers,
            &ShadingResolver,
        )
    }

    /// Neighbour previews.
    pub fn adjacent(&self) -> AdjacentCells {
        adjacent::adjacent(self.engine.focus(), &self.rows, &self.columns, &self.identifiers)
    }

    /// Position readout, e.g. `Row 2/10, Col 1/4`.
    pub fn position_label(&self) -> String {
        let focus = self.engine.focus();
        format!(
            "Row {}/{}, Col {}/{}",
            focus.row_index + 1,
            self.rows.len(),
            focus.col_index + 1,
            self.columns.len()
        )
    }

    fn replace_table(&mut self, table: FocusTable) {
        self.columns = navigable_columns(&table.columns);
        self.identifiers =
            identifiers::derive_identifiers(&table.rows, &self.columns, self.preferred_key.as_deref());
        self.rows = table.rows;
        self.title = table.title;
        self.engine
            .sync_extent(TableExtent::new(self.rows.len(), self.columns.len()));
    }
}

/// Columns the viewer navigates: everything not explicitly hidden.
pub fn navigable_columns(columns: &[Column]) -> Vec<Column> {
    columns.iter().filter(|c| !c.is_hidden()).cloned().collect()
}

/// State for the focus viewer overlay.
#[derive(Debug, Default)]
pub struct FocusViewerState {
    /// Is the viewer visible.
    pub visible: bool,
    /// Why the last session closed.
    pub last_close: Option<CloseReason>,
    session: Option<FocusSession>,
    swipe: SwipeTracker,
}

impl FocusViewerState {
    /// Create a closed viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh session on `table` at `initial`.
    ///
    /// The orientation is checked right away; opening a handheld viewer in
    /// landscape closes it again and returns the close dispatch.
    pub fn open(
        &mut self,
        table: FocusTable,
        initial: FocusCoordinate,
        settings: &Settings,
        probe: Box<dyn ViewportProbe>,
        viewport: (u32, u32),
    ) -> Dispatch {
        let mut session = FocusSession::new(table, initial, settings, probe);
        tracing::info!(
            "Opening focus viewer on '{}' at {:?} ({} rows, {} columns)",
            session.title,
            initial,
            session.rows.len(),
            session.columns.len()
        );

        self.swipe = SwipeTracker::new(
            settings.viewer.swipe_min_distance,
            settings.viewer.swipe_max_duration,
        );
        self.last_close = None;

        let (width, height) = viewport;
        let result = session.dispatcher.check_orientation(width, height);
        self.session = Some(session);
        self.visible = true;
        self.after_dispatch(result)
    }

    /// Close the viewer and cancel everything it had pending.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.dispatcher.close();
            session.engine.cancel_animation();
            tracing::info!("Closed focus viewer at {:?}", session.engine.focus());
        }
        self.swipe.reset();
        self.visible = false;
    }

    /// Open session, if any.
    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    /// Current focus, if open.
    pub fn focus(&self) -> Option<FocusCoordinate> {
        self.session.as_ref().map(|s| s.engine.focus())
    }

    /// Focused cell, if open.
    pub fn current_cell(&self) -> Option<CurrentCell> {
        self.session.as_ref().map(FocusSession::current_cell)
    }

    /// Neighbour previews, if open.
    pub fn adjacent(&self) -> Option<AdjacentCells> {
        self.session.as_ref().map(FocusSession::adjacent)
    }

    /// Swap in changed table data while open. The focus is kept as is.
    pub fn replace_table(&mut self, table: FocusTable) {
        if let Some(ref mut session) = self.session {
            session.replace_table(table);
        }
    }

    /// Feed an already translated event.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> Dispatch {
        let Some(ref mut session) = self.session else {
            return Dispatch::Ignored;
        };
        let result = session.dispatcher.dispatch(&mut session.engine, event, now);
        self.after_dispatch(result)
    }

    /// Handle a key press. Ctrl+C closes like Esc.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Dispatch {
        let nav = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => NavKey::Escape,
            (KeyModifiers::CONTROL, _) => return Dispatch::Ignored,
            (_, KeyCode::Up) | (_, KeyCode::Char('k')) => NavKey::Up,
            (_, KeyCode::Down) | (_, KeyCode::Char('j')) => NavKey::Down,
            (_, KeyCode::Left) | (_, KeyCode::Char('h')) => NavKey::Left,
            (_, KeyCode::Right) | (_, KeyCode::Char('l')) => NavKey::Right,
            (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => NavKey::Escape,
            _ => return Dispatch::Ignored,
        };
        self.dispatch(InputEvent::Key(nav), now)
    }

    /// Handle a mouse event inside the frame `area`.
    ///
    /// A left-button drag is a swipe; a press and release that does not
    /// qualify as a swipe is a tap on whatever preview lies under it.
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect, now: Instant) -> Dispatch {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.press(event.column, event.row, now);
                Dispatch::Ignored
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.swipe.is_tracking() {
                    return Dispatch::Ignored;
                }
                match self.swipe.release(event.column, event.row, now) {
                    Some(swipe) => self.dispatch(InputEvent::Swipe(swipe), now),
                    None => match preview_at(area, event.column, event.row) {
                        Some(direction) => self.dispatch(InputEvent::Tap(direction), now),
                        None => Dispatch::Ignored,
                    },
                }
            },
            MouseEventKind::ScrollUp => self.dispatch(InputEvent::Key(NavKey::Up), now),
            MouseEventKind::ScrollDown => self.dispatch(InputEvent::Key(NavKey::Down), now),
            _ => Dispatch::Ignored,
        }
    }

    /// Handle a viewport resize, in pixels.
    ///
    /// Terminals have no separate orientation signal, so a resize that flips
    /// the orientation also schedules the debounced orientation check.
    pub fn handle_resize(&mut self, width: u32, height: u32, now: Instant) -> Dispatch {
        let flipped = self
            .session
            .as_ref()
            .is_some_and(|s| s.dispatcher.orientation() != Orientation::classify(width, height));

        let result = self.dispatch(InputEvent::Resize { width, height }, now);
        if flipped && result == Dispatch::Ignored {
            return self.dispatch(InputEvent::OrientationChange { width, height }, now);
        }
        result
    }

    /// Fire due deferred work.
    pub fn tick(&mut self, now: Instant) -> Dispatch {
        let Some(ref mut session) = self.session else {
            return Dispatch::Ignored;
        };
        session.engine.tick(now);
        let result = session.dispatcher.tick(now);
        self.after_dispatch(result)
    }

    fn after_dispatch(&mut self, result: Dispatch) -> Dispatch {
        if let Dispatch::Close(reason) = result {
            self.close();
            self.last_close = Some(reason);
        }
        result
    }
}

fn preview_at(area: Rect, column: u16, row: u16) -> Option<Direction> {
    let layout = ui::FocusLayout::new(area);
    let position = Position::new(column, row);
    Direction::ALL
        .into_iter()
        .find(|d| layout.preview(*d).contains(position))
}
