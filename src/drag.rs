use crate::availability::{AvailabilityStore, Cell};

/// Pointer events as the presentation layer reports them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PointerEvent {
    Down(Cell),
    Enter(Cell),
    Up,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum State {
    Idle,
    Dragging { last: Cell },
}

/// Tracks one drag gesture and decides which cells to toggle.
///
/// The controller only emits toggle targets; applying them is the
/// `AvailabilityStore`'s job. `Idle` is both the initial and the terminal
/// state, so the same value serves across gestures.
///
/// Mouse-enter fires on every crossing, so the controller remembers the
/// last-entered cell and suppresses re-entry: a gesture toggles each
/// entered cell exactly once per visit.
///
/// # Examples
/// ```
/// use meetgrid::availability::Cell;
/// use meetgrid::drag::DragSelect;
///
/// let a = Cell::new("2025-04-01", "09:00".parse().unwrap());
/// let b = Cell::new("2025-04-01", "09:30".parse().unwrap());
///
/// let mut drag = DragSelect::new();
///
/// assert_eq!(drag.pointer_down(a.clone()), Some(a.clone()));
/// assert_eq!(drag.pointer_enter(a), None); // re-entry, no double toggle
/// assert_eq!(drag.pointer_enter(b.clone()), Some(b));
/// drag.pointer_up();
/// assert!(!drag.is_dragging());
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DragSelect {
    state: State,
}

impl Default for DragSelect {
    fn default() -> DragSelect {
        DragSelect { state: State::Idle }
    }
}

impl DragSelect {
    pub fn new() -> DragSelect {
        DragSelect::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Starts a gesture on `cell` and emits it as the first toggle.
    /// A stray down event mid-drag emits nothing.
    pub fn pointer_down(&mut self, cell: Cell) -> Option<Cell> {
        match self.state {
            State::Idle => {
                self.state = State::Dragging { last: cell.clone() };
                Some(cell)
            }
            State::Dragging { .. } => None,
        }
    }

    /// Emits `cell` when dragging onto a cell other than the last one
    /// entered. Enter events while idle are hover, not selection.
    pub fn pointer_enter(&mut self, cell: Cell) -> Option<Cell> {
        match &mut self.state {
            State::Idle => None,
            State::Dragging { last } => {
                if *last == cell {
                    None
                } else {
                    *last = cell.clone();
                    Some(cell)
                }
            }
        }
    }

    /// Ends the gesture wherever the pointer is. Emits nothing.
    pub fn pointer_up(&mut self) {
        self.state = State::Idle;
    }

    pub fn on_event(&mut self, event: PointerEvent) -> Option<Cell> {
        match event {
            PointerEvent::Down(cell) => self.pointer_down(cell),
            PointerEvent::Enter(cell) => self.pointer_enter(cell),
            PointerEvent::Up => {
                self.pointer_up();
                None
            }
        }
    }

    /// Applies a whole event sequence against the working selection.
    pub fn drive<I>(&mut self, events: I, store: &mut AvailabilityStore)
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        for event in events {
            if let Some(cell) = self.on_event(event) {
                store.toggle(&cell);
            }
        }
    }
}
