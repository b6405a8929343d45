use crate::participant::Availability;
use crate::time::Slot;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One cell of a meeting grid: a candidate date crossed with a slot row.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    pub date: String,
    pub slot: Slot,
}

impl Cell {
    pub fn new(date: &str, slot: Slot) -> Cell {
        Cell {
            date: date.to_string(),
            slot,
        }
    }
}

impl fmt::Display for Cell {
    /// Renders the stored `date_slot` key form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date, self.slot)
    }
}

/// The current participant's working selection, mutated cell by cell during
/// drag gestures and submitted as one full replace.
///
/// Single-session by construction: all mutation goes through `&mut self`,
/// so no coordination is needed within a session.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityStore {
    state: Availability,
}

impl AvailabilityStore {
    pub fn new() -> AvailabilityStore {
        AvailabilityStore::default()
    }

    /// Flips one cell and returns whether it is now marked.
    ///
    /// Toggling the same cell twice restores the previous state.
    ///
    /// # Examples
    /// ```
    /// use meetgrid::availability::{AvailabilityStore, Cell};
    ///
    /// let cell = Cell::new("2025-04-01", "09:00".parse().unwrap());
    /// let mut store = AvailabilityStore::new();
    /// let before = store.snapshot();
    ///
    /// assert!(store.toggle(&cell));
    /// assert!(!store.toggle(&cell));
    /// assert_eq!(store.snapshot(), before);
    /// ```
    pub fn toggle(&mut self, cell: &Cell) -> bool {
        self.state.toggle(&cell.date, cell.slot)
    }

    pub fn is_marked(&self, cell: &Cell) -> bool {
        self.state.contains(&cell.date, cell.slot)
    }

    /// Atomic bulk replace, used when loading a previous submission.
    pub fn replace_all(&mut self, state: Availability) {
        self.state = state;
    }

    /// An owned copy of the working selection, ready to submit.
    pub fn snapshot(&self) -> Availability {
        self.state.clone()
    }
}
