use crate::availability::Cell;
use crate::participant::Participant;
use log::debug;
use std::collections::BTreeMap;

/// Headcount and attendee names for one cell. Names keep participant
/// iteration order, never sorted.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CellTally {
    pub count: u32,
    pub names: Vec<String>,
}

/// The group's tally over every marked cell, derived from the full
/// participant set and recomputed on demand. Never persisted.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GroupAvailability {
    cells: BTreeMap<Cell, CellTally>,
}

impl GroupAvailability {
    /// Folds all participants' availability into per-cell counts and
    /// attendee lists.
    ///
    /// The fold is grid-agnostic: cells outside any meeting's grid are
    /// tallied like any other, and validation stays with the caller.
    /// Counts are invariant under participant reordering; name lists
    /// are not. Runs in O(total marked cells).
    ///
    /// # Examples
    /// ```
    /// use meetgrid::aggregate::GroupAvailability;
    /// use meetgrid::availability::Cell;
    /// use meetgrid::participant::{Availability, Participant};
    ///
    /// let mut marked = Availability::new();
    /// marked.mark("2025-04-01", "09:00".parse().unwrap());
    ///
    /// let participants = vec![
    ///     Participant::with_availability("ana", marked.clone()),
    ///     Participant::with_availability("ben", marked),
    ///     Participant::new("cal"),
    /// ];
    ///
    /// let group = GroupAvailability::aggregate(&participants);
    /// let cell = Cell::new("2025-04-01", "09:00".parse().unwrap());
    ///
    /// assert_eq!(group.count_for(&cell), 2);
    /// assert_eq!(group.names_for(&cell), ["ana", "ben"]);
    /// assert!(!group.is_full(&cell, participants.len()));
    /// ```
    pub fn aggregate<'a, I>(participants: I) -> GroupAvailability
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        let mut cells: BTreeMap<Cell, CellTally> = BTreeMap::new();

        for participant in participants {
            for (date, slot) in participant.availability.marked() {
                let tally = cells.entry(Cell::new(date, slot)).or_default();
                tally.count += 1;
                tally.names.push(participant.name.clone());
            }
        }

        debug!("aggregated {} distinct cells", cells.len());

        GroupAvailability { cells }
    }

    /// Headcount for a cell; 0 when nobody marked it.
    pub fn count_for(&self, cell: &Cell) -> u32 {
        self.cells.get(cell).map_or(0, |tally| tally.count)
    }

    /// Attendee names for a cell, in participant order.
    pub fn names_for(&self, cell: &Cell) -> &[String] {
        self.cells
            .get(cell)
            .map(|tally| tally.names.as_slice())
            .unwrap_or(&[])
    }

    /// Whether everyone in a caller-fixed reference set of `total`
    /// participants marked this cell. A presentation tier, not a state.
    pub fn is_full(&self, cell: &Cell, total: usize) -> bool {
        total > 0 && self.count_for(cell) as usize == total
    }

    /// Every tallied cell with its tally, in cell order.
    pub fn cells(&self) -> impl Iterator<Item = (&Cell, &CellTally)> {
        self.cells.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Per-participant yes/no for one cell, in participant order. Backs the
/// hovered-cell attendee list of the group view.
pub fn attendance<'a>(cell: &Cell, participants: &'a [Participant]) -> Vec<(&'a str, bool)> {
    participants
        .iter()
        .map(|p| {
            (
                p.name.as_str(),
                p.availability.contains(&cell.date, cell.slot),
            )
        })
        .collect()
}
