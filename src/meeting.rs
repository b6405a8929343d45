use crate::time::{half_hour_slots, Slot, TimeError};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum MeetingError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("a meeting needs at least one candidate date")]
    NoDates,
    #[error("candidate date {0:?} listed more than once")]
    DuplicateDate(String),
    #[error("{0:?} is not one of the meeting's candidate dates")]
    UnknownDate(String),
    #[error("{slot} on {date} is outside the meeting's time bound")]
    OutsideSlot { date: String, slot: Slot },
}

/// A scheduling poll: candidate dates crossed with a half-hour time bound.
/// Created once by the organizer and immutable thereafter; a single-date
/// meeting is simply one with exactly one candidate date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Meeting {
    pub id: String,
    #[serde(rename = "meetingName")]
    pub name: String,
    #[serde(rename = "selectedDates")]
    pub dates: Vec<String>,
    #[serde(rename = "startTime")]
    pub start: Slot,
    #[serde(rename = "endTime")]
    pub end: Slot,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    /// Constructs a new Meeting, validating the time bound and the
    /// candidate dates. Date order is preserved as given.
    ///
    /// # Errors
    /// `TimeError::InvalidRange` when `start >= end`; `NoDates` or
    /// `DuplicateDate` when the candidate dates are not an ordered set.
    ///
    /// # Examples
    /// ```
    /// use meetgrid::meeting::Meeting;
    ///
    /// let meeting = Meeting::new(
    ///     "m1",
    ///     "lunch",
    ///     vec!["2025-04-01".to_string(), "2025-04-02".to_string()],
    ///     "11:00".parse().unwrap(),
    ///     "13:00".parse().unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(meeting.slots().len(), 5);
    /// ```
    pub fn new(
        id: &str,
        name: &str,
        dates: Vec<String>,
        start: Slot,
        end: Slot,
    ) -> Result<Meeting, MeetingError> {
        if start >= end {
            return Err(TimeError::InvalidRange { start, end }.into());
        }
        if dates.is_empty() {
            return Err(MeetingError::NoDates);
        }
        if let Some(dup) = dates.iter().duplicates().next() {
            return Err(MeetingError::DuplicateDate(dup.clone()));
        }

        Ok(Meeting {
            id: id.to_string(),
            name: name.to_string(),
            dates,
            start,
            end,
            created_at: Utc::now(),
        })
    }

    /// The rows of this meeting's grid, end bound inclusive.
    /// A deserialized meeting carrying an inverted bound yields no rows.
    pub fn slots(&self) -> Vec<Slot> {
        half_hour_slots(self.start, self.end).unwrap_or_default()
    }

    /// Whether `(date, slot)` is a cell of this meeting's grid.
    pub fn contains(&self, date: &str, slot: Slot) -> bool {
        self.dates.iter().any(|d| d == date) && self.slots().contains(&slot)
    }
}
