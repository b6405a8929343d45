use core::fmt;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum TimeError {
    #[error("start time {start} must be before end time {end}")]
    InvalidRange { start: Slot, end: Slot },
    #[error("malformed slot label {0:?}, expected a zero-padded \"HH:MM\"")]
    MalformedSlot(String),
}

/// A canonical "HH:MM" time label.
///
/// Slots are naive local times with no timezone attached. The derived
/// ordering agrees with lexicographic order on the rendered label, since
/// both fields are zero-padded.
///
/// # Examples
/// ```
/// use meetgrid::time::Slot;
///
/// let slot: Slot = "09:30".parse().unwrap();
///
/// assert_eq!(slot.hour(), 9);
/// assert_eq!(slot.minute(), 30);
/// assert_eq!(slot.to_string(), "09:30");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot {
    hour: u8,
    minute: u8,
}

impl Slot {
    /// Constructs a Slot, rejecting out-of-range fields.
    ///
    /// # Examples
    /// ```
    /// use meetgrid::time::Slot;
    ///
    /// assert!(Slot::new(23, 59).is_ok());
    /// assert!(Slot::new(24, 0).is_err());
    /// ```
    pub fn new(hour: u8, minute: u8) -> Result<Slot, TimeError> {
        if hour > 23 || minute > 59 {
            Err(TimeError::MalformedSlot(format!("{:02}:{:02}", hour, minute)))
        } else {
            Ok(Slot { hour, minute })
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// The label 30 minutes later, carrying minutes >= 60 into the hour.
    /// Stepping past "23:30" produces an hour of 24; such a value is only
    /// ever compared against the end bound and never emitted.
    pub(crate) fn succ(self) -> Slot {
        let mut hour = self.hour;
        let mut minute = self.minute + 30;
        if minute >= 60 {
            hour += 1;
            minute -= 60;
        }
        Slot { hour, minute }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Slot {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::MalformedSlot(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(malformed)?;
        if h.len() != 2 || m.len() != 2 || !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hour = h.parse().map_err(|_| malformed())?;
        let minute = m.parse().map_err(|_| malformed())?;

        Slot::new(hour, minute).map_err(|_| malformed())
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(D::Error::custom)
    }
}

/// Generates the ordered half-hour slots between `start` and `end`.
///
/// Emits `start` and every 30-minute step strictly below `end`; when the
/// stepping lands exactly on `end`, `end` is emitted as the final slot.
/// The end bound is inclusive whenever it is reachable - there is no
/// exclusive variant.
///
/// # Errors
/// `TimeError::InvalidRange` when `start >= end`.
///
/// # Examples
/// ```
/// use meetgrid::time::{half_hour_slots, Slot};
///
/// let slots = half_hour_slots("09:00".parse().unwrap(), "10:00".parse().unwrap()).unwrap();
///
/// assert_eq!(
///     slots.iter().map(Slot::to_string).collect::<Vec<_>>(),
///     vec!["09:00", "09:30", "10:00"]
/// );
/// ```
pub fn half_hour_slots(start: Slot, end: Slot) -> Result<Vec<Slot>, TimeError> {
    if start >= end {
        return Err(TimeError::InvalidRange { start, end });
    }

    let span = (u16::from(end.hour) * 60 + u16::from(end.minute))
        - (u16::from(start.hour) * 60 + u16::from(start.minute));
    let mut slots = Vec::with_capacity(usize::from(span / 30) + 1);

    let mut current = start;
    while current < end {
        slots.push(current);
        current = current.succ();
    }

    // An end bound off the 30-minute lattice is skipped rather than clamped
    if current == end {
        slots.push(end);
    }

    Ok(slots)
}
