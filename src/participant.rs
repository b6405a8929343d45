use crate::meeting::{Meeting, MeetingError};
use crate::time::Slot;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A participant's marked cells: candidate date mapped to the set of slots
/// they can attend. Empty sets per date are valid and preserved.
#[derive(Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Availability(BTreeMap<String, BTreeSet<Slot>>);

impl Availability {
    pub fn new() -> Availability {
        Availability::default()
    }

    /// Whether `(date, slot)` is marked.
    pub fn contains(&self, date: &str, slot: Slot) -> bool {
        self.0.get(date).map_or(false, |slots| slots.contains(&slot))
    }

    /// True when no cell is marked, even if date entries exist.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Every marked cell, in date order then slot order.
    pub fn marked(&self) -> impl Iterator<Item = (&str, Slot)> + '_ {
        self.0
            .iter()
            .flat_map(|(date, slots)| slots.iter().map(move |&slot| (date.as_str(), slot)))
    }

    /// Marks a single cell, creating the date entry if absent.
    pub fn mark(&mut self, date: &str, slot: Slot) {
        self.0.entry(date.to_string()).or_default().insert(slot);
    }

    /// Flips membership of `slot` under `date`, creating the date entry on
    /// first touch. Clearing the last slot keeps the empty date entry.
    /// Returns whether the cell is now marked.
    pub(crate) fn toggle(&mut self, date: &str, slot: Slot) -> bool {
        let slots = self.0.entry(date.to_string()).or_default();
        if slots.remove(&slot) {
            false
        } else {
            slots.insert(slot);
            true
        }
    }

    /// Checks that every marked key belongs to the meeting's grid of
    /// candidate dates and generated slots. Aggregation does not require
    /// this; it is the caller's guard before accepting a submission.
    pub fn validate_against(&self, meeting: &Meeting) -> Result<(), MeetingError> {
        let rows = meeting.slots();

        for (date, slots) in &self.0 {
            if !meeting.dates.iter().any(|d| d == date) {
                return Err(MeetingError::UnknownDate(date.clone()));
            }
            if let Some(&slot) = slots.iter().find(|&slot| !rows.contains(slot)) {
                return Err(MeetingError::OutsideSlot {
                    date: date.clone(),
                    slot,
                });
            }
        }

        Ok(())
    }
}

impl<'de> Deserialize<'de> for Availability {
    /// Lenient by design: a stored availability field that is not a
    /// date -> [slot] map (the legacy boolean shape, null, a scalar)
    /// deserializes as empty instead of failing the whole document.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Grid(BTreeMap<String, BTreeSet<Slot>>),
            Unrecognized(serde::de::IgnoredAny),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Grid(map) => Availability(map),
            Repr::Unrecognized(_) => {
                warn!("unrecognized availability shape, clamping to empty");
                Availability::default()
            }
        })
    }
}

impl std::iter::FromIterator<(String, BTreeSet<Slot>)> for Availability {
    fn from_iter<I: IntoIterator<Item = (String, BTreeSet<Slot>)>>(iter: I) -> Availability {
        Availability(iter.into_iter().collect())
    }
}

/// One person who joined a meeting. Names are not guaranteed unique across
/// participants; the stored document id is the directory's concern.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// A freshly joined participant with nothing marked yet.
    pub fn new(name: &str) -> Participant {
        Participant {
            name: name.to_string(),
            availability: Availability::new(),
            joined_at: Utc::now(),
        }
    }

    pub fn with_availability(name: &str, availability: Availability) -> Participant {
        Participant {
            name: name.to_string(),
            availability,
            joined_at: Utc::now(),
        }
    }
}
