use crate::meeting::{Meeting, MeetingError};
use crate::participant::{Availability, Participant};
use crate::time::Slot;
use log::{debug, info};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum DirectoryError {
    #[error("meeting {0:?} not found")]
    MeetingNotFound(String),
    #[error("participant {0:?} not found")]
    ParticipantNotFound(String),
    #[error("participant name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Meeting(#[from] MeetingError),
}

/// The document store the scheduling core reads and writes through.
///
/// Meetings are immutable once created; participant availability is a full
/// replace per submission with last write winning, and no coordination
/// between concurrent writers. Callers aggregate from the latest
/// `load_participants` read, so staleness is bounded by that read.
pub trait Directory {
    fn load_meeting(&self, id: &str) -> Result<Meeting, DirectoryError>;

    fn load_participants(&self, meeting_id: &str) -> Result<Vec<Participant>, DirectoryError>;

    /// Creates a meeting and returns its generated id.
    fn create_meeting(
        &mut self,
        name: &str,
        dates: Vec<String>,
        start: Slot,
        end: Slot,
    ) -> Result<String, DirectoryError>;

    /// Joins `name` to the meeting with empty availability and returns the
    /// new participant's id. Duplicate names are allowed.
    fn create_participant(&mut self, meeting_id: &str, name: &str)
        -> Result<String, DirectoryError>;

    /// Replaces the availability of the first participant matching `name`.
    fn submit_availability(
        &mut self,
        meeting_id: &str,
        participant_name: &str,
        availability: Availability,
    ) -> Result<(), DirectoryError>;
}

/// The shareable join link for a meeting:
/// `{origin}/enter-name?meetingId={id}`.
///
/// # Examples
/// ```
/// use meetgrid::directory::join_link;
///
/// assert_eq!(
///     join_link("https://example.org", "m1"),
///     "https://example.org/enter-name?meetingId=m1"
/// );
/// ```
pub fn join_link(origin: &str, meeting_id: &str) -> String {
    format!("{}/enter-name?meetingId={}", origin, meeting_id)
}

/// A `Directory` over plain maps, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    meetings: HashMap<String, Meeting>,
    // participant document id alongside the record, as the backing store keeps them
    participants: HashMap<String, Vec<(String, Participant)>>,
}

impl InMemoryDirectory {
    pub fn new() -> InMemoryDirectory {
        InMemoryDirectory::default()
    }
}

impl Directory for InMemoryDirectory {
    fn load_meeting(&self, id: &str) -> Result<Meeting, DirectoryError> {
        self.meetings
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::MeetingNotFound(id.to_string()))
    }

    fn load_participants(&self, meeting_id: &str) -> Result<Vec<Participant>, DirectoryError> {
        if !self.meetings.contains_key(meeting_id) {
            return Err(DirectoryError::MeetingNotFound(meeting_id.to_string()));
        }

        Ok(self
            .participants
            .get(meeting_id)
            .map(|entries| entries.iter().map(|(_, p)| p.clone()).collect())
            .unwrap_or_default())
    }

    fn create_meeting(
        &mut self,
        name: &str,
        dates: Vec<String>,
        start: Slot,
        end: Slot,
    ) -> Result<String, DirectoryError> {
        let id = Uuid::new_v4().to_string();
        let meeting = Meeting::new(&id, name, dates, start, end)?;

        info!("created meeting {} ({})", id, name);
        self.meetings.insert(id.clone(), meeting);

        Ok(id)
    }

    fn create_participant(
        &mut self,
        meeting_id: &str,
        name: &str,
    ) -> Result<String, DirectoryError> {
        if name.is_empty() {
            return Err(DirectoryError::EmptyName);
        }
        if !self.meetings.contains_key(meeting_id) {
            return Err(DirectoryError::MeetingNotFound(meeting_id.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        self.participants
            .entry(meeting_id.to_string())
            .or_default()
            .push((id.clone(), Participant::new(name)));

        debug!("participant {} joined meeting {}", name, meeting_id);

        Ok(id)
    }

    fn submit_availability(
        &mut self,
        meeting_id: &str,
        participant_name: &str,
        availability: Availability,
    ) -> Result<(), DirectoryError> {
        if !self.meetings.contains_key(meeting_id) {
            return Err(DirectoryError::MeetingNotFound(meeting_id.to_string()));
        }

        // First match wins when names collide, like the backing store's name query
        let entries = self.participants.entry(meeting_id.to_string()).or_default();
        match entries
            .iter_mut()
            .find(|(_, p)| p.name == participant_name)
        {
            Some((_, participant)) => {
                participant.availability = availability;
                debug!("stored availability for {}", participant_name);
                Ok(())
            }
            None => Err(DirectoryError::ParticipantNotFound(
                participant_name.to_string(),
            )),
        }
    }
}
