pub mod aggregate;
pub mod availability;
pub mod directory;
pub mod drag;
pub mod meeting;
pub mod participant;
pub mod time;

#[cfg(test)]
mod tests {

    fn slot(label: &str) -> crate::time::Slot {
        label.parse().unwrap()
    }

    #[test]
    fn generates_inclusive_slot_rows() {
        use crate::time::{half_hour_slots, Slot};

        let rows = half_hour_slots(slot("09:00"), slot("10:00")).unwrap();

        assert_eq!(
            rows.iter().map(Slot::to_string).collect::<Vec<_>>(),
            vec!["09:00", "09:30", "10:00"]
        );
    }

    #[test]
    fn slot_rows_are_strictly_increasing() {
        use crate::time::half_hour_slots;
        use itertools::Itertools;

        let rows = half_hour_slots(slot("09:00"), slot("18:00")).unwrap();

        // (end - start) / 30 + 1 for bounds on the half-hour lattice
        assert_eq!(rows.len(), 19);
        assert_eq!(rows[0], slot("09:00"));
        assert_eq!(rows[rows.len() - 1], slot("18:00"));
        assert!(rows.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn rejects_inverted_bounds() {
        use crate::time::{half_hour_slots, TimeError};

        assert_eq!(
            half_hour_slots(slot("10:00"), slot("09:00")),
            Err(TimeError::InvalidRange {
                start: slot("10:00"),
                end: slot("09:00"),
            })
        );
        assert!(half_hour_slots(slot("09:00"), slot("09:00")).is_err());
    }

    #[test]
    fn skips_unreachable_end_bound() {
        use crate::time::{half_hour_slots, Slot};

        // 10:15 is off the lattice; only strictly-below rows are emitted
        let rows = half_hour_slots(slot("09:00"), slot("10:15")).unwrap();

        assert_eq!(
            rows.iter().map(Slot::to_string).collect::<Vec<_>>(),
            vec!["09:00", "09:30", "10:00"]
        );
    }

    #[test]
    fn rejects_malformed_slot_labels() {
        use crate::time::Slot;

        for label in &["9:00", "09:60", "24:00", "0900", "ab:cd", "+9:30", ""] {
            assert!(label.parse::<Slot>().is_err(), "accepted {:?}", label);
        }
    }

    #[test]
    fn double_toggle_restores_snapshot() {
        use crate::availability::{AvailabilityStore, Cell};
        use crate::participant::Availability;

        let mut base = Availability::new();
        base.mark("2025-04-01", slot("11:00"));

        let mut store = AvailabilityStore::new();
        store.replace_all(base.clone());

        let cell = Cell::new("2025-04-02", slot("09:30"));
        store.toggle(&cell);
        assert!(store.is_marked(&cell));
        store.toggle(&cell);

        assert_eq!(store.snapshot(), base);
    }

    #[test]
    fn replace_all_snapshot_round_trip() {
        use crate::availability::AvailabilityStore;
        use crate::participant::Availability;

        let mut state = Availability::new();
        state.mark("2025-04-01", slot("09:00"));
        state.mark("2025-04-01", slot("09:30"));
        state.mark("2025-04-03", slot("15:00"));

        let mut store = AvailabilityStore::new();
        store.replace_all(state.clone());

        assert_eq!(store.snapshot(), state);
    }

    #[test]
    fn aggregates_counts_and_names() {
        use crate::aggregate::GroupAvailability;
        use crate::availability::Cell;
        use crate::participant::{Availability, Participant};

        let mut marked = Availability::new();
        marked.mark("2025-04-01", slot("09:00"));

        let participants = vec![
            Participant::with_availability("ana", marked.clone()),
            Participant::with_availability("ben", marked),
            Participant::new("cal"),
        ];

        let group = GroupAvailability::aggregate(&participants);
        let cell = Cell::new("2025-04-01", slot("09:00"));

        assert_eq!(group.count_for(&cell), 2);
        assert_eq!(group.names_for(&cell), ["ana", "ben"]);

        // Full only against a reference set of 2, not the 3 who joined
        assert!(group.is_full(&cell, 2));
        assert!(!group.is_full(&cell, participants.len()));
    }

    #[test]
    fn aggregation_counts_ignore_order_but_names_keep_it() {
        use crate::aggregate::GroupAvailability;
        use crate::availability::Cell;
        use crate::participant::{Availability, Participant};

        let mut marked = Availability::new();
        marked.mark("2025-04-01", slot("13:00"));

        let ana = Participant::with_availability("ana", marked.clone());
        let ben = Participant::with_availability("ben", marked);
        let cell = Cell::new("2025-04-01", slot("13:00"));

        let forward = GroupAvailability::aggregate(vec![&ana, &ben]);
        let backward = GroupAvailability::aggregate(vec![&ben, &ana]);

        assert_eq!(forward.count_for(&cell), backward.count_for(&cell));
        assert_eq!(forward.names_for(&cell), ["ana", "ben"]);
        assert_eq!(backward.names_for(&cell), ["ben", "ana"]);
    }

    #[test]
    fn aggregation_is_grid_agnostic() {
        use crate::aggregate::GroupAvailability;
        use crate::availability::Cell;
        use crate::participant::{Availability, Participant};

        let mut marked = Availability::new();
        marked.mark("not-a-candidate-date", slot("03:30"));

        let group = GroupAvailability::aggregate(&[Participant::with_availability("ana", marked)]);

        assert_eq!(
            group.count_for(&Cell::new("not-a-candidate-date", slot("03:30"))),
            1
        );
    }

    #[test]
    fn drag_gesture_toggles_each_entered_cell_once() {
        use crate::availability::{AvailabilityStore, Cell};
        use crate::drag::{DragSelect, PointerEvent};

        let x = Cell::new("2025-04-01", slot("09:00"));
        let y = Cell::new("2025-04-01", slot("09:30"));

        let mut drag = DragSelect::new();
        let mut store = AvailabilityStore::new();

        drag.drive(
            vec![
                PointerEvent::Down(x.clone()),
                PointerEvent::Enter(x.clone()), // fired on every crossing; must not re-toggle
                PointerEvent::Enter(y.clone()),
                PointerEvent::Up,
            ],
            &mut store,
        );

        assert!(store.is_marked(&x));
        assert!(store.is_marked(&y));

        // After the gesture ends, enter events are hover only
        drag.drive(vec![PointerEvent::Enter(x.clone())], &mut store);
        assert!(store.is_marked(&x));
    }

    #[test]
    fn drag_reentry_after_leaving_toggles_again() {
        use crate::availability::{AvailabilityStore, Cell};
        use crate::drag::{DragSelect, PointerEvent};

        let x = Cell::new("2025-04-01", slot("09:00"));
        let y = Cell::new("2025-04-01", slot("09:30"));

        let mut drag = DragSelect::new();
        let mut store = AvailabilityStore::new();

        drag.drive(
            vec![
                PointerEvent::Down(x.clone()),
                PointerEvent::Enter(y.clone()),
                PointerEvent::Enter(x.clone()),
                PointerEvent::Up,
            ],
            &mut store,
        );

        // x was left and re-entered: toggled on, then back off
        assert!(!store.is_marked(&x));
        assert!(store.is_marked(&y));
    }

    #[test]
    fn malformed_availability_clamps_to_empty() {
        use crate::participant::Participant;

        // The legacy single-date boolean shape
        let legacy = r#"{
            "name": "kim",
            "availability": { "09:00": true, "09:30": false },
            "joinedAt": "2025-04-01T10:00:00Z"
        }"#;
        let participant: Participant = serde_json::from_str(legacy).unwrap();
        assert!(participant.availability.is_empty());

        for field in &["null", "17", "[\"09:00\"]"] {
            let doc = format!(
                r#"{{ "name": "kim", "availability": {}, "joinedAt": "2025-04-01T10:00:00Z" }}"#,
                field
            );
            let participant: Participant = serde_json::from_str(&doc).unwrap();
            assert!(participant.availability.is_empty(), "accepted {}", field);
        }

        // A missing field is an empty map as well
        let bare = r#"{ "name": "kim", "joinedAt": "2025-04-01T10:00:00Z" }"#;
        let participant: Participant = serde_json::from_str(bare).unwrap();
        assert!(participant.availability.is_empty());
    }

    #[test]
    fn well_formed_availability_parses() {
        use crate::participant::Participant;

        let doc = r#"{
            "name": "kim",
            "availability": { "2025-04-01": ["09:00", "10:30"], "2025-04-02": [] },
            "joinedAt": "2025-04-01T10:00:00Z"
        }"#;

        let participant: Participant = serde_json::from_str(doc).unwrap();

        assert!(participant.availability.contains("2025-04-01", slot("09:00")));
        assert!(participant.availability.contains("2025-04-01", slot("10:30")));
        assert!(!participant.availability.contains("2025-04-02", slot("09:00")));
    }

    #[test]
    fn availability_outside_the_grid_is_rejected() {
        use crate::meeting::{Meeting, MeetingError};
        use crate::participant::Availability;

        let meeting = Meeting::new(
            "m1",
            "standup",
            vec!["2025-04-01".to_string()],
            slot("09:00"),
            slot("10:00"),
        )
        .unwrap();

        let mut on_grid = Availability::new();
        for row in meeting.slots() {
            on_grid.mark("2025-04-01", row);
        }
        assert!(on_grid.validate_against(&meeting).is_ok());

        let mut wrong_date = Availability::new();
        wrong_date.mark("2025-04-02", slot("09:00"));
        assert_eq!(
            wrong_date.validate_against(&meeting),
            Err(MeetingError::UnknownDate("2025-04-02".to_string()))
        );

        let mut wrong_slot = Availability::new();
        wrong_slot.mark("2025-04-01", slot("10:30"));
        assert_eq!(
            wrong_slot.validate_against(&meeting),
            Err(MeetingError::OutsideSlot {
                date: "2025-04-01".to_string(),
                slot: slot("10:30"),
            })
        );
    }

    #[test]
    fn meetings_reject_duplicate_dates() {
        use crate::meeting::{Meeting, MeetingError};

        let result = Meeting::new(
            "m1",
            "retro",
            vec!["2025-04-01".to_string(), "2025-04-01".to_string()],
            slot("09:00"),
            slot("10:00"),
        );

        assert!(matches!(result, Err(MeetingError::DuplicateDate(_))));
    }

    #[test]
    fn directory_round_trip() {
        use crate::aggregate::GroupAvailability;
        use crate::availability::{AvailabilityStore, Cell};
        use crate::directory::{Directory, InMemoryDirectory};

        let mut directory = InMemoryDirectory::new();

        let meeting_id = directory
            .create_meeting(
                "offsite",
                vec!["2025-04-01".to_string(), "2025-04-02".to_string()],
                slot("09:00"),
                slot("12:00"),
            )
            .unwrap();

        directory.create_participant(&meeting_id, "ana").unwrap();
        directory.create_participant(&meeting_id, "ben").unwrap();

        let cell = Cell::new("2025-04-01", slot("09:30"));
        let mut store = AvailabilityStore::new();
        store.toggle(&cell);

        directory
            .submit_availability(&meeting_id, "ana", store.snapshot())
            .unwrap();

        let participants = directory.load_participants(&meeting_id).unwrap();
        let group = GroupAvailability::aggregate(&participants);

        assert_eq!(group.count_for(&cell), 1);
        assert_eq!(group.names_for(&cell), ["ana"]);
        assert!(!group.is_full(&cell, participants.len()));
    }

    #[test]
    fn directory_surfaces_missing_records() {
        use crate::directory::{Directory, DirectoryError, InMemoryDirectory};
        use crate::participant::Availability;

        let mut directory = InMemoryDirectory::new();

        assert_eq!(
            directory.load_meeting("nope"),
            Err(DirectoryError::MeetingNotFound("nope".to_string()))
        );

        let meeting_id = directory
            .create_meeting(
                "offsite",
                vec!["2025-04-01".to_string()],
                slot("09:00"),
                slot("12:00"),
            )
            .unwrap();

        assert_eq!(
            directory.submit_availability(&meeting_id, "ghost", Availability::new()),
            Err(DirectoryError::ParticipantNotFound("ghost".to_string()))
        );
        assert_eq!(
            directory.create_participant(&meeting_id, ""),
            Err(DirectoryError::EmptyName)
        );
    }

    #[test]
    fn duplicate_names_submit_to_the_first_match() {
        use crate::directory::{Directory, InMemoryDirectory};
        use crate::participant::Availability;

        let mut directory = InMemoryDirectory::new();
        let meeting_id = directory
            .create_meeting(
                "offsite",
                vec!["2025-04-01".to_string()],
                slot("09:00"),
                slot("12:00"),
            )
            .unwrap();

        directory.create_participant(&meeting_id, "kim").unwrap();
        directory.create_participant(&meeting_id, "kim").unwrap();

        let mut marked = Availability::new();
        marked.mark("2025-04-01", slot("09:00"));
        directory
            .submit_availability(&meeting_id, "kim", marked)
            .unwrap();

        let participants = directory.load_participants(&meeting_id).unwrap();
        assert!(!participants[0].availability.is_empty());
        assert!(participants[1].availability.is_empty());
    }

    #[test]
    fn attendance_lists_every_participant_in_order() {
        use crate::aggregate::attendance;
        use crate::availability::Cell;
        use crate::participant::{Availability, Participant};

        let mut marked = Availability::new();
        marked.mark("2025-04-01", slot("09:00"));

        let participants = vec![
            Participant::with_availability("ana", marked),
            Participant::new("ben"),
        ];

        let cell = Cell::new("2025-04-01", slot("09:00"));

        assert_eq!(
            attendance(&cell, &participants),
            vec![("ana", true), ("ben", false)]
        );
    }
}
