use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    pub appointment_id: Uuid,
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub fitness_center_id: Option<Uuid>,
    pub starts_at: NaiveDateTime,
    pub is_approved: bool,
    pub version: i32,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// The same appointment approved or set back to pending. Approval is a
    /// plain flag: repeating a decision yields an equal value and nothing
    /// else on the appointment changes.
    pub fn with_approval(self, approved: bool) -> Self {
        Self {
            is_approved: approved,
            ..self
        }
    }
}

/// An existing booking as seen by the conflict check: when it starts and how
/// long its service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct BookedSlot {
    pub appointment_id: Uuid,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: i32,
}

impl BookedSlot {
    /// End of the slot, clamped to the last representable instant.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at
            .checked_add_signed(TimeDelta::minutes(i64::from(self.duration_minutes)))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Half-open overlap with `[start, end)`: touching endpoints do not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.starts_at < end && self.ends_at() > start
    }

    /// Whether the instant `at` falls inside this slot.
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        self.starts_at <= at && at < self.ends_at()
    }
}

/// Drops the seconds and sub-second parts of a booking time.
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at - TimeDelta::seconds(i64::from(at.second()))
        - TimeDelta::nanoseconds(i64::from(at.nanosecond()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn slot(h: u32, m: u32, duration_minutes: i32) -> BookedSlot {
        BookedSlot {
            appointment_id: Uuid::new_v4(),
            starts_at: at(h, m, 0),
            duration_minutes,
        }
    }

    fn pending() -> Appointment {
        Appointment {
            appointment_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            trainer_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            fitness_center_id: None,
            starts_at: at(10, 0, 0),
            is_approved: false,
            version: 3,
            created_at: at(8, 0, 0),
        }
    }

    #[test]
    fn test_approval_is_idempotent() {
        let once = pending().with_approval(true);
        let twice = once.clone().with_approval(true);

        assert!(once.is_approved);
        assert!(twice.is_approved);
        assert_eq!(twice.version, once.version);
    }

    #[test]
    fn test_rejection_returns_to_pending() {
        let original = pending();
        let rejected = original.clone().with_approval(true).with_approval(false);

        assert!(!rejected.is_approved);
        assert_eq!(rejected.appointment_id, original.appointment_id);
        assert_eq!(rejected.starts_at, original.starts_at);
        assert_eq!(rejected.version, original.version);
    }

    #[test]
    fn test_truncate_drops_seconds_and_millis() {
        let precise = NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_milli_opt(10, 0, 45, 250)
            .unwrap();
        assert_eq!(truncate_to_minute(precise), at(10, 0, 0));
        assert_eq!(truncate_to_minute(at(10, 0, 30)), at(10, 0, 0));
    }

    #[test]
    fn test_truncate_keeps_whole_minutes() {
        assert_eq!(truncate_to_minute(at(17, 59, 0)), at(17, 59, 0));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let existing = slot(10, 0, 30);
        assert!(existing.overlaps(at(10, 15, 0), at(10, 45, 0)));
        assert!(!existing.overlaps(at(10, 30, 0), at(11, 0, 0)));
        assert!(!existing.overlaps(at(9, 30, 0), at(10, 0, 0)));
    }

    #[test]
    fn test_overlap_when_enclosing() {
        let existing = slot(10, 0, 30);
        assert!(existing.overlaps(at(9, 0, 0), at(12, 0, 0)));
        assert!(existing.overlaps(at(10, 5, 0), at(10, 10, 0)));
    }

    #[test]
    fn test_covers_start_but_not_end() {
        let existing = slot(10, 0, 30);
        assert!(existing.covers(at(10, 0, 0)));
        assert!(existing.covers(at(10, 29, 0)));
        assert!(!existing.covers(at(10, 30, 0)));
    }

    #[test]
    fn test_slot_at_end_of_calendar_saturates() {
        let existing = BookedSlot {
            appointment_id: Uuid::new_v4(),
            starts_at: NaiveDateTime::MAX - TimeDelta::minutes(10),
            duration_minutes: 60,
        };
        assert_eq!(existing.ends_at(), NaiveDateTime::MAX);
        assert!(existing.covers(NaiveDateTime::MAX - TimeDelta::minutes(1)));
    }
}
