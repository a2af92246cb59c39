use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

/// The daily time-of-day range during which a trainer may be booked.
///
/// A window is only ever built with `from < to`, so a trainer either has a
/// usable window or none at all. The database enforces the same rule with a
/// CHECK constraint on the `trainers` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    from: NaiveTime,
    to: NaiveTime,
}

impl AvailabilityWindow {
    /// Builds a window, returning `None` when `from` is not strictly before `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use storage::models::AvailabilityWindow;
    ///
    /// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let six = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    ///
    /// assert!(AvailabilityWindow::new(nine, six).is_some());
    /// assert!(AvailabilityWindow::new(six, nine).is_none());
    /// ```
    pub fn new(from: NaiveTime, to: NaiveTime) -> Option<Self> {
        (from < to).then_some(Self { from, to })
    }

    /// Builds a window from the two nullable trainer columns.
    /// Both must be present for the trainer to have a window.
    pub fn from_columns(from: Option<NaiveTime>, to: Option<NaiveTime>) -> Option<Self> {
        match (from, to) {
            (Some(from), Some(to)) => Self::new(from, to),
            _ => None,
        }
    }

    pub fn from(&self) -> NaiveTime {
        self.from
    }

    pub fn to(&self) -> NaiveTime {
        self.to
    }

    /// Whether a session running from `start` to `end` fits inside the window.
    /// Sessions that run past midnight never fit.
    pub fn admits(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start.date() == end.date() && start.time() >= self.from && end.time() <= self.to
    }
}

impl fmt::Display for AvailabilityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from.format("%H:%M"), self.to.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn nine_to_six() -> AvailabilityWindow {
        AvailabilityWindow::new(time(9, 0), time(18, 0)).unwrap()
    }

    #[test]
    fn test_rejects_empty_or_inverted_window() {
        assert!(AvailabilityWindow::new(time(9, 0), time(9, 0)).is_none());
        assert!(AvailabilityWindow::new(time(18, 0), time(9, 0)).is_none());
    }

    #[test]
    fn test_from_columns_requires_both_boundaries() {
        assert!(AvailabilityWindow::from_columns(Some(time(9, 0)), None).is_none());
        assert!(AvailabilityWindow::from_columns(None, Some(time(18, 0))).is_none());
        assert_eq!(
            AvailabilityWindow::from_columns(Some(time(9, 0)), Some(time(18, 0))),
            Some(nine_to_six())
        );
    }

    #[test]
    fn test_admits_session_ending_on_boundary() {
        assert!(nine_to_six().admits(at(17, 0), at(18, 0)));
        assert!(nine_to_six().admits(at(9, 0), at(10, 0)));
    }

    #[test]
    fn test_rejects_session_past_closing() {
        assert!(!nine_to_six().admits(at(17, 30), at(18, 30)));
    }

    #[test]
    fn test_rejects_session_before_opening() {
        assert!(!nine_to_six().admits(at(8, 30), at(9, 30)));
    }

    #[test]
    fn test_rejects_session_crossing_midnight() {
        let window = AvailabilityWindow::new(time(0, 0), time(23, 59)).unwrap();
        let start = at(23, 30);
        let end = start + chrono::TimeDelta::minutes(60);
        assert!(!window.admits(start, end));
    }

    #[test]
    fn test_display_uses_hours_and_minutes() {
        assert_eq!(nine_to_six().to_string(), "09:00-18:00");
    }
}
