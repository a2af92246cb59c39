//! Appointment booking rules.
//!
//! [`evaluate`] is a pure decision over a snapshot of the trainer, the
//! service and the trainer's existing bookings. [`validate_booking`] gathers
//! that snapshot through the [`TrainerDirectory`] and [`AppointmentLedger`]
//! seams and then evaluates it. Neither writes anything: persisting an
//! accepted booking is the caller's job.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{BookedSlot, Service, TrainerProfile, truncate_to_minute};

/// Read access to trainers and the services they deliver.
#[async_trait]
pub trait TrainerDirectory: Send {
    async fn find_trainer(&mut self, trainer_id: Uuid) -> Result<Option<TrainerProfile>>;

    async fn find_service(&mut self, service_id: Uuid) -> Result<Option<Service>>;
}

/// Read access to a trainer's existing bookings.
#[async_trait]
pub trait AppointmentLedger: Send {
    /// Every booking of `trainer_id` with its service duration resolved,
    /// leaving out `excluding` when given.
    async fn list_for_trainer(
        &mut self,
        trainer_id: Uuid,
        excluding: Option<Uuid>,
    ) -> Result<Vec<BookedSlot>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingErrorKind {
    InvalidService,
    InvalidTrainer,
    OutsideAvailability,
    TimeConflict,
    PastDate,
}

/// One failed rule, addressed to the request field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingViolation {
    pub field: String,
    pub kind: BookingErrorKind,
    pub message: String,
}

impl BookingViolation {
    fn new(field: &str, kind: BookingErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Switches for the rules that differ between deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Refuse bookings that start before the current time.
    pub reject_past_dates: bool,
    /// Refuse bookings with a trainer who is not linked to the service.
    pub require_qualified_trainer: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            reject_past_dates: true,
            require_qualified_trainer: true,
        }
    }
}

/// A requested appointment, either new or an edit of `excluding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingProposal {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub fitness_center_id: Option<Uuid>,
    pub starts_at: NaiveDateTime,
    pub excluding: Option<Uuid>,
}

/// A booking that passed every rule. It is always pending approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
    pub service_id: Uuid,
    pub fitness_center_id: Option<Uuid>,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_approved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingDecision {
    Accepted(ValidatedBooking),
    Rejected(Vec<BookingViolation>),
}

impl BookingDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BookingDecision::Accepted(_))
    }

    pub fn violations(&self) -> &[BookingViolation] {
        match self {
            BookingDecision::Accepted(_) => &[],
            BookingDecision::Rejected(violations) => violations,
        }
    }
}

/// What the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct BookingSnapshot<'a> {
    pub service: Option<&'a Service>,
    pub trainer: Option<&'a TrainerProfile>,
    pub booked: &'a [BookedSlot],
}

/// Applies every booking rule and reports all failures together.
pub fn evaluate(
    proposal: &BookingProposal,
    snapshot: BookingSnapshot<'_>,
    policy: &BookingPolicy,
    now: NaiveDateTime,
) -> BookingDecision {
    let start = truncate_to_minute(proposal.starts_at);
    let mut violations = Vec::new();

    if snapshot.service.is_none() {
        violations.push(BookingViolation::new(
            "service_id",
            BookingErrorKind::InvalidService,
            format!("Service {} does not exist", proposal.service_id),
        ));
    }

    if snapshot.trainer.is_none() {
        violations.push(BookingViolation::new(
            "trainer_id",
            BookingErrorKind::InvalidTrainer,
            format!("Trainer {} does not exist", proposal.trainer_id),
        ));
    }

    if let (Some(trainer), Some(service)) = (snapshot.trainer, snapshot.service) {
        if policy.require_qualified_trainer && !trainer.offers(service.service_id) {
            violations.push(BookingViolation::new(
                "service_id",
                BookingErrorKind::InvalidService,
                format!(
                    "{} does not offer {}",
                    trainer.trainer.full_name, service.name
                ),
            ));
        }
    }

    let end = snapshot.service.and_then(|service| service.end_for(start));
    if snapshot.service.is_some() && end.is_none() {
        violations.push(BookingViolation::new(
            "starts_at",
            BookingErrorKind::OutsideAvailability,
            "The session would end past the last bookable date",
        ));
    }

    if let (Some(trainer), Some(end)) = (snapshot.trainer, end) {
        if let Some(window) = trainer.trainer.availability() {
            if !window.admits(start, end) {
                violations.push(BookingViolation::new(
                    "starts_at",
                    BookingErrorKind::OutsideAvailability,
                    format!(
                        "{} can only be booked between {} and {}",
                        trainer.trainer.full_name,
                        window.from().format("%H:%M"),
                        window.to().format("%H:%M")
                    ),
                ));
            }
        }
    }

    let mut others = snapshot
        .booked
        .iter()
        .filter(|slot| Some(slot.appointment_id) != proposal.excluding);
    let conflict = match end {
        Some(end) => others.find(|slot| slot.overlaps(start, end)),
        // Without a duration only the requested start instant can be tested.
        None => others.find(|slot| slot.covers(start)),
    };
    if let Some(slot) = conflict {
        violations.push(BookingViolation::new(
            "starts_at",
            BookingErrorKind::TimeConflict,
            format!(
                "The trainer is already booked from {} to {}",
                slot.starts_at.format("%Y-%m-%d %H:%M"),
                slot.ends_at().format("%H:%M")
            ),
        ));
    }

    if policy.reject_past_dates && start < truncate_to_minute(now) {
        violations.push(BookingViolation::new(
            "starts_at",
            BookingErrorKind::PastDate,
            "Appointments cannot be booked in the past",
        ));
    }

    match (violations.is_empty(), end) {
        (true, Some(end)) => BookingDecision::Accepted(ValidatedBooking {
            member_id: proposal.member_id,
            trainer_id: proposal.trainer_id,
            service_id: proposal.service_id,
            fitness_center_id: proposal.fitness_center_id,
            starts_at: start,
            ends_at: end,
            is_approved: false,
        }),
        _ => BookingDecision::Rejected(violations),
    }
}

/// Loads the snapshot for `proposal` and evaluates it.
///
/// Only infrastructure failures surface as `Err`; broken rules come back as
/// [`BookingDecision::Rejected`].
pub async fn validate_booking<C>(
    context: &mut C,
    proposal: &BookingProposal,
    policy: &BookingPolicy,
    now: NaiveDateTime,
) -> Result<BookingDecision>
where
    C: TrainerDirectory + AppointmentLedger,
{
    let service = context.find_service(proposal.service_id).await?;
    let trainer = context.find_trainer(proposal.trainer_id).await?;
    let booked = context
        .list_for_trainer(proposal.trainer_id, proposal.excluding)
        .await?;

    let snapshot = BookingSnapshot {
        service: service.as_ref(),
        trainer: trainer.as_ref(),
        booked: &booked,
    };

    let decision = evaluate(proposal, snapshot, policy, now);
    tracing::debug!(
        trainer_id = %proposal.trainer_id,
        starts_at = %proposal.starts_at,
        accepted = decision.is_accepted(),
        "Evaluated booking against {} existing appointment(s)",
        booked.len()
    );

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trainer;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn service(duration_minutes: i32) -> Service {
        Service {
            service_id: Uuid::new_v4(),
            name: "Personal training".to_string(),
            duration_minutes,
            price: Decimal::new(500, 0),
            fitness_center_id: Uuid::new_v4(),
            created_at: now(),
        }
    }

    fn trainer(window: Option<(u32, u32)>, offers: &[&Service]) -> TrainerProfile {
        let (available_from, available_to) = match window {
            Some((from, to)) => (
                NaiveTime::from_hms_opt(from, 0, 0),
                NaiveTime::from_hms_opt(to, 0, 0),
            ),
            None => (None, None),
        };
        TrainerProfile {
            trainer: Trainer {
                trainer_id: Uuid::new_v4(),
                full_name: "Mert Demir".to_string(),
                specialty: None,
                fitness_center_id: Uuid::new_v4(),
                available_from,
                available_to,
                created_at: now(),
            },
            service_ids: offers.iter().map(|s| s.service_id).collect(),
        }
    }

    fn booked(starts_at: NaiveDateTime, duration_minutes: i32) -> BookedSlot {
        BookedSlot {
            appointment_id: Uuid::new_v4(),
            starts_at,
            duration_minutes,
        }
    }

    fn proposal(
        trainer: &TrainerProfile,
        service: &Service,
        starts_at: NaiveDateTime,
    ) -> BookingProposal {
        BookingProposal {
            member_id: Uuid::new_v4(),
            trainer_id: trainer.trainer.trainer_id,
            service_id: service.service_id,
            fitness_center_id: None,
            starts_at,
            excluding: None,
        }
    }

    fn decide(
        proposal: &BookingProposal,
        trainer: Option<&TrainerProfile>,
        service: Option<&Service>,
        booked: &[BookedSlot],
    ) -> BookingDecision {
        let snapshot = BookingSnapshot {
            service,
            trainer,
            booked,
        };
        evaluate(proposal, snapshot, &BookingPolicy::default(), now())
    }

    fn kinds(decision: &BookingDecision) -> Vec<BookingErrorKind> {
        decision.violations().iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_overlapping_booking_conflicts() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);
        let existing = [booked(at(10, 0), 30)];

        let decision = decide(&proposal(&t, &svc, at(10, 15)), Some(&t), Some(&svc), &existing);

        assert_eq!(kinds(&decision), vec![BookingErrorKind::TimeConflict]);
        assert_eq!(decision.violations()[0].field, "starts_at");
    }

    #[test]
    fn test_back_to_back_bookings_are_allowed() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);
        let existing = [booked(at(10, 0), 30)];

        let after = decide(&proposal(&t, &svc, at(10, 30)), Some(&t), Some(&svc), &existing);
        let before = decide(&proposal(&t, &svc, at(9, 30)), Some(&t), Some(&svc), &existing);

        assert!(after.is_accepted());
        assert!(before.is_accepted());
    }

    #[test]
    fn test_edit_does_not_conflict_with_itself() {
        let svc = service(60);
        let t = trainer(Some((9, 18)), &[&svc]);
        let own = booked(at(11, 0), 60);
        let mut edit = proposal(&t, &svc, at(11, 0));
        edit.excluding = Some(own.appointment_id);

        let decision = decide(&edit, Some(&t), Some(&svc), &[own]);

        assert!(decision.is_accepted());
    }

    #[test]
    fn test_edit_still_conflicts_with_other_bookings() {
        let svc = service(60);
        let t = trainer(None, &[&svc]);
        let own = booked(at(11, 0), 60);
        let other = booked(at(12, 0), 60);
        let mut edit = proposal(&t, &svc, at(11, 30));
        edit.excluding = Some(own.appointment_id);

        let decision = decide(&edit, Some(&t), Some(&svc), &[own, other]);

        assert_eq!(kinds(&decision), vec![BookingErrorKind::TimeConflict]);
    }

    #[test]
    fn test_end_past_availability_is_rejected() {
        let svc = service(60);
        let t = trainer(Some((9, 18)), &[&svc]);

        let late = decide(&proposal(&t, &svc, at(17, 30)), Some(&t), Some(&svc), &[]);
        let on_time = decide(&proposal(&t, &svc, at(17, 0)), Some(&t), Some(&svc), &[]);

        assert_eq!(kinds(&late), vec![BookingErrorKind::OutsideAvailability]);
        assert!(late.violations()[0].message.contains("09:00"));
        assert!(late.violations()[0].message.contains("18:00"));
        assert!(on_time.is_accepted());
    }

    #[test]
    fn test_start_before_availability_is_rejected() {
        let svc = service(60);
        let t = trainer(Some((9, 18)), &[&svc]);

        let decision = decide(&proposal(&t, &svc, at(8, 30)), Some(&t), Some(&svc), &[]);

        assert_eq!(kinds(&decision), vec![BookingErrorKind::OutsideAvailability]);
    }

    #[test]
    fn test_trainer_without_window_is_bookable_any_time() {
        let svc = service(60);
        let t = trainer(None, &[&svc]);

        let decision = decide(&proposal(&t, &svc, at(6, 0)), Some(&t), Some(&svc), &[]);

        assert!(decision.is_accepted());
    }

    #[test]
    fn test_session_ending_past_last_date_is_rejected() {
        let svc = service(60);
        let t = trainer(None, &[&svc]);
        let last_evening = NaiveDate::MAX.and_hms_opt(23, 30, 0).unwrap();
        let existing = [booked(last_evening, 60)];

        let free = decide(&proposal(&t, &svc, last_evening), Some(&t), Some(&svc), &[]);
        let taken = decide(&proposal(&t, &svc, last_evening), Some(&t), Some(&svc), &existing);

        assert_eq!(kinds(&free), vec![BookingErrorKind::OutsideAvailability]);
        assert_eq!(free.violations()[0].field, "starts_at");
        assert_eq!(
            kinds(&taken),
            vec![
                BookingErrorKind::OutsideAvailability,
                BookingErrorKind::TimeConflict,
            ]
        );
    }

    #[test]
    fn test_seconds_are_truncated_before_conflict_check() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);
        let existing = [booked(at(10, 0), 30)];
        let precise = at(10, 0) + chrono::TimeDelta::seconds(45);

        let decision = decide(&proposal(&t, &svc, precise), Some(&t), Some(&svc), &existing);

        assert_eq!(kinds(&decision), vec![BookingErrorKind::TimeConflict]);
    }

    #[test]
    fn test_accepted_booking_is_pending_and_minute_aligned() {
        let svc = service(45);
        let t = trainer(Some((9, 18)), &[&svc]);
        let precise = at(14, 0) + chrono::TimeDelta::milliseconds(30_500);

        let decision = decide(&proposal(&t, &svc, precise), Some(&t), Some(&svc), &[]);

        match decision {
            BookingDecision::Accepted(booking) => {
                assert!(!booking.is_approved);
                assert_eq!(booking.starts_at, at(14, 0));
                assert_eq!(booking.ends_at, at(14, 45));
            }
            BookingDecision::Rejected(violations) => {
                panic!("unexpected rejection: {:?}", violations)
            }
        }
    }

    #[test]
    fn test_reports_every_failure() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);
        let existing = [booked(at(10, 0), 30)];
        let mut request = proposal(&t, &svc, at(10, 10));
        request.service_id = Uuid::new_v4();
        let policy = BookingPolicy::default();
        let snapshot = BookingSnapshot {
            service: None,
            trainer: Some(&t),
            booked: &existing,
        };
        let later = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let decision = evaluate(&request, snapshot, &policy, later);

        assert_eq!(
            kinds(&decision),
            vec![
                BookingErrorKind::InvalidService,
                BookingErrorKind::TimeConflict,
                BookingErrorKind::PastDate,
            ]
        );
    }

    #[test]
    fn test_unknown_trainer_is_reported() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);

        let decision = decide(&proposal(&t, &svc, at(10, 0)), None, Some(&svc), &[]);

        assert_eq!(kinds(&decision), vec![BookingErrorKind::InvalidTrainer]);
        assert_eq!(decision.violations()[0].field, "trainer_id");
    }

    #[test]
    fn test_past_date_depends_on_policy() {
        let svc = service(30);
        let t = trainer(None, &[&svc]);
        let request = proposal(&t, &svc, at(10, 0));
        let snapshot = BookingSnapshot {
            service: Some(&svc),
            trainer: Some(&t),
            booked: &[],
        };
        let after_booking = at(12, 0);
        let lenient = BookingPolicy {
            reject_past_dates: false,
            ..BookingPolicy::default()
        };

        let strict_decision =
            evaluate(&request, snapshot, &BookingPolicy::default(), after_booking);
        let lenient_decision = evaluate(&request, snapshot, &lenient, after_booking);

        assert_eq!(kinds(&strict_decision), vec![BookingErrorKind::PastDate]);
        assert!(lenient_decision.is_accepted());
    }

    #[test]
    fn test_unqualified_trainer_depends_on_policy() {
        let svc = service(30);
        let t = trainer(None, &[]);
        let request = proposal(&t, &svc, at(10, 0));
        let snapshot = BookingSnapshot {
            service: Some(&svc),
            trainer: Some(&t),
            booked: &[],
        };
        let lenient = BookingPolicy {
            require_qualified_trainer: false,
            ..BookingPolicy::default()
        };

        let strict_decision = evaluate(&request, snapshot, &BookingPolicy::default(), now());
        let lenient_decision = evaluate(&request, snapshot, &lenient, now());

        assert_eq!(kinds(&strict_decision), vec![BookingErrorKind::InvalidService]);
        assert!(lenient_decision.is_accepted());
    }

    #[test]
    fn test_violation_serializes_kind_in_snake_case() {
        let violation = BookingViolation::new(
            "starts_at",
            BookingErrorKind::OutsideAvailability,
            "Outside the trainer's hours",
        );

        let json = serde_json::to_value(&violation).unwrap();

        assert_eq!(json["field"], "starts_at");
        assert_eq!(json["kind"], "outside_availability");
    }

    /// Directory and ledger backed by plain vectors.
    #[derive(Default)]
    struct InMemoryBookings {
        trainers: Vec<TrainerProfile>,
        services: Vec<Service>,
        appointments: Vec<(Uuid, BookedSlot)>,
    }

    #[async_trait]
    impl TrainerDirectory for InMemoryBookings {
        async fn find_trainer(&mut self, trainer_id: Uuid) -> Result<Option<TrainerProfile>> {
            Ok(self
                .trainers
                .iter()
                .find(|t| t.trainer.trainer_id == trainer_id)
                .cloned())
        }

        async fn find_service(&mut self, service_id: Uuid) -> Result<Option<Service>> {
            Ok(self
                .services
                .iter()
                .find(|s| s.service_id == service_id)
                .cloned())
        }
    }

    #[async_trait]
    impl AppointmentLedger for InMemoryBookings {
        async fn list_for_trainer(
            &mut self,
            trainer_id: Uuid,
            excluding: Option<Uuid>,
        ) -> Result<Vec<BookedSlot>> {
            Ok(self
                .appointments
                .iter()
                .filter(|(owner, slot)| {
                    *owner == trainer_id && Some(slot.appointment_id) != excluding
                })
                .map(|(_, slot)| *slot)
                .collect())
        }
    }

    #[tokio::test]
    async fn test_validate_booking_reads_only_the_trainers_ledger() {
        let svc = service(30);
        let busy = trainer(None, &[&svc]);
        let free = trainer(None, &[&svc]);
        let mut bookings = InMemoryBookings {
            trainers: vec![busy.clone(), free.clone()],
            services: vec![svc.clone()],
            appointments: vec![(busy.trainer.trainer_id, booked(at(10, 0), 30))],
        };

        let rejected = validate_booking(
            &mut bookings,
            &proposal(&busy, &svc, at(10, 15)),
            &BookingPolicy::default(),
            now(),
        )
        .await
        .unwrap();
        let accepted = validate_booking(
            &mut bookings,
            &proposal(&free, &svc, at(10, 15)),
            &BookingPolicy::default(),
            now(),
        )
        .await
        .unwrap();

        assert_eq!(kinds(&rejected), vec![BookingErrorKind::TimeConflict]);
        assert!(accepted.is_accepted());
    }

    #[tokio::test]
    async fn test_validate_booking_sequence_on_one_trainer() {
        let svc = service(30);
        let t = trainer(Some((9, 18)), &[&svc]);
        let mut bookings = InMemoryBookings {
            trainers: vec![t.clone()],
            services: vec![svc.clone()],
            ..InMemoryBookings::default()
        };
        let policy = BookingPolicy::default();

        let first = validate_booking(&mut bookings, &proposal(&t, &svc, at(10, 0)), &policy, now())
            .await
            .unwrap();
        assert!(first.is_accepted());
        bookings
            .appointments
            .push((t.trainer.trainer_id, booked(at(10, 0), 30)));

        let overlapping =
            validate_booking(&mut bookings, &proposal(&t, &svc, at(10, 15)), &policy, now())
                .await
                .unwrap();
        let adjacent =
            validate_booking(&mut bookings, &proposal(&t, &svc, at(10, 30)), &policy, now())
                .await
                .unwrap();

        assert_eq!(kinds(&overlapping), vec![BookingErrorKind::TimeConflict]);
        assert!(adjacent.is_accepted());
    }
}
