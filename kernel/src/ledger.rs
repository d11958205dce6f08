//! Decision logic of the booking ledger. Everything here is pure: the
//! adapter re-reads the current occupancy inside a SERIALIZABLE
//! transaction, asks this module what to write, and commits the plan
//! all-or-nothing.

use crate::model::{
    calendar::resolve_slot_for_date,
    capacity::compute_state,
    id::ReservationId,
    reservation::{
        event::{BookBatch, ReleaseBatch},
        Reservation, ReservationStatus,
    },
    schedule::Schedule,
};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;

/// Rows a validated batch will create, in input date order.
#[derive(Debug)]
pub struct BatchPlan {
    pub status: ReservationStatus,
    pub rows: Vec<PlannedReservation>,
}

#[derive(Debug)]
pub struct PlannedReservation {
    pub id: ReservationId,
    pub date: NaiveDate,
}

/// Validates a booking batch against the schedule and the reservations
/// currently committed for the requested dates. Fails the whole batch on
/// the first violated rule; a returned plan creates every row or none.
pub fn plan_batch(
    schedule: &Schedule,
    event: &BookBatch,
    existing: &[Reservation],
    window_open_days: u32,
) -> AppResult<BatchPlan> {
    event.validate(window_open_days)?;

    for &date in &event.dates {
        resolve_slot_for_date(schedule, date)?;
    }

    let duplicates: Vec<NaiveDate> = event
        .dates
        .iter()
        .copied()
        .filter(|&date| {
            existing.iter().any(|r| {
                r.user_id == event.user_id
                    && r.schedule_id == schedule.id
                    && r.date == date
                    && r.status.occupies_slot()
            })
        })
        .collect();
    if !duplicates.is_empty() {
        return Err(AppError::DuplicateBooking(duplicates));
    }

    let full: Vec<NaiveDate> = event
        .dates
        .iter()
        .copied()
        .filter(|&date| compute_state(schedule, date, existing).is_full)
        .collect();
    if !full.is_empty() {
        return Err(AppError::SlotFull(full));
    }

    let status = if event.payment.is_some() {
        ReservationStatus::Confirmed
    } else {
        ReservationStatus::Pending
    };
    let rows = event
        .dates
        .iter()
        .map(|&date| PlannedReservation {
            id: ReservationId::new(),
            date,
        })
        .collect();
    Ok(BatchPlan { status, rows })
}

/// What a release request will actually change.
#[derive(Debug)]
pub struct ReleasePlan {
    /// Reservations to transition to CANCELLED.
    pub cancel: Vec<ReservationId>,
    /// The subset of `cancel` that was paid and now owes a refund.
    pub refund: Vec<ReservationId>,
    /// Count of newly released reservations. Already-cancelled ids are
    /// tolerated no-ops and do not count.
    pub released: u64,
}

/// Validates a release batch against the current rows. Ownership and
/// terminal-state rules fail the whole request; re-releasing an
/// already-cancelled reservation is a no-op so retried requests succeed.
pub fn plan_release(event: &ReleaseBatch, current: &[Reservation]) -> AppResult<ReleasePlan> {
    if event.reservation_ids.is_empty() {
        return Err(AppError::InvalidRequest(
            "reservation ids must not be empty".into(),
        ));
    }

    let by_id: HashMap<ReservationId, &Reservation> =
        current.iter().map(|r| (r.id, r)).collect();

    let mut cancel = Vec::new();
    let mut refund = Vec::new();
    for id in &event.reservation_ids {
        let reservation = by_id
            .get(id)
            .ok_or_else(|| AppError::EntityNotFound(format!("reservation {id} not found")))?;
        if reservation.user_id != event.user_id {
            return Err(AppError::Forbidden);
        }
        match reservation.status {
            ReservationStatus::Cancelled => continue,
            ReservationStatus::Completed => {
                return Err(AppError::InvalidState(format!(
                    "reservation {id} is already completed"
                )))
            }
            ReservationStatus::Pending | ReservationStatus::Confirmed => {
                if cancel.contains(id) {
                    continue;
                }
                cancel.push(*id);
                if reservation.is_paid {
                    refund.push(*id);
                }
            }
        }
    }

    let released = cancel.len() as u64;
    Ok(ReleasePlan {
        cancel,
        refund,
        released,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        id::{ScheduleId, UserId},
        payment::PaymentMethod,
        reservation::event::PaymentIntent,
        role::Role,
    };
    use chrono::{NaiveTime, TimeZone, Utc, Weekday};

    fn monday_schedule(capacity: i32) -> Schedule {
        Schedule {
            id: ScheduleId::new(),
            weekday: Weekday::Mon,
            starts_at: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            max_capacity: capacity,
            lane_count: 2,
            is_active: true,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn booked(
        schedule: &Schedule,
        user_id: UserId,
        date: NaiveDate,
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            user_id,
            schedule_id: schedule.id,
            date,
            status,
            is_paid: false,
            amount: 1500,
            payment_method: None,
            refund_pending: false,
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn batch(schedule: &Schedule, user_id: UserId, dates: Vec<NaiveDate>) -> BookBatch {
        BookBatch::new(user_id, schedule.id, dates, Role::Member, None, now())
    }

    // Mondays in March 2026: 2, 9, 16, 23, 30.

    #[test]
    fn plans_rows_in_input_date_order() {
        let s = monday_schedule(2);
        let user = UserId::new();
        let plan = plan_batch(&s, &batch(&s, user, vec![day(16), day(2), day(9)]), &[], 7).unwrap();
        assert_eq!(plan.status, ReservationStatus::Pending);
        let dates: Vec<_> = plan.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(16), day(2), day(9)]);
    }

    #[test]
    fn synchronous_payment_confirms_immediately() {
        let s = monday_schedule(2);
        let user = UserId::new();
        let mut event = batch(&s, user, vec![day(2)]);
        event.payment = Some(PaymentIntent::new(PaymentMethod::Card, None));
        let plan = plan_batch(&s, &event, &[], 7).unwrap();
        assert_eq!(plan.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn rejects_dates_already_booked_by_the_same_user() {
        let s = monday_schedule(3);
        let user = UserId::new();
        let existing = vec![booked(&s, user, day(2), ReservationStatus::Pending)];
        let err = plan_batch(&s, &batch(&s, user, vec![day(2), day(9)]), &existing, 7)
            .unwrap_err();
        match err {
            AppError::DuplicateBooking(dates) => assert_eq!(dates, vec![day(2)]),
            other => panic!("expected DuplicateBooking, got {other:?}"),
        }
    }

    #[test]
    fn cancelled_booking_does_not_block_rebooking() {
        let s = monday_schedule(1);
        let user = UserId::new();
        let existing = vec![booked(&s, user, day(2), ReservationStatus::Cancelled)];
        plan_batch(&s, &batch(&s, user, vec![day(2)]), &existing, 7).unwrap();
    }

    #[test]
    fn whole_batch_fails_when_any_date_is_full() {
        let s = monday_schedule(1);
        let stranger = UserId::new();
        let existing = vec![booked(&s, stranger, day(9), ReservationStatus::Confirmed)];
        let err = plan_batch(
            &s,
            &batch(&s, UserId::new(), vec![day(2), day(9)]),
            &existing,
            7,
        )
        .unwrap_err();
        match err {
            AppError::SlotFull(dates) => assert_eq!(dates, vec![day(9)]),
            other => panic!("expected SlotFull, got {other:?}"),
        }
    }

    #[test]
    fn inactive_schedule_is_rejected() {
        let mut s = monday_schedule(2);
        s.is_active = false;
        let err = plan_batch(&s, &batch(&s, UserId::new(), vec![day(2)]), &[], 7).unwrap_err();
        assert!(matches!(err, AppError::InvalidScheduleState(_)));
    }

    #[test]
    fn weekday_mismatch_is_rejected() {
        let s = monday_schedule(2);
        // 2026-03-03 is a Tuesday.
        let err = plan_batch(&s, &batch(&s, UserId::new(), vec![day(3)]), &[], 7).unwrap_err();
        assert!(matches!(err, AppError::InvalidScheduleState(_)));
    }

    #[test]
    fn release_requires_ownership() {
        let s = monday_schedule(2);
        let owner = UserId::new();
        let reservation = booked(&s, owner, day(2), ReservationStatus::Confirmed);
        let event = ReleaseBatch::new(UserId::new(), vec![reservation.id]);
        assert!(matches!(
            plan_release(&event, &[reservation]),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn release_of_completed_reservation_is_illegal() {
        let s = monday_schedule(2);
        let owner = UserId::new();
        let reservation = booked(&s, owner, day(2), ReservationStatus::Completed);
        let event = ReleaseBatch::new(owner, vec![reservation.id]);
        assert!(matches!(
            plan_release(&event, &[reservation]),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn rerelease_is_a_counted_noop() {
        let s = monday_schedule(2);
        let owner = UserId::new();
        let mut reservation = booked(&s, owner, day(2), ReservationStatus::Confirmed);
        let event = ReleaseBatch::new(owner, vec![reservation.id]);

        let first = plan_release(&event, std::slice::from_ref(&reservation)).unwrap();
        assert_eq!(first.released, 1);
        assert_eq!(first.cancel, vec![reservation.id]);

        // Second attempt against the already-cancelled row: no error, no work.
        reservation.status = ReservationStatus::Cancelled;
        let second = plan_release(&event, &[reservation]).unwrap();
        assert_eq!(second.released, 0);
        assert!(second.cancel.is_empty());
    }

    #[test]
    fn paid_reservations_are_flagged_for_refund() {
        let s = monday_schedule(2);
        let owner = UserId::new();
        let mut paid = booked(&s, owner, day(2), ReservationStatus::Confirmed);
        paid.is_paid = true;
        let unpaid = booked(&s, owner, day(9), ReservationStatus::Pending);
        let event = ReleaseBatch::new(owner, vec![paid.id, unpaid.id]);

        let plan = plan_release(&event, &[paid.clone(), unpaid]).unwrap();
        assert_eq!(plan.released, 2);
        assert_eq!(plan.refund, vec![paid.id]);
    }

    #[test]
    fn unknown_reservation_id_is_not_found() {
        let event = ReleaseBatch::new(UserId::new(), vec![ReservationId::new()]);
        assert!(matches!(
            plan_release(&event, &[]),
            Err(AppError::EntityNotFound(_))
        ));
    }
}
