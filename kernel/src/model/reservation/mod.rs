use crate::model::{
    id::{ReservationId, ScheduleId, UserId},
    payment::PaymentMethod,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod event;

/// One booked occurrence of a schedule on a calendar date. Rows are never
/// deleted; cancellation is a status transition so the audit trail stays
/// intact.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub status: ReservationStatus,
    pub is_paid: bool,
    pub amount: i64,
    pub payment_method: Option<PaymentMethod>,
    pub refund_pending: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "UPPERCASE")]
#[sqlx(type_name = "reservation_status", rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this status holds a spot in its slot.
    pub fn occupies_slot(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }

    /// Legal transitions: PENDING -> CONFIRMED -> COMPLETED, and either of
    /// the first two may be cancelled. Terminal states never move.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ReservationStatus::*;

    #[test]
    fn cancelled_frees_the_slot() {
        assert!(Pending.occupies_slot());
        assert!(Confirmed.occupies_slot());
        assert!(Completed.occupies_slot());
        assert!(!Cancelled.occupies_slot());
    }

    #[test]
    fn terminal_states_never_move() {
        for next in [Pending, Confirmed, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn pending_and_confirmed_may_be_cancelled() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
    }
}
