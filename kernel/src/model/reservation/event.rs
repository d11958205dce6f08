use crate::model::{
    calendar::{booking_window_open, MonthYear},
    id::{ReservationId, ScheduleId, UserId},
    payment::PaymentMethod,
    role::Role,
};
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::collections::HashSet;

/// A batch booking request. `now` is injected by the caller so the window
/// gating stays deterministic under test.
#[derive(Debug, new)]
pub struct BookBatch {
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub dates: Vec<NaiveDate>,
    pub role: Role,
    pub payment: Option<PaymentIntent>,
    pub now: DateTime<Utc>,
}

impl BookBatch {
    /// Shape-level validation that never touches persistence: the batch
    /// must be non-empty, free of duplicates, not in the past, and every
    /// date must fall inside an open booking window.
    pub fn validate(&self, window_open_days: u32) -> AppResult<()> {
        if self.dates.is_empty() {
            return Err(AppError::InvalidRequest("dates must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for date in &self.dates {
            if !seen.insert(date) {
                return Err(AppError::InvalidRequest(format!(
                    "duplicate date in batch: {date}"
                )));
            }
        }
        let today = self.now.date_naive();
        for &date in &self.dates {
            if date < today {
                return Err(AppError::InvalidRequest(format!(
                    "{date} is in the past"
                )));
            }
            if !booking_window_open(MonthYear::of(date), today, window_open_days) {
                return Err(AppError::BookingWindowClosed);
            }
        }
        Ok(())
    }
}

/// Payment collected synchronously with the booking. When present the
/// reservations are created CONFIRMED and a payment record is written in
/// the same transaction.
#[derive(Debug, Clone, new)]
pub struct PaymentIntent {
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

#[derive(Debug, new)]
pub struct ReleaseBatch {
    pub user_id: UserId,
    pub reservation_ids: Vec<ReservationId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn batch(dates: Vec<NaiveDate>, now: DateTime<Utc>) -> BookBatch {
        BookBatch::new(
            UserId::new(),
            ScheduleId::new(),
            dates,
            Role::Member,
            None,
            now,
        )
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = batch(vec![], at(2026, 3, 1)).validate(7).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn duplicate_date_is_rejected_before_persistence() {
        let err = batch(vec![day(2026, 3, 2), day(2026, 3, 2)], at(2026, 3, 1))
            .validate(7)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn past_date_is_rejected() {
        let err = batch(vec![day(2026, 3, 1)], at(2026, 3, 2))
            .validate(7)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn current_month_is_always_bookable() {
        batch(vec![day(2026, 3, 2), day(2026, 3, 9)], at(2026, 3, 1))
            .validate(7)
            .unwrap();
    }

    #[test]
    fn next_month_closed_until_window_opens() {
        // 2026-03-10: 21 days left in March, window of 7 not yet open.
        let err = batch(vec![day(2026, 4, 6)], at(2026, 3, 10))
            .validate(7)
            .unwrap_err();
        assert!(matches!(err, AppError::BookingWindowClosed));

        // 2026-03-27: 4 days left, window open.
        batch(vec![day(2026, 4, 6)], at(2026, 3, 27))
            .validate(7)
            .unwrap();
    }
}
