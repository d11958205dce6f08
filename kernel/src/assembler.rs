//! Read-only composition of a month's calendar for one user. Snapshots may
//! be stale by the time they reach the caller; the booking ledger always
//! re-validates capacity at write time.

use crate::{
    collaborator::pricing::PriceTable,
    model::{
        calendar::{booking_window_open, dates_in_month, MonthYear},
        capacity::compute_state,
        context::{DayEntry, DayStatus, MonthContext, Pricing},
        id::UserId,
        role::Role,
    },
    repository::{reservation::ReservationRepository, schedule::ScheduleRepository},
};
use chrono::NaiveDate;
use derive_new::new;
use shared::error::AppResult;
use std::sync::Arc;

#[derive(new)]
pub struct ContextAssembler {
    schedules: Arc<dyn ScheduleRepository>,
    reservations: Arc<dyn ReservationRepository>,
    prices: Arc<dyn PriceTable>,
    window_open_days: u32,
    month_range: u32,
}

impl ContextAssembler {
    pub async fn assemble(
        &self,
        user_id: UserId,
        role: Role,
        month: MonthYear,
        today: NaiveDate,
    ) -> AppResult<MonthContext> {
        month.ensure_in_range(today, self.month_range)?;

        let mut days = Vec::new();
        for schedule in self.schedules.find_active().await? {
            let existing = self
                .reservations
                .find_for_schedule_in_month(schedule.id, month)
                .await?;
            for date in dates_in_month(&schedule, month) {
                let state = compute_state(&schedule, date, &existing);
                let mine = existing.iter().any(|r| {
                    r.date == date && r.user_id == user_id && r.status.occupies_slot()
                });
                let status = if mine {
                    DayStatus::Reserved
                } else if state.is_full {
                    DayStatus::Full
                } else {
                    DayStatus::Open
                };
                days.push(DayEntry { state, status });
            }
        }
        days.sort_by_key(|entry| (entry.state.date, entry.state.schedule_id));

        let pricing = Pricing {
            member: self.prices.price_per_session(Role::Member).await?,
            visitor: self.prices.price_per_session(Role::Visitor).await?,
        };
        let price_per_session = self.prices.price_per_session(role).await?;
        let pending_refunds = self.reservations.count_pending_refunds(user_id).await?;
        let can_reserve_next_month =
            booking_window_open(MonthYear::of(today).next(), today, self.window_open_days);

        Ok(MonthContext {
            month,
            days,
            price_per_session,
            pricing,
            can_reserve_next_month,
            pending_refunds,
        })
    }
}
