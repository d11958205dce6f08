use crate::model::{
    calendar::MonthYear,
    id::{ReservationId, ScheduleId, UserId},
    reservation::{
        event::{BookBatch, ReleaseBatch},
        Reservation,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

/// The booking ledger. The implementation is the only writer of
/// reservation rows and must run each batch inside a single atomic
/// transaction: capacity is re-read at write time, never trusted from a
/// prior read.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Creates one reservation per date, all-or-nothing, returning ids in
    /// input date order.
    async fn book_batch(&self, event: BookBatch) -> AppResult<Vec<ReservationId>>;

    /// Cancels the caller's reservations, returning the count actually
    /// released. Re-releasing an already-cancelled id is a no-op.
    async fn release_batch(&self, event: ReleaseBatch) -> AppResult<u64>;

    /// Non-cancelled reservations for a schedule across a month.
    async fn find_for_schedule_in_month(
        &self,
        schedule_id: ScheduleId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>>;

    async fn find_by_user_in_month(
        &self,
        user_id: UserId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>>;

    /// Cancelled-but-paid reservations whose refund has not been executed
    /// yet. Refund execution itself belongs to an external collaborator.
    async fn count_pending_refunds(&self, user_id: UserId) -> AppResult<i64>;
}
