use crate::database::{
    model::{reservation::ReservationRow, schedule::ScheduleRow},
    set_transaction_serializable, ConnectionPool,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::collaborator::pricing::PriceTable;
use kernel::ledger::{plan_batch, plan_release};
use kernel::model::{
    calendar::MonthYear,
    id::{PaymentId, ReservationId, ScheduleId, UserId},
    payment::PaymentRecord,
    reservation::{
        event::{BookBatch, ReleaseBatch},
        Reservation,
    },
    schedule::Schedule,
};
use kernel::repository::reservation::ReservationRepository;
use shared::config::BookingConfig;
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

// Bounded internal retry for SERIALIZABLE aborts before the conflict is
// surfaced to the caller as retryable.
const MAX_TX_RETRIES: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(25);

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
    prices: Arc<dyn PriceTable>,
    booking: BookingConfig,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn book_batch(&self, event: BookBatch) -> AppResult<Vec<ReservationId>> {
        // Shape checks fail before any connection is taken.
        event.validate(self.booking.window_open_days)?;
        let amount = self.prices.price_per_session(event.role).await?;

        let mut attempts = 0;
        loop {
            match self.try_book(&event, amount).await {
                Err(e) if e.is_retryable() && attempts < MAX_TX_RETRIES => {
                    attempts += 1;
                    tracing::debug!(attempts, "booking transaction aborted, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempts).await;
                }
                other => return other,
            }
        }
    }

    async fn release_batch(&self, event: ReleaseBatch) -> AppResult<u64> {
        let mut attempts = 0;
        loop {
            match self.try_release(&event).await {
                Err(e) if e.is_retryable() && attempts < MAX_TX_RETRIES => {
                    attempts += 1;
                    tracing::debug!(attempts, "release transaction aborted, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempts).await;
                }
                other => return other,
            }
        }
    }

    async fn find_for_schedule_in_month(
        &self,
        schedule_id: ScheduleId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, user_id, schedule_id, reserved_on, status,
                       is_paid, amount, payment_method, refund_pending, notes,
                       created_at, updated_at
                FROM reservations
                WHERE schedule_id = $1
                  AND reserved_on BETWEEN $2 AND $3
                  AND status <> 'CANCELLED'
                ORDER BY reserved_on
            "#,
        )
        .bind(schedule_id)
        .bind(month.first_day())
        .bind(month.last_day())
        .fetch_all(self.db.inner_ref())
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_by_user_in_month(
        &self,
        user_id: UserId,
        month: MonthYear,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, user_id, schedule_id, reserved_on, status,
                       is_paid, amount, payment_method, refund_pending, notes,
                       created_at, updated_at
                FROM reservations
                WHERE user_id = $1
                  AND reserved_on BETWEEN $2 AND $3
                ORDER BY reserved_on
            "#,
        )
        .bind(user_id)
        .bind(month.first_day())
        .bind(month.last_day())
        .fetch_all(self.db.inner_ref())
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn count_pending_refunds(&self, user_id: UserId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM reservations
                WHERE user_id = $1 AND refund_pending
            "#,
        )
        .bind(user_id)
        .fetch_one(self.db.inner_ref())
        .await?;

        Ok(count)
    }
}

impl ReservationRepositoryImpl {
    /// One booking attempt. Occupancy is re-read inside the SERIALIZABLE
    /// transaction; the kernel ledger decides what to write, and either
    /// every row commits or none does.
    async fn try_book(&self, event: &BookBatch, amount: i64) -> AppResult<Vec<ReservationId>> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let schedule_row: Option<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, weekday, starts_at, ends_at,
                       max_capacity, lane_count, is_active
                FROM schedules
                WHERE schedule_id = $1
            "#,
        )
        .bind(event.schedule_id)
        .fetch_optional(&mut *tx)
        .await?;
        let schedule = schedule_row
            .map(Schedule::try_from)
            .transpose()?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("schedule {} not found", event.schedule_id))
            })?;

        let existing: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, user_id, schedule_id, reserved_on, status,
                       is_paid, amount, payment_method, refund_pending, notes,
                       created_at, updated_at
                FROM reservations
                WHERE schedule_id = $1
                  AND reserved_on = ANY($2)
                  AND status <> 'CANCELLED'
            "#,
        )
        .bind(event.schedule_id)
        .bind(&event.dates)
        .fetch_all(&mut *tx)
        .await?;
        let existing: Vec<Reservation> = existing.into_iter().map(Reservation::from).collect();

        let plan = plan_batch(&schedule, event, &existing, self.booking.window_open_days)?;

        let paid = event.payment.is_some();
        let method = event.payment.as_ref().map(|p| p.method);
        let paid_on: NaiveDate = event.now.date_naive();
        for row in &plan.rows {
            let res = sqlx::query(
                r#"
                    INSERT INTO reservations
                    (reservation_id, user_id, schedule_id, reserved_on, status,
                     is_paid, amount, payment_method, refund_pending)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
                "#,
            )
            .bind(row.id)
            .bind(event.user_id)
            .bind(event.schedule_id)
            .bind(row.date)
            .bind(plan.status)
            .bind(paid)
            .bind(amount)
            .bind(method)
            .execute(&mut *tx)
            .await?;
            if res.rows_affected() < 1 {
                return Err(AppError::Unavailable(sqlx::Error::RowNotFound));
            }

            if let Some(payment) = &event.payment {
                let record = PaymentRecord {
                    id: PaymentId::new(),
                    reservation_id: row.id,
                    amount,
                    method: payment.method,
                    paid_on,
                    notes: payment.notes.clone(),
                    created_at: event.now,
                };
                sqlx::query(
                    r#"
                        INSERT INTO payment_records
                        (payment_id, reservation_id, amount, method, paid_on, notes, created_at)
                        VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(record.id)
                .bind(record.reservation_id)
                .bind(record.amount)
                .bind(record.method)
                .bind(record.paid_on)
                .bind(record.notes)
                .bind(record.created_at)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(plan.rows.into_iter().map(|r| r.id).collect())
    }

    async fn try_release(&self, event: &ReleaseBatch) -> AppResult<u64> {
        if event.reservation_ids.is_empty() {
            return Err(AppError::InvalidRequest(
                "reservation ids must not be empty".into(),
            ));
        }

        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let current: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, user_id, schedule_id, reserved_on, status,
                       is_paid, amount, payment_method, refund_pending, notes,
                       created_at, updated_at
                FROM reservations
                WHERE reservation_id = ANY($1)
            "#,
        )
        .bind(&event.reservation_ids)
        .fetch_all(&mut *tx)
        .await?;
        let current: Vec<Reservation> = current.into_iter().map(Reservation::from).collect();

        let plan = plan_release(event, &current)?;

        if !plan.cancel.is_empty() {
            // The ledger decides which cancelled rows owe a refund; execution
            // of the refund is an external concern.
            let res = sqlx::query(
                r#"
                    UPDATE reservations
                    SET status = 'CANCELLED',
                        refund_pending = (reservation_id = ANY($2)),
                        updated_at = CURRENT_TIMESTAMP
                    WHERE reservation_id = ANY($1)
                "#,
            )
            .bind(&plan.cancel)
            .bind(&plan.refund)
            .execute(&mut *tx)
            .await?;
            if res.rows_affected() != plan.cancel.len() as u64 {
                return Err(AppError::Conflict);
            }
        }

        tx.commit().await?;

        Ok(plan.released)
    }
}
