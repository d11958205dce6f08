use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    id::{ReservationId, ScheduleId, UserId},
    payment::PaymentMethod,
    reservation::{Reservation, ReservationStatus},
};

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub schedule_id: ScheduleId,
    pub reserved_on: NaiveDate,
    pub status: ReservationStatus,
    pub is_paid: bool,
    pub amount: i64,
    pub payment_method: Option<PaymentMethod>,
    pub refund_pending: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            reservation_id,
            user_id,
            schedule_id,
            reserved_on,
            status,
            is_paid,
            amount,
            payment_method,
            refund_pending,
            notes,
            created_at,
            updated_at,
        } = value;
        Reservation {
            id: reservation_id,
            user_id,
            schedule_id,
            date: reserved_on,
            status,
            is_paid,
            amount,
            payment_method,
            refund_pending,
            notes,
            created_at,
            updated_at,
        }
    }
}
