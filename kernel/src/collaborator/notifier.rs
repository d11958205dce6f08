use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use shared::error::AppResult;

#[derive(Debug, Clone, new)]
pub struct BookingNotice {
    pub email: String,
    pub schedule_label: String,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, new)]
pub struct ReleaseNotice {
    pub email: String,
    pub released: u64,
}

/// Outbound user notification. Fire-and-forget from the ledger's point of
/// view: a delivery failure must never roll back a booking.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_confirmed(&self, notice: &BookingNotice) -> AppResult<()>;
    async fn booking_released(&self, notice: &ReleaseNotice) -> AppResult<()>;
}
