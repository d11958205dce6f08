use crate::model::role::Role;
use async_trait::async_trait;
use shared::error::AppResult;

/// Supplies the per-session price for a membership status. External
/// configuration, not derived logic.
#[async_trait]
pub trait PriceTable: Send + Sync {
    async fn price_per_session(&self, role: Role) -> AppResult<i64>;
}
