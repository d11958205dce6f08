use async_trait::async_trait;
use derive_new::new;
use kernel::collaborator::pricing::PriceTable;
use kernel::model::role::Role;
use shared::config::PricingConfig;
use shared::error::AppResult;

/// Price table backed by static configuration.
#[derive(new)]
pub struct ConfigPriceTable {
    pricing: PricingConfig,
}

#[async_trait]
impl PriceTable for ConfigPriceTable {
    async fn price_per_session(&self, role: Role) -> AppResult<i64> {
        Ok(if role.is_member() {
            self.pricing.member_price
        } else {
            self.pricing.visitor_price
        })
    }
}
