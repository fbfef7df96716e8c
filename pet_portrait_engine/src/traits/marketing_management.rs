use crate::{
    db_types::{DiscountCode, MarketingCampaign, NewCampaign, NewDiscountCode},
    traits::StorefrontApiError,
};

/// Discount codes, marketing campaigns and the newsletter list.
#[allow(async_fn_in_trait)]
pub trait MarketingManagement: Clone {
    /// The currently live campaign, if any. When several are live the most recently created wins.
    async fn fetch_active_campaign(&self) -> Result<Option<MarketingCampaign>, StorefrontApiError>;

    /// An active campaign matching the (already normalized) code, or `None`.
    async fn fetch_campaign_by_code(&self, code: &str) -> Result<Option<MarketingCampaign>, StorefrontApiError>;

    /// An active standalone discount code matching the (already normalized) code, or `None`.
    async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, StorefrontApiError>;

    /// Bump the usage counter for a standalone discount code. Informational only; no cap is enforced.
    async fn increment_code_usage(&self, code_id: i64) -> Result<(), StorefrontApiError>;

    /// Create a campaign, or update the existing one with the same code.
    async fn upsert_campaign(&self, campaign: NewCampaign) -> Result<MarketingCampaign, StorefrontApiError>;

    /// Create a standalone discount code, or update the existing one with the same code.
    async fn upsert_discount_code(&self, code: NewDiscountCode) -> Result<DiscountCode, StorefrontApiError>;

    /// Add an email to the newsletter list. Returns `false` if it was already subscribed.
    async fn subscribe_email(&self, email: &str) -> Result<bool, StorefrontApiError>;
}
