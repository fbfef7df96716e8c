use log::*;
use serde::Serialize;

use crate::{
    db_types::{DiscountCode, MarketingCampaign, NewCampaign, NewDiscountCode},
    traits::{MarketingManagement, StorefrontApiError},
};

/// The result of checking a discount code, in the shape the storefront renders.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedDiscount {
    pub valid: bool,
    pub code: String,
    pub percent: i64,
    pub discount_type: String,
    pub description: Option<String>,
}

impl VerifiedDiscount {
    pub fn from_campaign(campaign: &MarketingCampaign) -> Self {
        Self {
            valid: true,
            code: campaign.code.clone(),
            percent: campaign.percent,
            discount_type: "campaign".to_string(),
            description: campaign.description.clone(),
        }
    }
}

/// Discount verification, campaign management and the newsletter list.
pub struct MarketingApi<B> {
    db: B,
}

impl<B: Clone> Clone for MarketingApi<B> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone() }
    }
}

impl<B> MarketingApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> MarketingApi<B>
where B: MarketingManagement
{
    /// Check a discount code against live campaigns first, then standalone codes.
    ///
    /// The code is normalized (trimmed, lowercased) before lookup. A campaign match never
    /// touches usage counters; a standalone code match increments its counter. Returns `None`
    /// when the code matches nothing that is currently active.
    pub async fn verify_code(&self, code: &str) -> Result<Option<VerifiedDiscount>, StorefrontApiError> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return Ok(None);
        }
        if let Some(campaign) = self.db.fetch_campaign_by_code(&code).await? {
            if campaign.is_live(chrono::Utc::now()) {
                debug!("🏷️ Code [{code}] matched live campaign [{}]", campaign.name);
                return Ok(Some(VerifiedDiscount::from_campaign(&campaign)));
            }
            debug!("🏷️ Code [{code}] matched campaign [{}], but it is not live", campaign.name);
        }
        match self.db.fetch_discount_code(&code).await? {
            Some(discount) => {
                self.db.increment_code_usage(discount.id).await?;
                debug!("🏷️ Code [{code}] matched standalone discount ({}%)", discount.percent);
                Ok(Some(VerifiedDiscount {
                    valid: true,
                    code: discount.code,
                    percent: discount.percent,
                    discount_type: "code".to_string(),
                    description: discount.description,
                }))
            },
            None => {
                debug!("🏷️ Code [{code}] did not match any active discount");
                Ok(None)
            },
        }
    }

    /// The currently live campaign banner, if any.
    pub async fn active_campaign(&self) -> Result<Option<MarketingCampaign>, StorefrontApiError> {
        let campaign = self.db.fetch_active_campaign().await?;
        Ok(campaign.filter(|c| c.is_live(chrono::Utc::now())))
    }

    pub async fn upsert_campaign(&self, mut campaign: NewCampaign) -> Result<MarketingCampaign, StorefrontApiError> {
        campaign.code = campaign.code.trim().to_lowercase();
        let campaign = self.db.upsert_campaign(campaign).await?;
        info!("🏷️ Campaign [{}] saved with code [{}]", campaign.name, campaign.code);
        Ok(campaign)
    }

    /// Save a standalone discount code. The code is normalized the same way [`Self::verify_code`] normalizes
    /// submissions, so a code saved here always verifies.
    pub async fn upsert_discount_code(&self, mut code: NewDiscountCode) -> Result<DiscountCode, StorefrontApiError> {
        code.code = code.code.trim().to_lowercase();
        let discount = self.db.upsert_discount_code(code).await?;
        info!("🏷️ Discount code [{}] saved ({}%)", discount.code, discount.percent);
        Ok(discount)
    }

    /// Returns `false` if the address was already on the list.
    pub async fn subscribe_email(&self, email: &str) -> Result<bool, StorefrontApiError> {
        let email = email.trim().to_lowercase();
        let fresh = self.db.subscribe_email(&email).await?;
        if fresh {
            info!("🏷️ New newsletter subscriber");
        }
        Ok(fresh)
    }
}
