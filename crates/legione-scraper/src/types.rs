use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affiliate::discount_percent;

/// Output of the URL normalizer: a product identifier plus its canonical link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProduct {
    /// 10-character uppercase alphanumeric Amazon identifier.
    pub asin: String,
    /// `{base}/dp/{asin}` without tracking parameters.
    pub canonical_url: String,
    /// The URL the ASIN was extracted from (the redirect target for short links).
    pub resolved_url: String,
    /// The original input when it was a shortened link (`amzn.to`, `amzn.eu`, `a.co`).
    pub short_link: Option<String>,
}

/// A scraped product, created fresh per scrape call and never cached.
///
/// A record always carries an ASIN and a non-empty title: pages without a
/// title surface as [`crate::ScraperError::ParseFailed`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub asin: String,
    pub title: String,
    pub current_price: Option<Decimal>,
    /// List ("strikethrough") price; implies a discount when above `current_price`.
    pub previous_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub canonical_link: String,
    pub affiliate_link: String,
    pub scraped_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Rounded discount in percent, `0` when no meaningful discount exists.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.current_price, self.previous_price)
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percent() > 0
    }
}
