//! End-to-end product scraping: normalize, fetch, extract, affiliate.

use chrono::Utc;

use legione_core::AppConfig;

use crate::affiliate::apply_affiliate_tag;
use crate::asin::{canonical_url, extract_asin, is_short_link};
use crate::error::ScraperError;
use crate::extract::extract_product_page;
use crate::fetch::PageFetcher;
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Sleeper, TokioSleeper, Transport};
use crate::types::{ProductRecord, ResolvedProduct};
use crate::user_agent;

/// Everything the scraper needs, built once at startup and passed in.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Empty disables tagging.
    pub affiliate_tag: String,
    /// Marketplace origin for canonical links, e.g. `https://www.amazon.it`.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub retry: RetryPolicy,
    pub user_agents: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            affiliate_tag: String::new(),
            base_url: "https://www.amazon.it".to_owned(),
            request_timeout_secs: 15,
            retry: RetryPolicy::default(),
            user_agents: user_agent::default_pool(),
        }
    }
}

impl ScraperConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            affiliate_tag: config.affiliate_tag.clone(),
            base_url: config.amazon_base_url.clone(),
            request_timeout_secs: config.scraper_request_timeout_secs,
            retry: RetryPolicy::from_app_config(config),
            user_agents: user_agent::default_pool(),
        }
    }
}

/// Turns a pasted Amazon link into a [`ProductRecord`].
///
/// Holds no mutable state; one instance can serve concurrent scrapes.
#[derive(Debug, Clone)]
pub struct AmazonScraper<T = HttpTransport, S = TokioSleeper> {
    fetcher: PageFetcher<T, S>,
    affiliate_tag: String,
    base_url: String,
}

impl AmazonScraper {
    /// Creates a scraper backed by `reqwest` and `tokio` sleeps.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let transport = HttpTransport::new(config.request_timeout_secs)?;
        Ok(Self::with_transport(config, transport, TokioSleeper))
    }
}

impl<T: Transport, S: Sleeper> AmazonScraper<T, S> {
    #[must_use]
    pub fn with_transport(config: ScraperConfig, transport: T, sleeper: S) -> Self {
        Self {
            fetcher: PageFetcher::new(transport, sleeper, config.retry, config.user_agents),
            affiliate_tag: config.affiliate_tag,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn fetcher(&self) -> &PageFetcher<T, S> {
        &self.fetcher
    }

    /// Resolves `input` to an ASIN and canonical link.
    ///
    /// Short links are followed with a single redirect-following GET; that
    /// request is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NotFound`] when short-link resolution fails at
    /// the network level or no ASIN can be read from the (resolved) URL.
    pub async fn resolve(&self, input: &str) -> Result<ResolvedProduct, ScraperError> {
        let input = input.trim();
        let not_found = || ScraperError::NotFound {
            input: input.to_owned(),
        };

        let (resolved_url, short_link) = if is_short_link(input) {
            let target = with_scheme(input);
            let user_agent = user_agent::pick(self.fetcher.user_agents());
            match self.fetcher.transport().get(&target, user_agent).await {
                Ok(response) => {
                    tracing::info!(
                        short_link = input,
                        final_url = %response.final_url,
                        status = response.status,
                        "resolved short link"
                    );
                    (response.final_url, Some(input.to_owned()))
                }
                Err(e) => {
                    tracing::warn!(short_link = input, error = %e, "short link resolution failed");
                    return Err(not_found());
                }
            }
        } else {
            (input.to_owned(), None)
        };

        let Some(asin) = extract_asin(&resolved_url) else {
            tracing::warn!(input, resolved_url = %resolved_url, "no ASIN in URL");
            return Err(not_found());
        };

        Ok(ResolvedProduct {
            canonical_url: canonical_url(&self.base_url, &asin),
            asin,
            resolved_url,
            short_link,
        })
    }

    /// Runs the whole pipeline for one input link.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: no ASIN could be derived.
    /// - [`ScraperError::FetchFailed`]: the product page could not be retrieved.
    /// - [`ScraperError::ParseFailed`]: the page had no product title.
    pub async fn scrape(&self, input: &str) -> Result<ProductRecord, ScraperError> {
        let resolved = self.resolve(input).await?;
        let html = self.fetcher.fetch(&resolved.canonical_url).await?;
        let fields = extract_product_page(&resolved.canonical_url, &html)?;
        let affiliate_link = self.affiliate_link_for(&resolved);

        tracing::info!(
            asin = %resolved.asin,
            has_price = fields.current_price.is_some(),
            has_previous_price = fields.previous_price.is_some(),
            has_image = fields.image_url.is_some(),
            "scraped product"
        );

        Ok(ProductRecord {
            asin: resolved.asin,
            title: fields.title,
            current_price: fields.current_price,
            previous_price: fields.previous_price,
            image_url: fields.image_url,
            canonical_link: resolved.canonical_url,
            affiliate_link,
            scraped_at: Utc::now(),
        })
    }

    /// The outbound link for a resolved product: the original short link when
    /// there was one, otherwise the tagged canonical link.
    #[must_use]
    pub fn affiliate_link_for(&self, resolved: &ResolvedProduct) -> String {
        match &resolved.short_link {
            Some(short) => short.clone(),
            None => apply_affiliate_tag(&resolved.canonical_url, &self.affiliate_tag),
        }
    }

    /// Builds the outbound link without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NotFound`] when `input` is neither a short
    /// link nor a URL containing an ASIN.
    pub fn affiliate_link(&self, input: &str) -> Result<String, ScraperError> {
        let input = input.trim();
        if is_short_link(input) {
            return Ok(input.to_owned());
        }
        let asin = extract_asin(input).ok_or_else(|| ScraperError::NotFound {
            input: input.to_owned(),
        })?;
        Ok(apply_affiliate_tag(
            &canonical_url(&self.base_url, &asin),
            &self.affiliate_tag,
        ))
    }
}

fn with_scheme(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_owned()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
