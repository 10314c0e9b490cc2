pub mod affiliate;
pub mod asin;
pub mod client;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod post;
pub mod retry;
mod selectors;
#[cfg(test)]
mod test_support;
pub mod transport;
pub mod types;
pub mod user_agent;

pub use affiliate::{apply_affiliate_tag, discount_percent};
pub use asin::{extract_asin, find_product_link, is_short_link};
pub use client::{AmazonScraper, ScraperConfig};
pub use error::{ScraperError, TransportError};
pub use extract::{extract_product_page, PageFields};
pub use fetch::PageFetcher;
pub use post::format_post;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, RawResponse, Sleeper, TokioSleeper, Transport};
pub use types::{ProductRecord, ResolvedProduct};
