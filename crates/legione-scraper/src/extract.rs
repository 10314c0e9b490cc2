//! Product field extraction from Amazon product page HTML.
//!
//! Only the title is mandatory. Prices and image are best-effort: a missing or
//! malformed value leaves the field unset instead of failing the page.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html};

use crate::error::ScraperError;
use crate::selectors;

static DYNAMIC_IMAGE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(https?://[^"]+)""#).expect("valid image url regex"));

/// Number of leading HTML characters logged when the title is missing.
const DEBUG_SNIPPET_CHARS: usize = 1000;

/// Fields read from a product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub current_price: Option<Decimal>,
    pub previous_price: Option<Decimal>,
    pub image_url: Option<String>,
}

/// Parses a product page.
///
/// # Errors
///
/// Returns [`ScraperError::ParseFailed`] when the page has no (or an empty)
/// `#productTitle`, which usually means Amazon served a CAPTCHA interstitial.
pub fn extract_product_page(url: &str, html: &str) -> Result<PageFields, ScraperError> {
    let document = Html::parse_document(html);

    let Some(title) = extract_title(&document) else {
        let captcha = document.select(&selectors::CAPTCHA_FORM).next().is_some();
        let reason = if captcha {
            "CAPTCHA interstitial served instead of the product page"
        } else {
            "productTitle element not found"
        };
        tracing::error!(url, captcha, "scrape failed: product title missing");
        tracing::debug!(
            url,
            snippet = %html.chars().take(DEBUG_SNIPPET_CHARS).collect::<String>(),
            "leading page HTML"
        );
        return Err(ScraperError::ParseFailed {
            url: url.to_owned(),
            reason: reason.to_owned(),
        });
    };

    let current_price = extract_current_price(url, &document);
    let previous_price = extract_previous_price(url, &document);
    let image_url = extract_image_url(&document);
    if image_url.is_none() {
        tracing::warn!(url, "product image not found");
    }

    Ok(PageFields {
        title,
        current_price,
        previous_price,
        image_url,
    })
}

fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&selectors::TITLE)
        .next()
        .map(|el| collapse_whitespace(&element_text(el)))
        .filter(|title| !title.is_empty())
}

/// Reads the first price whose whole part is directly followed by its own
/// fraction element. Whole and fraction are never paired across blocks.
fn extract_current_price(url: &str, document: &Html) -> Option<Decimal> {
    let Some((whole_digits, fraction_digits)) = document
        .select(&selectors::PRICE_WHOLE)
        .filter_map(|whole| {
            let fraction = adjacent_fraction(whole)?;
            let whole_digits = digits_only(&element_text(whole));
            (!whole_digits.is_empty())
                .then(|| (whole_digits, digits_only(&element_text(fraction))))
        })
        .next()
    else {
        tracing::warn!(url, "current price not found");
        return None;
    };

    let assembled = if fraction_digits.is_empty() {
        whole_digits
    } else {
        format!("{whole_digits}.{fraction_digits}")
    };
    match Decimal::from_str(&assembled) {
        Ok(price) => Some(price),
        Err(e) => {
            tracing::warn!(url, raw = %assembled, error = %e, "could not parse current price");
            None
        }
    }
}

fn adjacent_fraction(whole: ElementRef<'_>) -> Option<ElementRef<'_>> {
    whole
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sibling| selectors::PRICE_FRACTION.matches(sibling))
}

fn extract_previous_price(url: &str, document: &Html) -> Option<Decimal> {
    let raw = element_text(document.select(&selectors::STRIKE_PRICE).next()?);
    let parsed = parse_price_text(&raw);
    if parsed.is_none() {
        tracing::warn!(url, raw = %raw, "could not parse previous price");
    }
    parsed
}

fn extract_image_url(document: &Html) -> Option<String> {
    let image = selectors::IMAGES
        .iter()
        .find_map(|sel| document.select(sel).next())?;

    if let Some(dynamic) = image.value().attr(selectors::DYNAMIC_IMAGE_ATTR) {
        return DYNAMIC_IMAGE_URL_RE
            .captures(dynamic)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned());
    }

    image
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_owned)
}

/// Parses a displayed price such as `"1.299,00 €"`, `"€19,99"` or `"$1,299.00"`.
///
/// Currency symbols and spaces are dropped. When both `,` and `.` appear, the
/// later one is the decimal separator and the other is a thousands separator;
/// a lone `,` is treated as the decimal separator.
#[must_use]
pub fn parse_price_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        (None, _) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
