//! ASIN extraction and link recognition for Amazon product URLs.
//!
//! Everything here is pure string work. Resolving shortened links over the
//! network lives in [`crate::client::AmazonScraper::resolve`].

use std::sync::LazyLock;

use regex::Regex;

static SHORT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?(?:amzn\.(?:to|eu)|a\.co)(?:[/?#]|$)")
        .expect("valid short link regex")
});
static PRODUCT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]{10})(?:[/?&#]|$)").expect("valid product path regex")
});
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("valid token regex"));
static PRODUCT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)https?://(?:[a-z0-9-]+\.)*(?:amazon\.[a-z]{2,3}(?:\.[a-z]{2})?|amzn\.(?:to|eu)|a\.co)\b(?:[/?#][^\s<>"']*)?"#,
    )
    .expect("valid product link regex")
});

const ASIN_LEN: usize = 10;

/// Returns `true` for redirect-based short links (`amzn.to`, `amzn.eu`, `a.co`).
///
/// Short links must be resolved before an ASIN can be read, and must never be
/// rewritten when building affiliate links.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    SHORT_LINK_RE.is_match(url.trim())
}

/// Extracts an ASIN from an already-resolved product URL.
///
/// Tries the `/dp/{ASIN}` and `/gp/product/{ASIN}` path forms first. Falls
/// back to the first standalone 10-character uppercase alphanumeric token
/// followed by `/`, `?`, `&` or end of input, skipping tokens that start with
/// `REF` (referral path segments). The fallback is a heuristic: ASINs carry no
/// checksum, so a coincidental token elsewhere in the URL can still match.
#[must_use]
pub fn extract_asin(url: &str) -> Option<String> {
    if let Some(caps) = PRODUCT_PATH_RE.captures(url) {
        return caps.get(1).map(|m| m.as_str().to_owned());
    }

    TOKEN_RE
        .find_iter(url)
        .filter(|m| {
            let bounded = url[m.end()..]
                .chars()
                .next()
                .is_none_or(|c| matches!(c, '/' | '?' | '&'));
            bounded && is_asin_shaped(m.as_str())
        })
        .map(|m| m.as_str())
        .find(|token| !token.starts_with("REF"))
        .map(str::to_owned)
}

/// Builds the tracking-free `…/dp/{asin}` link on the given marketplace origin.
#[must_use]
pub fn canonical_url(base_url: &str, asin: &str) -> String {
    format!("{}/dp/{asin}", base_url.trim_end_matches('/'))
}

/// Returns the first Amazon or short link found in free text, e.g. a pasted
/// chat message. Trailing sentence punctuation is not part of the link.
#[must_use]
pub fn find_product_link(text: &str) -> Option<&str> {
    PRODUCT_LINK_RE
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']))
}

fn is_asin_shaped(token: &str) -> bool {
    token.len() == ASIN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
#[path = "asin_test.rs"]
mod tests;
