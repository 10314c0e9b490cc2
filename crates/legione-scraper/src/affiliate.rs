//! Affiliate link building and discount arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::asin::is_short_link;

const TAG_PARAM: &str = "tag";

/// Sets the `tag` query parameter on `url` to `tag` and drops any fragment.
///
/// Short links are returned unchanged: they already carry their tracking and
/// rewriting them can break the redirect. An empty `tag` also returns `url`
/// unchanged. An existing `tag` is overwritten in place, so applying the same
/// tag twice yields the same URL as applying it once.
#[must_use]
pub fn apply_affiliate_tag(url: &str, tag: &str) -> String {
    if tag.is_empty() || is_short_link(url) {
        return url.to_owned();
    }

    let mut parsed = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(url, error = %e, "could not parse URL for tagging, leaving it untouched");
            return url.to_owned();
        }
    };

    let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    let position = pairs.iter().position(|(key, _)| key == TAG_PARAM);
    pairs.retain(|(key, _)| key != TAG_PARAM);
    let entry = (TAG_PARAM.to_owned(), tag.to_owned());
    match position {
        Some(index) => pairs.insert(index.min(pairs.len()), entry),
        None => pairs.push(entry),
    }

    parsed.set_fragment(None);
    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    parsed.to_string()
}

/// Rounded percentage saved versus the list price.
///
/// `0` whenever either price is missing, `current <= 0`, or
/// `previous <= current`, so generated copy never advertises a negative or
/// nonsensical discount. Halves round to even.
#[must_use]
pub fn discount_percent(current: Option<Decimal>, previous: Option<Decimal>) -> u32 {
    let (Some(current), Some(previous)) = (current, previous) else {
        return 0;
    };
    if current <= Decimal::ZERO || previous <= current {
        return 0;
    }

    ((previous - current) / previous * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or(0)
}
