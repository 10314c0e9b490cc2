//! CSS selectors for Amazon product pages.
//!
//! These are the only coupling to Amazon's markup. When extraction starts
//! failing, capture a page sample, update the selectors here and add a fixture
//! to the extractor tests.

use std::sync::LazyLock;

use scraper::Selector;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

pub(crate) static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("#productTitle"));

/// Integer part of the displayed price, e.g. `29,` on amazon.it.
pub(crate) static PRICE_WHOLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".a-price-whole"));

/// Cents part of the displayed price, the sibling of [`PRICE_WHOLE`].
pub(crate) static PRICE_FRACTION: LazyLock<Selector> =
    LazyLock::new(|| selector(".a-price-fraction"));

/// Strikethrough list price, in both the legacy and the current markup.
pub(crate) static STRIKE_PRICE: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        ".a-text-strike, \
         .a-price[data-a-strike='true'] .a-offscreen",
    )
});

/// Main product image, tried in order.
pub(crate) static IMAGES: LazyLock<[Selector; 2]> =
    LazyLock::new(|| [selector("img#landingImage"), selector("img#imgBliss")]);

/// Responsive image attribute: JSON object of `url -> [width, height]`.
pub(crate) const DYNAMIC_IMAGE_ATTR: &str = "data-a-dynamic-image";

/// Amazon's robot-check form.
pub(crate) static CAPTCHA_FORM: LazyLock<Selector> =
    LazyLock::new(|| selector("form[action*='validateCaptcha']"));
