//! Telegram promotional post rendering (HTML parse mode).

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::types::ProductRecord;

/// Renders the channel post for a scraped product.
///
/// Optional lines are omitted rather than rendered blank: the list price only
/// appears when it is above the current price, the discount only when it
/// rounds to at least 1%.
#[must_use]
pub fn format_post(record: &ProductRecord) -> String {
    let mut post = format!("🔥 <b>{}</b>\n\n", escape_html(&record.title));

    match record.current_price {
        Some(current) => {
            let _ = writeln!(post, "💰 Prezzo: <b>{}</b>", format_price(current));
            if let Some(previous) = record.previous_price.filter(|p| *p > current) {
                let _ = writeln!(post, "❌ Invece di: <s>{}</s>", format_price(previous));
            }
        }
        None => post.push_str("💰 Prezzo: controlla sulla pagina del prodotto\n"),
    }

    let discount = record.discount_percent();
    if discount > 0 {
        let _ = writeln!(post, "📉 Sconto: <b>-{discount}%</b>");
    }

    let _ = write!(
        post,
        "\n🛒 <a href=\"{}\">Acquista su Amazon</a>",
        escape_html(&record.affiliate_link)
    );
    post
}

/// Formats a euro amount the Italian way: `1299.5` -> `1299,50 €`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    format!("{} €", fixed.replace('.', ","))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
