use super::*;

// -----------------------------------------------------------------------
// extract_asin: canonical paths
// -----------------------------------------------------------------------

#[test]
fn extracts_asin_from_dp_path() {
    assert_eq!(
        extract_asin("https://www.amazon.it/dp/B08N5WRWNW").as_deref(),
        Some("B08N5WRWNW")
    );
}

#[test]
fn extracts_asin_from_dp_path_with_slug_and_query() {
    let url = "https://www.amazon.it/Echo-Dot-generazione/dp/B09B8X9RGM/ref=sr_1_3?keywords=echo&qid=1";
    assert_eq!(extract_asin(url).as_deref(), Some("B09B8X9RGM"));
}

#[test]
fn extracts_asin_from_gp_product_path() {
    let url = "https://www.amazon.it/gp/product/8804668237/?tag=foo-21";
    assert_eq!(extract_asin(url).as_deref(), Some("8804668237"));
}

#[test]
fn extracts_asin_from_dp_path_with_fragment() {
    assert_eq!(
        extract_asin("https://www.amazon.it/dp/B0C1234567#reviews").as_deref(),
        Some("B0C1234567")
    );
}

#[test]
fn canonical_path_wins_over_earlier_fallback_token() {
    let url = "https://www.amazon.it/ABCDEFGHIJ/dp/B0C1234567";
    assert_eq!(extract_asin(url).as_deref(), Some("B0C1234567"));
}

#[test]
fn eleven_character_dp_segment_is_not_an_asin() {
    assert_eq!(extract_asin("https://www.amazon.it/dp/B0C12345678"), None);
}

// -----------------------------------------------------------------------
// extract_asin: fallback token
// -----------------------------------------------------------------------

#[test]
fn fallback_finds_standalone_token_before_query() {
    let url = "https://www.amazon.it/Some-Product-Name/B07PGL2ZSL?th=1";
    assert_eq!(extract_asin(url).as_deref(), Some("B07PGL2ZSL"));
}

#[test]
fn fallback_finds_token_at_end_of_input() {
    let url = "https://www.amazon.it/d/B07PGL2ZSL";
    assert_eq!(extract_asin(url).as_deref(), Some("B07PGL2ZSL"));
}

#[test]
fn fallback_rejects_ref_prefixed_token() {
    let url = "https://www.amazon.it/product/REF1234567/";
    assert_eq!(extract_asin(url), None);
}

#[test]
fn fallback_skips_ref_token_and_keeps_searching() {
    let url = "https://www.amazon.it/REFSR12345/B07PGL2ZSL";
    assert_eq!(extract_asin(url).as_deref(), Some("B07PGL2ZSL"));
}

#[test]
fn fallback_rejects_lowercase_tokens() {
    assert_eq!(extract_asin("https://www.amazon.it/abcdefghij/"), None);
}

#[test]
fn fallback_requires_trailing_boundary() {
    // Followed by '.', which is not a recognised boundary.
    assert_eq!(extract_asin("https://www.amazon.it/B07PGL2ZSL.html"), None);
}

#[test]
fn fallback_ignores_token_embedded_in_longer_word() {
    assert_eq!(extract_asin("https://www.amazon.it/xB07PGL2ZSL/"), None);
}

#[test]
fn no_asin_in_unrelated_url() {
    assert_eq!(extract_asin("https://www.example.com/hello/world"), None);
}

// -----------------------------------------------------------------------
// is_short_link
// -----------------------------------------------------------------------

#[test]
fn recognises_short_link_domains() {
    assert!(is_short_link("https://amzn.to/3xYzAbC"));
    assert!(is_short_link("http://amzn.eu/d/abc123"));
    assert!(is_short_link("https://a.co/d/9kLmNoP"));
    assert!(is_short_link("amzn.to/3xYzAbC"));
    assert!(is_short_link("  https://AMZN.TO/3xYzAbC  "));
}

#[test]
fn canonical_links_are_not_short() {
    assert!(!is_short_link("https://www.amazon.it/dp/B08N5WRWNW"));
    assert!(!is_short_link("https://amzn.tools/whatever"));
    assert!(!is_short_link("https://data.co/x"));
}

// -----------------------------------------------------------------------
// canonical_url / find_product_link
// -----------------------------------------------------------------------

#[test]
fn canonical_url_joins_base_and_asin() {
    assert_eq!(
        canonical_url("https://www.amazon.it/", "B08N5WRWNW"),
        "https://www.amazon.it/dp/B08N5WRWNW"
    );
}

#[test]
fn finds_link_inside_message_text() {
    let text = "Guarda questa offerta: https://www.amazon.it/dp/B08N5WRWNW?tag=x-21 !";
    assert_eq!(
        find_product_link(text),
        Some("https://www.amazon.it/dp/B08N5WRWNW?tag=x-21")
    );
}

#[test]
fn finds_short_link_and_strips_trailing_punctuation() {
    let text = "(offerta: https://amzn.to/3xYzAbC).";
    assert_eq!(find_product_link(text), Some("https://amzn.to/3xYzAbC"));
}

#[test]
fn ignores_messages_without_amazon_links() {
    assert_eq!(find_product_link("ciao https://example.com/dp/B08N5WRWNW"), None);
    assert_eq!(find_product_link("nessun link qui"), None);
    assert_eq!(find_product_link("vedi https://a.com/x"), None);
}
