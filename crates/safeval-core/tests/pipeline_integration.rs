//! End-to-end chains mixing arithmetic, truncation and conditionals

use safeval_core::{wrap, Chain, Scalar, SettingsBuilder, SmartValue};

#[test]
fn test_arithmetic_chain_to_percent() {
    let sold = SmartValue::new("45");
    let rate = sold.add(5).divide(200).percent(1);
    assert_eq!(rate.string(), "25.0%");
    assert!(!rate.has_numeric_error());
}

#[test]
fn test_sticky_error_through_long_chain() {
    let chain = wrap("abc").add(5).add(5);
    assert!(chain.value().is_null());
    assert!(chain.has_numeric_error());

    let still_poisoned = chain.multiply(2).subtract(1).percent(0);
    assert!(still_poisoned.value().is_null());
    assert!(still_poisoned.has_numeric_error());

    // A conditional can supply display text without clearing the flag
    let shown = still_poisoned.or("n/a");
    assert_eq!(shown.to_string(), "n/a");
    assert!(shown.has_numeric_error());
}

#[test]
fn test_documented_truncation_examples() {
    assert_eq!(
        wrap("The quick brown fox jumps over the lazy dog").max_words(5).string(),
        "The quick brown fox jumps..."
    );
    assert_eq!(wrap("The quick brown fox").max_chars(12).string(), "The quick...");
    assert_eq!(wrap("Testing").max_chars(1).string(), "T...");
}

#[test]
fn test_documented_percent_examples() {
    assert_eq!(wrap(0).percent_or(2, "N/A").string(), "N/A");
    assert_eq!(wrap(0.5).percent_or(2, "N/A").string(), "50.00%");
}

#[test]
fn test_european_settings_chain() {
    let settings = SettingsBuilder::new()
        .separators(",", ".")
        .date_format("%d.%m.%Y")
        .build_shared()
        .unwrap();

    let amount = SmartValue::with_settings("1234567.891", settings.clone()).number_format(2);
    assert_eq!(amount.string(), "1.234.567,89");

    let date = SmartValue::with_settings("2024-02-29", settings).date_format(None);
    assert_eq!(date.string(), "29.02.2024");
}

#[test]
fn test_escaping_survives_chains() {
    let v = wrap("<b>Bold</b> claims & more words here")
        .max_words(2)
        .and_prefix("Title: ");
    assert_eq!(v.to_string(), "Title: &lt;b&gt;Bold&lt;/b&gt; claims...");
    assert_eq!(v.no_encode(), "Title: <b>Bold</b> claims...");

    let quoted = wrap(r#"say "hi" & 'bye'"#);
    assert_eq!(
        quoted.to_string(),
        "say &quot;hi&quot; &amp; &apos;bye&apos;"
    );
}

#[test]
fn test_text_only_pipeline() {
    let chain = Chain::parse(["text-only", "max-chars:20", "or:(untitled)"]).unwrap();
    assert_eq!(
        chain.apply(&wrap("<h1>Caf&#233; &amp; Bar: open late</h1>")).string(),
        "Café & Bar: open..."
    );
    assert_eq!(chain.apply(&wrap("<br/>")).string(), "(untitled)");
}

#[test]
fn test_set_injects_into_chain() {
    let v = wrap("ignored").set(Scalar::Int(3)).multiply(4);
    assert_eq!(v.float(), 12.0);
}
