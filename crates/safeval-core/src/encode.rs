//! Output encoders
//!
//! Thin wrappers over the encoding crates so the wrapper never implements
//! escaping rules itself.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::scalar::Scalar;
use quick_xml::escape::escape;
use regex::Regex;
use std::sync::OnceLock;
use url::form_urlencoded;

static HTML_TAG: OnceLock<Regex> = OnceLock::new();

fn html_tag_regex() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("html tag pattern is valid"))
}

/// Escape `&`, `<`, `>`, `'` and `"` for HTML text and attribute contexts
pub fn html_encode(text: &str) -> String {
    escape(text).into_owned()
}

/// Form-style URL encoding (space becomes `+`)
pub fn url_encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// JSON literal for a scalar; non-finite floats encode as `null`
pub fn json_encode(value: &Scalar) -> String {
    value.to_json().to_string()
}

/// Strip tags and decode HTML character references, named or numeric.
///
/// Unknown entities are left as written.
pub fn strip_tags(html: &str) -> String {
    let without_tags = html_tag_regex().replace_all(html, "");
    html_escape::decode_html_entities(&without_tags).into_owned()
}
