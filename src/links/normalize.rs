// src/links/normalize.rs
// =============================================================================
// Cleans raw href attribute values before they are resolved.
//
// Steps, in order:
// 1. Drop the fragment (`#section`): it never changes the fetched document
// 2. Trim surrounding whitespace
// 3. Percent-decode what is left
//
// Resolution against a base URL is NOT done here, see extract.rs.
// =============================================================================

// Cleans a raw href so it can be resolved against the root URL
//
// Example:
//   "  /docs/getting%20started#install " -> "/docs/getting started"
pub fn clean(raw_href: &str) -> String {
    let without_fragment = match raw_href.find('#') {
        Some(idx) => &raw_href[..idx],
        None => raw_href,
    };

    let trimmed = without_fragment.trim();

    // decode_binary never fails: malformed escapes are copied as-is and
    // invalid UTF-8 becomes U+FFFD
    let decoded = urlencoding::decode_binary(trimmed.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}
