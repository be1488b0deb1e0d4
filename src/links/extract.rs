// src/links/extract.rs
// =============================================================================
// This module turns a fetched HTML page into the set of same-site links.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever, so broken markup still parses)
// - Supports CSS selectors for finding elements
//
// Every href is cleaned (see normalize.rs), resolved against the ROOT url
// (not the page url) and kept only if it stays on the root's authority.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::normalize::clean;
use crate::root::RootContext;

// "a" is a constant, known-valid selector
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector is valid"));

// Extracts every same-authority absolute URL from `html`
//
// Example (root = "http://example.com"):
//   <a href="/docs">           -> "http://example.com/docs"
//   <a href="https://other.io"> -> dropped
//   <a>no href</a>             -> dropped
pub fn extract(root: &RootContext, html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    for element in document.select(&ANCHOR) {
        let Some(raw_href) = element.value().attr("href") else {
            continue;
        };

        let href = clean(raw_href);
        if href.is_empty() {
            continue;
        }

        let Ok(absolute) = root.root_url().join(&href) else {
            continue;
        };

        if root.is_same_authority(&absolute) {
            links.insert(absolute.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn root(url: &str) -> RootContext {
        RootContext::new(Url::parse(url).unwrap())
    }

    fn set(urls: &[&str]) -> HashSet<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_extract_same_domain_links() {
        let html = r#"
        <html>
            <body>
                <a href="http://example.com/page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="https://external.com">External Link</a>
            </body>
        </html>
        "#;
        let links = extract(&root("http://example.com"), html);
        assert_eq!(links, set(&["http://example.com/page1", "http://example.com/page2"]));
    }

    #[test]
    fn test_extract_no_links() {
        let html = "<html><body>No links here</body></html>";
        assert!(extract(&root("http://example.com"), html).is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r##"
            <a href="/a">one</a>
            <a href="/a#top">two</a>
            <a href=" /a ">three</a>
        "##;
        let links = extract(&root("http://example.com"), html);
        assert_eq!(links, set(&["http://example.com/a"]));
    }

    #[test]
    fn test_missing_and_empty_hrefs_are_skipped() {
        let html = r##"<a>none</a><a href="">empty</a><a href="#only-fragment">frag</a>"##;
        assert!(extract(&root("http://example.com"), html).is_empty());
    }

    #[test]
    fn test_subdomain_and_scheme_changes_are_rejected() {
        let html = r#"
            <a href="http://sub.example.com/x">sub</a>
            <a href="https://example.com/y">https</a>
            <a href="mailto:me@example.com">mail</a>
        "#;
        assert!(extract(&root("http://example.com"), html).is_empty());
    }

    #[test]
    fn test_relative_links_resolve_against_root() {
        let html = r#"<a href="team">Team</a>"#;
        let links = extract(&root("http://example.com/about/"), html);
        assert_eq!(links, set(&["http://example.com/about/team"]));
    }

    #[test]
    fn test_percent_encoded_href_is_decoded() {
        let html = r#"<a href="/getting%20started">Docs</a>"#;
        let links = extract(&root("http://example.com"), html);
        assert_eq!(links, set(&["http://example.com/getting%20started"]));
    }

    #[test]
    fn test_malformed_html_still_yields_links() {
        let html = r#"<div><a href="/ok">ok<p><a href="/also-ok">unclosed"#;
        let links = extract(&root("http://example.com"), html);
        assert_eq!(links, set(&["http://example.com/ok", "http://example.com/also-ok"]));
    }
}
