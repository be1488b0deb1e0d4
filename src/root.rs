// src/root.rs
// =============================================================================
// The crawl's fixed starting point.
//
// RootContext is built once when the crawler is created and never changes.
// Its authority (scheme + host + port) is the boundary of the crawl: any
// link with a different authority is outside the site.
// =============================================================================

use url::{Origin, Url};

#[derive(Debug, Clone)]
pub struct RootContext {
    root_url: Url,
    root_authority: Origin,
}

impl RootContext {
    pub fn new(root_url: Url) -> Self {
        let root_authority = root_url.origin();
        Self {
            root_url,
            root_authority,
        }
    }

    /// The URL the crawl starts from; relative hrefs resolve against it.
    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    /// True when `url` has exactly the root's scheme, host and port.
    pub fn is_same_authority(&self, url: &Url) -> bool {
        url.origin() == self.root_authority
    }
}
