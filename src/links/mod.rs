// src/links/mod.rs
// =============================================================================
// Everything that happens to a link between the HTML page and the crawl queue.
//
// Submodules:
// - normalize: cleans raw href values
// - extract: pulls same-site absolute URLs out of an HTML page
// - filter: rejects URLs that point at non-page resources
// =============================================================================

mod extract;
mod filter;
mod normalize;

pub use extract::extract;
pub use filter::{is_undesirable, UNDESIRED_EXTENSIONS, UNDESIRED_SCHEMES};
pub use normalize::clean;
