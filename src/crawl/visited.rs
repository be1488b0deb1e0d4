// src/crawl/visited.rs
// =============================================================================
// The set of URLs the crawl has already claimed.
//
// Shared by every crawl task. Each call takes the lock exactly once, so
// `insert` is a real check-and-add: for any URL, exactly one caller ever gets
// `true` back, no matter how many tasks race for it.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere can't leave a HashSet half-inserted, so a poisoned
    // lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `url`; a no-op when it is already present.
    pub fn add(&self, url: &str) {
        self.insert(url);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Adds `url` and returns true if it was not there before.
    pub fn insert(&self, url: &str) -> bool {
        self.lock().insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Sorted copy of every visited URL.
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }
}
