//! Continuation-token pagination for nearby search.
//!
//! Google returns at most 20 results per page and a `next_page_token` when
//! more exist. A fresh token is rejected with `INVALID_REQUEST` until it has
//! propagated, so the pager sleeps `page_delay` before every continuation
//! request. Upstream stops issuing tokens after three pages; `max_pages`
//! mirrors that as a configurable guard.

use std::time::Duration;

use placescan_core::{Keyword, SearchCenter};

use crate::client::{NearbyPage, PlacesClient};
use crate::error::PlacesError;

/// Observed delay before a continuation token becomes valid.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2_000;

/// Observed upstream page cap per nearby search.
pub const DEFAULT_MAX_PAGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Sleep before each continuation request (not before the first page).
    pub page_delay: Duration,
    /// Stop following tokens after this many pages. Values below 1 act as 1.
    pub max_pages: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Lazy sequence of nearby-search pages for one keyword.
///
/// Call [`NearbyPager::next_page`] until it returns `None`. After an error
/// the pager is exhausted; nothing is retried.
pub struct NearbyPager<'a> {
    client: &'a PlacesClient,
    center: SearchCenter,
    keyword: Keyword,
    options: PaginationOptions,
    next_token: Option<String>,
    pages_fetched: usize,
    exhausted: bool,
}

impl<'a> NearbyPager<'a> {
    #[must_use]
    pub fn new(
        client: &'a PlacesClient,
        center: SearchCenter,
        keyword: Keyword,
        options: PaginationOptions,
    ) -> Self {
        Self {
            client,
            center,
            keyword,
            options,
            next_token: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    /// Number of page requests issued so far (successful or not).
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches the next page, or returns `None` once the sequence is done.
    pub async fn next_page(&mut self) -> Option<Result<NearbyPage, PlacesError>> {
        if self.exhausted {
            return None;
        }

        if self.pages_fetched > 0 {
            if self.pages_fetched >= self.options.max_pages.max(1) {
                tracing::warn!(
                    keyword = %self.keyword,
                    max_pages = self.options.max_pages,
                    "page limit reached with a continuation token pending; stopping"
                );
                self.exhausted = true;
                return None;
            }
            if !self.options.page_delay.is_zero() {
                tokio::time::sleep(self.options.page_delay).await;
            }
        }

        let result = self
            .client
            .nearby_search(&self.center, &self.keyword, self.next_token.as_deref())
            .await;
        self.pages_fetched += 1;

        match result {
            Ok(page) => {
                self.next_token.clone_from(&page.next_page_token);
                if self.next_token.is_none() {
                    self.exhausted = true;
                }
                tracing::debug!(
                    keyword = %self.keyword,
                    page = self.pages_fetched,
                    results = page.candidates.len(),
                    has_more = !self.exhausted,
                    "nearby search page"
                );
                Some(Ok(page))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

impl PlacesClient {
    /// Starts a paginated nearby search for `keyword` around `center`.
    #[must_use]
    pub fn nearby_pages(
        &self,
        center: &SearchCenter,
        keyword: &Keyword,
        options: PaginationOptions,
    ) -> NearbyPager<'_> {
        NearbyPager::new(self, *center, keyword.clone(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_observed_upstream_behaviour() {
        let opts = PaginationOptions::default();
        assert_eq!(opts.page_delay, Duration::from_secs(2));
        assert_eq!(opts.max_pages, 3);
    }
}
