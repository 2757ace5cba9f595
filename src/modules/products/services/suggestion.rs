// Product autocomplete for the invoice editor.
//
// Lookups are asynchronous and may resolve out of order: a slow response for
// "app" must not overwrite the list already shown for "appl". Each item index
// carries a monotonically increasing generation counter; a response is
// installed only if its ticket still matches the latest generation issued for
// that index, otherwise it is discarded.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::Result;
use crate::modules::products::models::ProductSuggestion;
use crate::modules::products::repositories::ProductRepository;

/// Queries shorter than this clear the list without hitting the backend.
const MIN_QUERY_LEN: usize = 2;

/// Capability consumed by the suggestion feed; the product repository is the
/// production implementation.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ProductSuggestion>>;
}

#[async_trait]
impl ProductSearch for ProductRepository {
    async fn search(&self, query: &str) -> Result<Vec<ProductSuggestion>> {
        ProductRepository::search(self, query).await
    }
}

/// Handle for one in-flight lookup, tied to the line-item index that
/// triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    index: usize,
    generation: u64,
}

#[derive(Debug, Default)]
struct ItemFeed {
    latest: u64,
    suggestions: Vec<ProductSuggestion>,
}

/// Per-line-item suggestion lists with stale-response protection.
#[derive(Debug, Default)]
pub struct SuggestionFeed {
    items: Mutex<HashMap<usize, ItemFeed>>,
}

impl SuggestionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new lookup for `index`. Returns `None` when the query is
    /// too short to search; the visible list for that index is cleared.
    pub fn open(&self, index: usize, query: &str) -> Option<QueryTicket> {
        let mut items = self.items.lock().unwrap();
        let feed = items.entry(index).or_default();

        if query.trim().len() < MIN_QUERY_LEN {
            feed.latest += 1;
            feed.suggestions.clear();
            return None;
        }

        feed.latest += 1;
        Some(QueryTicket {
            index,
            generation: feed.latest,
        })
    }

    /// Installs results for a finished lookup. Returns false when a newer
    /// lookup for the same index has been issued since, in which case the
    /// results are dropped.
    pub fn deliver(&self, ticket: QueryTicket, results: Vec<ProductSuggestion>) -> bool {
        let mut items = self.items.lock().unwrap();
        let feed = items.entry(ticket.index).or_default();

        if ticket.generation != feed.latest {
            return false;
        }

        feed.suggestions = results;
        true
    }

    /// The list currently visible for an item index.
    pub fn current(&self, index: usize) -> Vec<ProductSuggestion> {
        let items = self.items.lock().unwrap();
        items
            .get(&index)
            .map(|feed| feed.suggestions.clone())
            .unwrap_or_default()
    }

    /// Empties the list for an index, e.g. after a suggestion was picked.
    pub fn clear(&self, index: usize) {
        let mut items = self.items.lock().unwrap();
        let feed = items.entry(index).or_default();
        feed.latest += 1;
        feed.suggestions.clear();
    }

    /// Runs a lookup end to end: opens a ticket, queries the capability and
    /// delivers the results, dropping them if they arrive stale.
    pub async fn refresh(
        &self,
        searcher: &dyn ProductSearch,
        index: usize,
        query: &str,
    ) -> Result<bool> {
        let Some(ticket) = self.open(index, query) else {
            return Ok(false);
        };

        let results = searcher.search(query.trim()).await?;
        Ok(self.deliver(ticket, results))
    }
}
