// Tests for the autocomplete suggestion feed: later queries win regardless
// of response arrival order, short queries clear without searching, and each
// line-item index keeps its own list.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use billforge::core::Result;
use billforge::products::models::ProductSuggestion;
use billforge::products::services::{ProductSearch, SuggestionFeed};

fn suggestion(name: &str) -> ProductSuggestion {
    ProductSuggestion {
        id: format!("id-{}", name),
        name: name.to_string(),
        description: None,
        current_price: dec!(10),
    }
}

struct FixedSearch(Vec<ProductSuggestion>);

#[async_trait]
impl ProductSearch for FixedSearch {
    async fn search(&self, _query: &str) -> Result<Vec<ProductSuggestion>> {
        Ok(self.0.clone())
    }
}

#[test]
fn out_of_order_responses_resolve_to_latest_query() {
    let feed = SuggestionFeed::new();

    // queries typed in order: "ap", "app", "appl"
    let q_ap = feed.open(0, "ap").unwrap();
    let q_app = feed.open(0, "app").unwrap();
    let q_appl = feed.open(0, "appl").unwrap();

    // responses arrive out of order; "app" resolves last
    assert!(!feed.deliver(q_ap, vec![suggestion("apricot")]));
    assert!(feed.deliver(q_appl, vec![suggestion("apple crate")]));
    assert!(!feed.deliver(q_app, vec![suggestion("app stand")]));

    let visible = feed.current(0);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "apple crate");
}

#[test]
fn one_character_query_clears_and_does_not_search() {
    let feed = SuggestionFeed::new();

    let ticket = feed.open(0, "pi").unwrap();
    assert!(feed.deliver(ticket, vec![suggestion("pipe")]));
    assert!(!feed.current(0).is_empty());

    assert!(feed.open(0, "p").is_none());
    assert!(feed.current(0).is_empty());
}

#[test]
fn whitespace_only_query_counts_as_short() {
    let feed = SuggestionFeed::new();
    assert!(feed.open(0, "  a ").is_none());
}

#[test]
fn lists_are_scoped_per_item_index() {
    let feed = SuggestionFeed::new();

    let first = feed.open(0, "pipe").unwrap();
    let second = feed.open(1, "paint").unwrap();

    assert!(feed.deliver(second, vec![suggestion("paint bucket")]));
    assert!(feed.deliver(first, vec![suggestion("pipe")]));

    assert_eq!(feed.current(0)[0].name, "pipe");
    assert_eq!(feed.current(1)[0].name, "paint bucket");
}

#[test]
fn clearing_an_index_discards_its_in_flight_lookup() {
    let feed = SuggestionFeed::new();

    let ticket = feed.open(3, "cement").unwrap();
    feed.clear(3);

    assert!(!feed.deliver(ticket, vec![suggestion("cement")]));
    assert!(feed.current(3).is_empty());
}

#[tokio::test]
async fn refresh_populates_the_feed_through_the_capability() {
    let feed = SuggestionFeed::new();
    let searcher = FixedSearch(vec![suggestion("angle grinder"), suggestion("angle bracket")]);

    let delivered = feed.refresh(&searcher, 0, "angle").await.unwrap();
    assert!(delivered);
    assert_eq!(feed.current(0).len(), 2);
}

#[tokio::test]
async fn refresh_with_short_query_skips_the_backend() {
    let feed = SuggestionFeed::new();
    let searcher = FixedSearch(vec![suggestion("never seen")]);

    let delivered = feed.refresh(&searcher, 0, "x").await.unwrap();
    assert!(!delivered);
    assert!(feed.current(0).is_empty());
}
