pub mod suggestion;

pub use suggestion::{ProductSearch, QueryTicket, SuggestionFeed};
