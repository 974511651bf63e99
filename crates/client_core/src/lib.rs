//! Client core for searching a remote story index: the stories reducer, the
//! query controller that drives fetch cycles, recent-search derivation, and
//! column sorting for display.

pub mod controller;
pub mod error;
pub mod history;
pub mod persistence;
pub mod query;
pub mod sort;
pub mod store;
pub mod transport;

pub use controller::{FetchOutcome, FetchTicket, QueryController, StoryFetcher};
pub use error::{FetchError, InvalidActionError, QueryUrlError};
pub use history::{derive_recent_terms, recent_terms_from, RECENT_TERMS_WINDOW};
pub use persistence::{KeyValueStore, SearchTermSetting, DEFAULT_SEARCH_TERM, SEARCH_TERM_KEY};
pub use query::{QueryUrl, SearchEndpoint, UrlHistory, DEFAULT_HISTORY_CAPACITY};
pub use shared::domain::{SearchPage, StoryId, StoryRecord};
pub use sort::{sort_stories, SortKey, SortSpec, UnknownSortKey};
pub use store::{reduce, sum_comments, StoriesAction, StoriesState};
pub use transport::HttpStoryFetcher;
