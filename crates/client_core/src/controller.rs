use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{SearchPage, StoryRecord};
use tracing::{debug, info, warn};

use crate::{
    error::{FetchError, QueryUrlError},
    query::{QueryUrl, SearchEndpoint, UrlHistory},
    store::{StoriesAction, StoriesState},
};

/// Fetches one page of search results. Timeouts are the implementation's
/// concern.
#[async_trait]
pub trait StoryFetcher: Send + Sync {
    async fn fetch(&self, url: &QueryUrl) -> Result<SearchPage, FetchError>;
}

/// Handle for one in-flight fetch. Only the completion carrying the newest
/// sequence number is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    seq: u64,
    url: QueryUrl,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn url(&self) -> &QueryUrl {
        &self.url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was started before this one completed.
    Discarded,
    /// No url was appended since the previous fetch.
    Idle,
}

/// Owns the url history and the stories state for one session. Every append
/// to the history arms exactly one fetch, serviced by [`Self::run_fetch`] or
/// by [`Self::begin_fetch`] / [`Self::complete_fetch`] when the caller drives
/// the request itself.
pub struct QueryController {
    fetcher: Arc<dyn StoryFetcher>,
    endpoint: SearchEndpoint,
    history: UrlHistory,
    state: StoriesState,
    appended: u64,
    serviced: u64,
    latest_seq: u64,
}

impl QueryController {
    pub fn new(endpoint: SearchEndpoint, fetcher: Arc<dyn StoryFetcher>) -> Self {
        Self {
            fetcher,
            endpoint,
            history: UrlHistory::default(),
            state: StoriesState::new(),
            appended: 0,
            serviced: 0,
            latest_seq: 0,
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        let mut history = UrlHistory::with_capacity(capacity);
        for url in self.history.iter() {
            history.push(url.clone());
        }
        self.history = history;
        self
    }

    pub fn state(&self) -> &StoriesState {
        &self.state
    }

    pub fn history(&self) -> &UrlHistory {
        &self.history
    }

    pub fn fetcher(&self) -> Arc<dyn StoryFetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn recent_terms(&self) -> Vec<String> {
        self.history.recent_terms()
    }

    pub fn current_term(&self) -> Option<&str> {
        self.history.last().map(QueryUrl::term)
    }

    pub fn dispatch(&mut self, action: StoriesAction) {
        debug!(action = action.name(), "dispatching stories action");
        self.state.dispatch(action);
    }

    pub fn remove_item(&mut self, story: &StoryRecord) {
        self.dispatch(StoriesAction::RemoveItem(story.clone()));
    }

    pub fn build_url(&self, term: &str, page: u32) -> Result<QueryUrl, QueryUrlError> {
        self.endpoint.build(term, page)
    }

    /// Appends a url to the history. This is the only way to arm a fetch.
    pub fn issue_search(&mut self, term: &str, page: u32) -> Result<QueryUrl, QueryUrlError> {
        let url = self.build_url(term, page)?;
        info!(term, page, url = %url, "issued search");
        self.history.push(url.clone());
        self.appended += 1;
        Ok(url)
    }

    /// Starts the fetch armed by the latest append: dispatches `FETCH_INIT`
    /// and returns the ticket to complete it with. `None` when nothing was
    /// appended since the previous call.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.serviced == self.appended {
            return None;
        }
        let url = self.history.last()?.clone();
        self.serviced = self.appended;
        self.latest_seq += 1;

        self.dispatch(StoriesAction::FetchInit);
        Some(FetchTicket {
            seq: self.latest_seq,
            url,
        })
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<SearchPage, FetchError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                url = %ticket.url,
                "discarding stale fetch completion"
            );
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                info!(
                    url = %ticket.url,
                    page = page.page,
                    hits = page.hits.len(),
                    "search results received"
                );
                self.dispatch(StoriesAction::FetchSuccess {
                    list: page.hits,
                    page: page.page,
                });
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(url = %ticket.url, error = %err, "search fetch failed");
                self.dispatch(StoriesAction::FetchFailure);
                FetchOutcome::Failed
            }
        }
    }

    /// Runs the pending fetch end to end. Errors are folded into the state's
    /// error flag and never returned.
    pub async fn run_fetch(&mut self) -> FetchOutcome {
        let Some(ticket) = self.begin_fetch() else {
            return FetchOutcome::Idle;
        };
        let fetcher = self.fetcher();
        let result = fetcher.fetch(ticket.url()).await;
        self.complete_fetch(ticket, result)
    }

    /// Fresh search: page 0 replaces the current list.
    pub async fn submit_new_search(&mut self, term: &str) -> Result<FetchOutcome, QueryUrlError> {
        self.issue_search(term, 0)?;
        Ok(self.run_fetch().await)
    }

    /// Loads the page after the current one for the active term and appends it.
    /// `Idle` when there is no active term or the page index is exhausted.
    pub async fn more(&mut self) -> Result<FetchOutcome, QueryUrlError> {
        let Some(term) = self.current_term().map(str::to_string) else {
            return Ok(FetchOutcome::Idle);
        };
        let Some(next_page) = self.state.current_page().checked_add(1) else {
            warn!(term = %term, "no page after the last representable page");
            return Ok(FetchOutcome::Idle);
        };
        self.issue_search(&term, next_page)?;
        Ok(self.run_fetch().await)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
