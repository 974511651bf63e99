use std::{collections::VecDeque, fmt};

use url::Url;

use crate::{error::QueryUrlError, history};

pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1/search?";
pub const DEFAULT_SEARCH_PARAM: &str = "query";
pub const DEFAULT_PAGE_PARAM: &str = "page";
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Shape of every query url: `<base><search_param>=<term>&<page_param>=<page>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    base_url: String,
    search_param: String,
    page_param: String,
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
        }
    }
}

impl SearchEndpoint {
    pub fn new(
        base_url: impl Into<String>,
        search_param: impl Into<String>,
        page_param: impl Into<String>,
    ) -> Result<Self, QueryUrlError> {
        let base_url = base_url.into();
        let search_param = search_param.into();
        let page_param = page_param.into();

        let parsed = Url::parse(&base_url)
            .map_err(|err| QueryUrlError::InvalidEndpoint(format!("{base_url:?}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(QueryUrlError::InvalidEndpoint(format!(
                "{base_url:?}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        for param in [&search_param, &page_param] {
            if param.is_empty() || param.contains(['=', '&', '?']) {
                return Err(QueryUrlError::InvalidEndpoint(format!(
                    "bad query parameter name {param:?}"
                )));
            }
        }

        Ok(Self {
            base_url,
            search_param,
            page_param,
        })
    }

    fn search_prefix(&self) -> String {
        format!("{}{}=", self.base_url, self.search_param)
    }

    /// The term is concatenated verbatim; only terms that would make the url
    /// impossible to decompose are refused.
    pub fn build(&self, term: &str, page: u32) -> Result<QueryUrl, QueryUrlError> {
        if term.contains('&') {
            return Err(QueryUrlError::AmbiguousTerm(term.to_string()));
        }

        Ok(QueryUrl {
            raw: format!(
                "{}{term}&{}={page}",
                self.search_prefix(),
                self.page_param
            ),
            term: term.to_string(),
            page,
        })
    }

    pub fn parse(&self, raw: &str) -> Result<QueryUrl, QueryUrlError> {
        let prefix = self.search_prefix();
        let rest = raw
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| QueryUrlError::ForeignPrefix {
                url: raw.to_string(),
                prefix: prefix.clone(),
            })?;

        let (term, page_part) = rest
            .split_once('&')
            .ok_or_else(|| QueryUrlError::MissingPage(raw.to_string()))?;
        let page_value = page_part
            .strip_prefix(self.page_param.as_str())
            .and_then(|value| value.strip_prefix('='))
            .ok_or_else(|| QueryUrlError::MissingPage(raw.to_string()))?;
        let page = page_value
            .parse::<u32>()
            .map_err(|_| QueryUrlError::InvalidPage {
                url: raw.to_string(),
                value: page_value.to_string(),
            })?;

        Ok(QueryUrl {
            raw: raw.to_string(),
            term: term.to_string(),
            page,
        })
    }
}

/// A query url together with the term and page it was built from. Only
/// [`SearchEndpoint`] constructs these, so decomposition cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryUrl {
    raw: String,
    term: String,
    page: u32,
}

impl QueryUrl {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

impl fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Issued query urls, oldest first. Consumers can only append; the oldest
/// entries fall off once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct UrlHistory {
    entries: VecDeque<QueryUrl>,
    capacity: usize,
}

impl Default for UrlHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl UrlHistory {
    /// Capacity never drops below the recent-terms window.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(history::RECENT_TERMS_WINDOW);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, url: QueryUrl) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(url);
    }

    pub fn last(&self) -> Option<&QueryUrl> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryUrl> {
        self.entries.iter()
    }

    pub fn recent_terms(&self) -> Vec<String> {
        history::derive_recent_terms(self.iter())
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
