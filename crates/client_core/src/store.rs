//! The stories reducer. `StoriesState` is only ever changed by running an
//! action through [`reduce`]; nothing else has write access to its fields.

use serde::{Deserialize, Serialize};
use shared::domain::StoryRecord;

use crate::error::InvalidActionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoriesAction {
    FetchInit,
    /// `page == 0` replaces the list; any later page is appended.
    FetchSuccess { list: Vec<StoryRecord>, page: u32 },
    FetchFailure,
    /// Removes by `object_id`, not by full value.
    RemoveItem(StoryRecord),
}

impl StoriesAction {
    /// Decodes an action from its tagged JSON form, e.g.
    /// `{"type":"FETCH_SUCCESS","payload":{"list":[],"page":0}}`.
    pub fn decode(raw: &str) -> Result<Self, InvalidActionError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchInit => "FETCH_INIT",
            Self::FetchSuccess { .. } => "FETCH_SUCCESS",
            Self::FetchFailure => "FETCH_FAILURE",
            Self::RemoveItem(_) => "REMOVE_ITEM",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoriesState {
    items: Vec<StoryRecord>,
    current_page: u32,
    is_loading: bool,
    is_error: bool,
}

impl StoriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertion order; display order comes from [`crate::sort::sort_stories`].
    pub fn items(&self) -> &[StoryRecord] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn sum_comments(&self) -> u64 {
        sum_comments(&self.items)
    }

    /// Replaces `self` with the result of `reduce`.
    pub fn dispatch(&mut self, action: StoriesAction) {
        *self = reduce(std::mem::take(self), action);
    }
}

pub fn reduce(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess { list, page } => {
            let items = if page == 0 {
                list
            } else {
                let mut items = state.items;
                items.extend(list);
                items
            };
            StoriesState {
                items,
                current_page: page,
                is_loading: false,
                is_error: false,
            }
        }
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::RemoveItem(story) => {
            let mut items = state.items;
            items.retain(|item| !item.same_story(&story));
            StoriesState { items, ..state }
        }
    }
}

pub fn sum_comments(items: &[StoryRecord]) -> u64 {
    items.iter().map(|story| u64::from(story.num_comments)).sum()
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
