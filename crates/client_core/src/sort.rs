use std::{fmt, str::FromStr};

use shared::domain::StoryRecord;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Author,
    Comment,
    Point,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::Title,
        SortKey::Author,
        SortKey::Comment,
        SortKey::Point,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Comment => "comment",
            SortKey::Point => "point",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key {0:?} (expected none, title, author, comment or point)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let key = match normalized.as_str() {
            "none" => SortKey::None,
            "title" => SortKey::Title,
            "author" => SortKey::Author,
            "comment" | "comments" => SortKey::Comment,
            "point" | "points" => SortKey::Point,
            _ => return Err(UnknownSortKey(raw.to_string())),
        };
        Ok(key)
    }
}

/// Column sort selection. UI-local; never stored alongside the stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub reversed: bool,
}

impl SortSpec {
    /// Clicking the active column flips the direction; clicking another
    /// column activates it in its default direction.
    pub fn click(self, key: SortKey) -> Self {
        if key == self.key {
            Self {
                key,
                reversed: !self.reversed,
            }
        } else {
            Self {
                key,
                reversed: false,
            }
        }
    }
}

/// Returns display order without touching `items`. Text columns sort
/// ascending, numeric columns descending; `reversed` flips the result. All
/// sorts are stable.
pub fn sort_stories(items: &[StoryRecord], spec: SortSpec) -> Vec<&StoryRecord> {
    let mut ordered: Vec<&StoryRecord> = items.iter().collect();

    match spec.key {
        SortKey::None => {}
        SortKey::Title => ordered.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => ordered.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comment => {
            ordered.sort_by_key(|story| story.num_comments);
            ordered.reverse();
        }
        SortKey::Point => {
            ordered.sort_by_key(|story| story.points);
            ordered.reverse();
        }
    }

    if spec.reversed {
        ordered.reverse();
    }
    ordered
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
