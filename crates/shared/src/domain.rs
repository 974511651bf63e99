use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(StoryId);

/// One search hit. Identity is `object_id`; two records with the same id are
/// the same story even if the other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub object_id: StoryId,
    /// Text posts carry no link.
    pub url: Option<String>,
    pub title: String,
    pub author: String,
    pub num_comments: u32,
    pub points: i64,
}

impl StoryRecord {
    pub fn same_story(&self, other: &StoryRecord) -> bool {
        self.object_id == other.object_id
    }
}

/// A successfully mapped page of results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub hits: Vec<StoryRecord>,
    pub page: u32,
}
