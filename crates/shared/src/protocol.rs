use serde::{Deserialize, Serialize};

use crate::{
    domain::{SearchPage, StoryId, StoryRecord},
    error::RecordError,
};

/// Payload returned by the search endpoint. Only the fields the client reads
/// are modelled; everything else in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<RawHit>,
    pub page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "objectID")]
    pub object_id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub num_comments: Option<i64>,
    pub points: Option<i64>,
}

impl TryFrom<RawHit> for StoryRecord {
    type Error = RecordError;

    fn try_from(raw: RawHit) -> Result<Self, Self::Error> {
        let num_comments = raw
            .num_comments
            .ok_or(RecordError::MissingField("num_comments"))?;
        let num_comments =
            u32::try_from(num_comments).map_err(|_| RecordError::OutOfRange {
                field: "num_comments",
                value: num_comments,
            })?;

        Ok(Self {
            object_id: StoryId(raw.object_id.ok_or(RecordError::MissingField("objectID"))?),
            url: raw.url,
            title: raw.title.ok_or(RecordError::MissingField("title"))?,
            author: raw.author.ok_or(RecordError::MissingField("author"))?,
            num_comments,
            points: raw.points.ok_or(RecordError::MissingField("points"))?,
        })
    }
}

impl SearchResponse {
    /// Maps every hit; one unmappable hit fails the whole page.
    pub fn into_page(self) -> Result<SearchPage, RecordError> {
        let hits = self
            .hits
            .into_iter()
            .map(StoryRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchPage {
            hits,
            page: self.page,
        })
    }
}
