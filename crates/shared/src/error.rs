use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("search hit is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("search hit field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}
