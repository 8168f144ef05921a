use crate::error::SearchError;
use crate::location::LocationEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchMessage {
    pub message: String,
}

/// What the search box receives. Serialized untagged, so callers see either a
/// JSON array of locations or `{ "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(Vec<LocationEntry>),
    Failed(SearchMessage),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn results(&self) -> Option<&[LocationEntry]> {
        match self {
            Self::Found(results) => Some(results),
            Self::Failed(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::Failed(failure) => Some(&failure.message),
        }
    }
}

impl From<SearchError> for SearchMessage {
    fn from(err: SearchError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<Result<Vec<LocationEntry>, SearchError>> for SearchOutcome {
    fn from(result: Result<Vec<LocationEntry>, SearchError>) -> Self {
        match result {
            Ok(results) => Self::Found(results),
            Err(err) => Self::Failed(err.into()),
        }
    }
}
