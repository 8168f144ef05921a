use thiserror::Error;

/// Failures a search caller can see. The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter a search term.")]
    EmptyQuery,

    #[error("Please enter at least 2 characters to search.")]
    QueryTooShort,

    /// Root cause is logged at the boundary and never exposed.
    #[error("An error occurred during search. Please try again.")]
    Internal,
}

impl SearchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::QueryTooShort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_search_box_copy() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Please enter a search term.");
        assert_eq!(
            SearchError::QueryTooShort.to_string(),
            "Please enter at least 2 characters to search."
        );
        assert_eq!(
            SearchError::Internal.to_string(),
            "An error occurred during search. Please try again."
        );
    }

    #[test]
    fn internal_is_not_validation() {
        assert!(SearchError::EmptyQuery.is_validation());
        assert!(SearchError::QueryTooShort.is_validation());
        assert!(!SearchError::Internal.is_validation());
    }
}
