use serde::{Deserialize, Serialize};

/// Lifecycle of a document's ingestion run. Completed and Failed are
/// terminal; a document never leaves a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingStatus {
    Pending,
    Processing,
    Completed,
    Failed(String),
}

impl EmbeddingStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, EmbeddingStatus::Pending)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, EmbeddingStatus::Processing)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, EmbeddingStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, EmbeddingStatus::Failed(_))
    }

    pub fn is_terminal(&self) -> bool {
        self.is_completed() || self.is_failed()
    }

    /// Unsupported uploads may fail straight from Pending; everything else
    /// passes through Processing first.
    pub fn can_transition_to(&self, new_status: &EmbeddingStatus) -> bool {
        matches!(
            (self, new_status),
            (EmbeddingStatus::Pending, EmbeddingStatus::Processing)
                | (EmbeddingStatus::Pending, EmbeddingStatus::Failed(_))
                | (EmbeddingStatus::Processing, EmbeddingStatus::Completed)
                | (EmbeddingStatus::Processing, EmbeddingStatus::Failed(_))
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            EmbeddingStatus::Pending => "pending",
            EmbeddingStatus::Processing => "processing",
            EmbeddingStatus::Completed => "completed",
            EmbeddingStatus::Failed(_) => "failed",
        }
    }

    pub fn error_detail(&self) -> Option<&str> {
        match self {
            EmbeddingStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Rebuild from a persisted status column plus its error column.
    pub fn from_str_with_error(status: &str, error: Option<String>) -> Self {
        match status {
            "processing" => EmbeddingStatus::Processing,
            "completed" => EmbeddingStatus::Completed,
            "failed" => EmbeddingStatus::Failed(error.unwrap_or_default()),
            _ => EmbeddingStatus::Pending,
        }
    }
}

impl Default for EmbeddingStatus {
    fn default() -> Self {
        EmbeddingStatus::Pending
    }
}

impl std::fmt::Display for EmbeddingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        let pending = EmbeddingStatus::Pending;
        assert!(pending.can_transition_to(&EmbeddingStatus::Processing));
        assert!(pending.can_transition_to(&EmbeddingStatus::Failed("bad type".to_string())));
        assert!(!pending.can_transition_to(&EmbeddingStatus::Completed));

        let processing = EmbeddingStatus::Processing;
        assert!(processing.can_transition_to(&EmbeddingStatus::Completed));
        assert!(processing.can_transition_to(&EmbeddingStatus::Failed("oops".to_string())));
        assert!(!processing.can_transition_to(&EmbeddingStatus::Pending));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [
            EmbeddingStatus::Completed,
            EmbeddingStatus::Failed("error".to_string()),
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(&EmbeddingStatus::Pending));
            assert!(!terminal.can_transition_to(&EmbeddingStatus::Processing));
            assert!(!terminal.can_transition_to(&EmbeddingStatus::Completed));
        }
    }

    #[test]
    fn test_round_trip_through_columns() {
        let status = EmbeddingStatus::Failed("embedding service down".to_string());
        let rebuilt = EmbeddingStatus::from_str_with_error(
            status.as_str(),
            status.error_detail().map(String::from),
        );
        assert_eq!(status, rebuilt);
        assert_eq!(rebuilt.error_detail(), Some("embedding service down"));
    }
}
