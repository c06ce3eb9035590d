use crate::empleado::RecordKey;

/// Result of a best-effort batch delete.
///
/// Batch deletes are not atomic. Keys the store refused to process after all
/// retries are returned in `unprocessed` instead of failing the whole call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDeleteOutcome {
    /// Number of keys the store accepted for deletion.
    pub deleted: usize,
    /// Keys still pending when retries ran out.
    pub unprocessed: Vec<RecordKey>,
}

impl BatchDeleteOutcome {
    /// Returns true when every requested key was deleted.
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_outcome_is_complete() {
        let outcome = BatchDeleteOutcome::default();
        assert!(outcome.is_complete());
        assert_eq!(outcome.deleted, 0);
    }

    #[test]
    fn test_outcome_with_leftovers_is_incomplete() {
        let outcome = BatchDeleteOutcome {
            deleted: 3,
            unprocessed: vec![RecordKey::log(Uuid::new_v4())],
        };
        assert!(!outcome.is_complete());
    }
}
