use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::RecommendationTable,
    services::stores::RecommendationStore,
};

/// Longest subject key accepted at the reader boundary
pub const MAX_SUBJECT_KEY_LEN: usize = 128;

/// Rejects subject keys that can never name a legitimate row
///
/// Quotes and other punctuation are allowed; they are bound as parameters.
/// Empty keys, oversized keys and control characters are refused outright
/// rather than looked up and reported as missing.
pub fn validate_subject_key(subject_key: &str) -> AppResult<()> {
    if subject_key.is_empty() {
        return Err(AppError::UnsafeSubjectKey("empty subject key".to_string()));
    }

    if subject_key.len() > MAX_SUBJECT_KEY_LEN {
        return Err(AppError::UnsafeSubjectKey(format!(
            "subject key exceeds {} bytes",
            MAX_SUBJECT_KEY_LEN
        )));
    }

    if subject_key.chars().any(char::is_control) {
        return Err(AppError::UnsafeSubjectKey(format!(
            "subject key {:?} contains control characters",
            subject_key
        )));
    }

    Ok(())
}

/// Reads precomputed recommendation rows as ordered show id lists
#[derive(Clone)]
pub struct RowReader {
    store: Arc<dyn RecommendationStore>,
}

impl RowReader {
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        Self { store }
    }

    /// Returns the show ids in slots `1..=table.slot_count()`, in slot order
    ///
    /// A missing row yields an empty list. Absent or blank slots are skipped
    /// without ending iteration. Store failures propagate.
    pub async fn read_row(
        &self,
        table: &RecommendationTable,
        subject_key: &str,
    ) -> AppResult<Vec<String>> {
        validate_subject_key(subject_key)?;

        let Some(row) = self.store.get_row(table, subject_key).await? else {
            tracing::debug!(table = %table, subject_key = %subject_key, "No recommendation row");
            return Ok(Vec::new());
        };

        let ids: Vec<String> = row
            .slots
            .into_iter()
            .take(table.slot_count())
            .flatten()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        tracing::debug!(
            table = %table,
            subject_key = %subject_key,
            ids = ids.len(),
            "Read recommendation row"
        );

        Ok(ids)
    }
}
