use std::sync::Mutex;

use async_trait::async_trait;

use glowguide_core::domain::analysis::{AnalysisId, SavedAnalysis};

use super::{AnalysisRepository, RepositoryError};

/// In-memory repository for tests and wiring that does not need durability.
#[derive(Default)]
pub struct InMemoryAnalysisRepository {
    records: Mutex<Vec<SavedAnalysis>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save(&self, analysis: SavedAnalysis) -> Result<(), RepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Decode("repository lock poisoned".to_string()))?;
        records.push(analysis);
        Ok(())
    }

    async fn find_by_id(&self, id: &AnalysisId) -> Result<Option<SavedAnalysis>, RepositoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Decode("repository lock poisoned".to_string()))?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<SavedAnalysis>, RepositoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Decode("repository lock poisoned".to_string()))?;

        let mut matching: Vec<SavedAnalysis> =
            records.iter().filter(|record| record.user_id == user_id).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }
}
