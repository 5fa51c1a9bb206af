use async_trait::async_trait;
use thiserror::Error;

use glowguide_core::domain::analysis::{AnalysisId, SavedAnalysis};

pub mod analysis;
pub mod memory;

pub use analysis::SqlAnalysisRepository;
pub use memory::InMemoryAnalysisRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn save(&self, analysis: SavedAnalysis) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &AnalysisId) -> Result<Option<SavedAnalysis>, RepositoryError>;
    /// Most recent first.
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<SavedAnalysis>, RepositoryError>;
}
