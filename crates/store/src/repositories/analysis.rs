use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use glowguide_core::domain::analysis::{AdviceSource, AnalysisId, SavedAnalysis};
use glowguide_core::domain::profile::Profile;

use super::{AnalysisRepository, RepositoryError};
use crate::DbPool;

pub struct SqlAnalysisRepository {
    pool: DbPool,
}

impl SqlAnalysisRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AnalysisRepository for SqlAnalysisRepository {
    async fn save(&self, analysis: SavedAnalysis) -> Result<(), RepositoryError> {
        let profile_json = serde_json::to_string(&analysis.profile)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;

        sqlx::query(
            "INSERT INTO analysis (id, user_id, profile_json, bmi, advice_text, advice_source, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(analysis.id.to_string())
        .bind(&analysis.user_id)
        .bind(profile_json)
        .bind(analysis.bmi)
        .bind(&analysis.advice_text)
        .bind(analysis.advice_source.as_str())
        .bind(analysis.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AnalysisId) -> Result<Option<SavedAnalysis>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, user_id, profile_json, bmi, advice_text, advice_source, created_at \
             FROM analysis WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_row).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<SavedAnalysis>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_id, profile_json, bmi, advice_text, advice_source, created_at \
             FROM analysis WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(decode_row).collect()
    }
}

fn decode_row(row: sqlx::sqlite::SqliteRow) -> Result<SavedAnalysis, RepositoryError> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|error| RepositoryError::Decode(format!("invalid analysis id: {error}")))?;

    let profile_json: String = row.get("profile_json");
    let profile: Profile = serde_json::from_str(&profile_json)
        .map_err(|error| RepositoryError::Decode(format!("invalid profile snapshot: {error}")))?;

    let advice_source: String = row.get("advice_source");
    let advice_source: AdviceSource = advice_source
        .parse()
        .map_err(|error| RepositoryError::Decode(format!("invalid advice source: {error}")))?;

    let created_at: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|error| RepositoryError::Decode(format!("invalid timestamp: {error}")))?
        .with_timezone(&Utc);

    Ok(SavedAnalysis {
        id: AnalysisId(id),
        user_id: row.get("user_id"),
        profile,
        bmi: row.get("bmi"),
        advice_text: row.get("advice_text"),
        advice_source,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use glowguide_core::domain::analysis::{AdviceSource, SavedAnalysis};
    use glowguide_core::domain::profile::{HairType, Profile, SkinType};

    use super::SqlAnalysisRepository;
    use crate::repositories::AnalysisRepository;
    use crate::{connect, migrations};

    async fn repository() -> SqlAnalysisRepository {
        let pool = connect("sqlite::memory:").await.expect("in-memory connect");
        migrations::run_pending(&pool).await.expect("migrations apply");
        SqlAnalysisRepository::new(pool)
    }

    fn analysis(user_id: &str) -> SavedAnalysis {
        let mut profile = Profile::new(SkinType::Dry, Decimal::from(500u32));
        profile.hair_type = Some(HairType::Hairfall);
        profile.weight_kg = Some(52.0);
        profile.height_cm = Some(160.0);
        SavedAnalysis::new(user_id, profile, "Precautions: ...", AdviceSource::RuleBased)
    }

    #[tokio::test]
    async fn save_then_find_round_trips_the_record() {
        let repository = repository().await;
        let saved = analysis("user-1");

        repository.save(saved.clone()).await.expect("save");
        let found = repository.find_by_id(&saved.id).await.expect("find").expect("record exists");

        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn list_for_user_filters_and_orders_newest_first() {
        let repository = repository().await;

        let mut older = analysis("user-1");
        older.created_at -= chrono::Duration::hours(2);
        let newer = analysis("user-1");
        let other = analysis("user-2");

        repository.save(older.clone()).await.expect("save older");
        repository.save(newer.clone()).await.expect("save newer");
        repository.save(other).await.expect("save other user");

        let listed = repository.list_for_user("user-1", 10).await.expect("list");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn list_for_user_honors_limit() {
        let repository = repository().await;
        for _ in 0..3 {
            repository.save(analysis("user-1")).await.expect("save");
        }

        let listed = repository.list_for_user("user-1", 2).await.expect("list");
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn find_missing_id_returns_none() {
        let repository = repository().await;
        let missing = analysis("user-1");

        let found = repository.find_by_id(&missing.id).await.expect("find");
        assert!(found.is_none());
    }
}
