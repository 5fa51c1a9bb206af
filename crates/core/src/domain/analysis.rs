use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::Profile;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the advice text came from: the generative model, or the local
/// rule-based fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    Generative,
    RuleBased,
}

impl AdviceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generative => "generative",
            Self::RuleBased => "rule_based",
        }
    }
}

impl std::str::FromStr for AdviceSource {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generative" => Ok(Self::Generative),
            "rule_based" => Ok(Self::RuleBased),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown advice source `{other}`"
            ))),
        }
    }
}

/// A completed analysis as persisted for a user. The profile snapshot keeps the
/// record self-contained so old analyses stay readable after rule changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedAnalysis {
    pub id: AnalysisId,
    pub user_id: String,
    pub profile: Profile,
    pub bmi: Option<f64>,
    pub advice_text: String,
    pub advice_source: AdviceSource,
    pub created_at: DateTime<Utc>,
}

impl SavedAnalysis {
    pub fn new(
        user_id: impl Into<String>,
        profile: Profile,
        advice_text: impl Into<String>,
        advice_source: AdviceSource,
    ) -> Self {
        let bmi = profile.bmi();
        Self {
            id: AnalysisId::generate(),
            user_id: user_id.into(),
            profile,
            bmi,
            advice_text: advice_text.into(),
            advice_source,
            created_at: Utc::now(),
        }
    }
}
