use std::sync::Arc;

use glowguide_core::advice::precautions::derive_precautions;
use glowguide_core::domain::analysis::AdviceSource;
use glowguide_core::domain::profile::Profile;

use crate::llm::{AdviceModel, AdviceRequest, InlineImage};
use crate::prompt::build_analysis_prompt;

/// Advice text plus where it came from, so callers can label the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceOutcome {
    pub text: String,
    pub source: AdviceSource,
}

/// Orchestrates one advice request: generative model when configured, local
/// rule-based text otherwise or on any model failure. No retries; a failed
/// call degrades in a single step (the transport owns its own timeout).
pub struct AdviceRuntime {
    model: Option<Arc<dyn AdviceModel>>,
}

impl AdviceRuntime {
    pub fn new(model: Option<Arc<dyn AdviceModel>>) -> Self {
        Self { model }
    }

    pub fn rule_based() -> Self {
        Self { model: None }
    }

    pub async fn advise(&self, profile: &Profile, image: Option<InlineImage>) -> AdviceOutcome {
        let Some(model) = &self.model else {
            return AdviceOutcome { text: local_advice(profile), source: AdviceSource::RuleBased };
        };

        let mut request = AdviceRequest::text(build_analysis_prompt(profile));
        if let Some(image) = image {
            request = request.with_image(image);
        }

        match model.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                AdviceOutcome { text, source: AdviceSource::Generative }
            }
            Ok(_) => {
                tracing::warn!("generative model returned empty advice, using rule-based text");
                AdviceOutcome { text: local_advice(profile), source: AdviceSource::RuleBased }
            }
            Err(error) => {
                tracing::warn!(error = %error, "generative advice failed, using rule-based text");
                AdviceOutcome { text: local_advice(profile), source: AdviceSource::RuleBased }
            }
        }
    }
}

/// Rule-based advice text mirroring the sections the generative prompt asks
/// for, composed from the deterministic precaution rules.
pub fn local_advice(profile: &Profile) -> String {
    let tips =
        derive_precautions(profile.skin_type, profile.hair_type, profile.age, profile.bmi());

    [
        "Likely causes: based on inputs, barrier imbalance and common issues for your profile."
            .to_string(),
        format!("Precautions: {}", tips.join(" ")),
        "Lifestyle: 2–3L water daily, 7–8h sleep, stress management, sunscreen every morning."
            .to_string(),
        "When to seek care: sudden painful swelling, bleeding lesions, severe infections, or \
         anything rapidly worsening."
            .to_string(),
    ]
    .join("\n")
}
