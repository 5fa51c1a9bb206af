use serde::{Deserialize, Serialize};

use crate::domain::profile::{HairType, SkinType};

/// Categorical label keying the nutrition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    Acne,
    Dullness,
    Dryness,
    Pigmentation,
    Hairfall,
    Dandruff,
}

impl Concern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acne => "acne",
            Self::Dullness => "dullness",
            Self::Dryness => "dryness",
            Self::Pigmentation => "pigmentation",
            Self::Hairfall => "hairfall",
            Self::Dandruff => "dandruff",
        }
    }
}

impl std::fmt::Display for Concern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infers concern tags from the profile. The result is an ordered,
/// deduplicated list so output ordering stays an explicit contract rather
/// than a property of set iteration.
pub fn infer_concerns(
    skin_type: SkinType,
    hair_type: Option<HairType>,
    known_cause: &str,
) -> Vec<Concern> {
    let mut concerns = Vec::new();

    if skin_type == SkinType::Oily {
        push_unique(&mut concerns, Concern::Acne);
    }
    if skin_type == SkinType::Dry {
        push_unique(&mut concerns, Concern::Dryness);
    }
    if hair_type == Some(HairType::Hairfall) {
        push_unique(&mut concerns, Concern::Hairfall);
    }
    if hair_type == Some(HairType::Dandruff) {
        push_unique(&mut concerns, Concern::Dandruff);
    }
    if known_cause.to_lowercase().contains("pigment") {
        push_unique(&mut concerns, Concern::Pigmentation);
    }

    concerns
}

fn push_unique(concerns: &mut Vec<Concern>, concern: Concern) {
    if !concerns.contains(&concern) {
        concerns.push(concern);
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_concerns, Concern};
    use crate::domain::profile::{HairType, SkinType};

    #[test]
    fn oily_skin_with_dandruff_yields_ordered_tags() {
        let concerns = infer_concerns(SkinType::Oily, Some(HairType::Dandruff), "");
        assert_eq!(concerns, vec![Concern::Acne, Concern::Dandruff]);
    }

    #[test]
    fn pigment_substring_match_is_case_insensitive() {
        let concerns = infer_concerns(SkinType::Combination, None, "sun Pigmentation patches");
        assert_eq!(concerns, vec![Concern::Pigmentation]);
    }

    #[test]
    fn no_inferable_concern_yields_empty_list() {
        let concerns = infer_concerns(SkinType::Sensitive, Some(HairType::Oily), "hard water");
        assert!(concerns.is_empty());
    }

    #[test]
    fn all_matching_rules_contribute() {
        let concerns = infer_concerns(SkinType::Dry, Some(HairType::Hairfall), "pigment marks");
        assert_eq!(concerns, vec![Concern::Dryness, Concern::Hairfall, Concern::Pigmentation]);
    }
}
