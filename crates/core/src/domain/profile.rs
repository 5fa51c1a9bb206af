use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Skin category as selected by the user. Closed set: an unrecognized value is
/// rejected at the boundary instead of silently dropping advisory content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Sensitive,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oily => "oily",
            Self::Dry => "dry",
            Self::Combination => "combination",
            Self::Sensitive => "sensitive",
        }
    }
}

impl std::str::FromStr for SkinType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "oily" => Ok(Self::Oily),
            "dry" => Ok(Self::Dry),
            "combination" => Ok(Self::Combination),
            "sensitive" => Ok(Self::Sensitive),
            other => Err(DomainError::UnknownSkinType(other.to_string())),
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hair category. Only meaningful when the user asked for hair advice, which
/// callers encode as `Option<HairType>` on the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairType {
    Oily,
    Dry,
    Dandruff,
    Hairfall,
}

impl HairType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oily => "oily",
            Self::Dry => "dry",
            Self::Dandruff => "dandruff",
            Self::Hairfall => "hairfall",
        }
    }
}

impl std::str::FromStr for HairType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "oily" => Ok(Self::Oily),
            "dry" => Ok(Self::Dry),
            "dandruff" => Ok(Self::Dandruff),
            "hairfall" | "hair_fall" => Ok(Self::Hairfall),
            other => Err(DomainError::UnknownHairType(other.to_string())),
        }
    }
}

impl std::fmt::Display for HairType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Used only when composing the generative-advice prompt; the deterministic
/// engine never branches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
    PreferNot,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
            Self::PreferNot => "prefer not to say",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            "other" => Ok(Self::Other),
            "prefer_not" | "prefer-not" => Ok(Self::PreferNot),
            other => Err(DomainError::UnknownGender(other.to_string())),
        }
    }
}

/// User-supplied attributes consumed by the advice engine. Constructed once per
/// analysis and treated as immutable from then on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub skin_type: SkinType,
    /// `Some` only when the user asked for hair advice.
    pub hair_type: Option<HairType>,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    /// Free text; only used for substring-based concern inference.
    pub known_cause: String,
    /// Per-item budget, currency-agnostic.
    pub budget: Decimal,
    pub gender: Option<Gender>,
    pub blood_group: Option<String>,
}

impl Profile {
    pub fn new(skin_type: SkinType, budget: Decimal) -> Self {
        Self {
            skin_type,
            hair_type: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            known_cause: String::new(),
            budget,
            gender: None,
            blood_group: None,
        }
    }

    pub fn bmi(&self) -> Option<f64> {
        crate::advice::bmi::compute_bmi(self.weight_kg, self.height_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::{HairType, SkinType};
    use crate::errors::DomainError;

    #[test]
    fn skin_type_parses_known_values_case_insensitively() {
        assert_eq!("Oily".parse::<SkinType>().expect("oily"), SkinType::Oily);
        assert_eq!(" sensitive ".parse::<SkinType>().expect("sensitive"), SkinType::Sensitive);
    }

    #[test]
    fn skin_type_rejects_unknown_value() {
        let error = "normal".parse::<SkinType>().expect_err("unknown skin type should fail");
        assert!(matches!(error, DomainError::UnknownSkinType(ref value) if value == "normal"));
    }

    #[test]
    fn hair_type_accepts_hair_fall_alias() {
        assert_eq!("hair_fall".parse::<HairType>().expect("alias"), HairType::Hairfall);
    }

    #[test]
    fn hair_type_rejects_unknown_value() {
        let error = "curly".parse::<HairType>().expect_err("unknown hair type should fail");
        assert!(matches!(error, DomainError::UnknownHairType(_)));
    }
}
