//! Deterministic recommendation engine.
//!
//! Every function here is pure: immutable inputs, no clocks, no randomness,
//! no I/O. Identical inputs always produce byte-identical output, so callers
//! may recompute on every input change without side effects.

pub mod bmi;
pub mod concerns;
pub mod links;
pub mod nutrition;
pub mod precautions;
pub mod products;
pub mod routines;

use serde::{Deserialize, Serialize};

use crate::advice::concerns::Concern;
use crate::advice::nutrition::NutritionRow;
use crate::advice::products::{BudgetTier, ProductQuery};
use crate::advice::routines::RoutinePlan;
use crate::domain::profile::Profile;

/// Everything the engine derives from one profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdviceReport {
    pub bmi: Option<f64>,
    pub tier: BudgetTier,
    pub precautions: Vec<String>,
    pub concerns: Vec<Concern>,
    pub nutrition: Vec<NutritionRow>,
    pub routines: RoutinePlan,
    pub products: Vec<ProductQuery>,
}

pub trait AdviceEngine: Send + Sync {
    fn derive(&self, profile: &Profile) -> AdviceReport;
}

#[derive(Default)]
pub struct DeterministicAdviceEngine;

impl AdviceEngine for DeterministicAdviceEngine {
    fn derive(&self, profile: &Profile) -> AdviceReport {
        derive_report(profile)
    }
}

pub fn derive_report(profile: &Profile) -> AdviceReport {
    let bmi = bmi::compute_bmi(profile.weight_kg, profile.height_cm);
    let concerns =
        concerns::infer_concerns(profile.skin_type, profile.hair_type, &profile.known_cause);

    AdviceReport {
        bmi,
        tier: BudgetTier::from_budget(profile.budget),
        precautions: precautions::derive_precautions(
            profile.skin_type,
            profile.hair_type,
            profile.age,
            bmi,
        ),
        nutrition: nutrition::nutrition_focus(&concerns),
        routines: routines::routine_plan(profile.skin_type, profile.hair_type, profile.age),
        products: products::product_queries(Some(profile.skin_type), profile.hair_type, profile.budget),
        concerns,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{derive_report, AdviceEngine, DeterministicAdviceEngine};
    use crate::advice::concerns::Concern;
    use crate::advice::products::BudgetTier;
    use crate::domain::profile::{HairType, Profile, SkinType};

    fn profile() -> Profile {
        Profile {
            skin_type: SkinType::Oily,
            hair_type: Some(HairType::Dandruff),
            age: Some(30),
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            known_cause: "pigment spots after summer".to_string(),
            budget: Decimal::from(2000u32),
            gender: None,
            blood_group: None,
        }
    }

    #[test]
    fn report_composes_all_derivations() {
        let report = derive_report(&profile());

        assert_eq!(report.bmi, Some(22.9));
        assert_eq!(report.tier, BudgetTier::Premium);
        assert_eq!(
            report.concerns,
            vec![Concern::Acne, Concern::Dandruff, Concern::Pigmentation]
        );
        assert_eq!(report.nutrition.len(), 3);
        assert!(report.precautions[0].starts_with("Prefer gel cleansers"));
        assert!(report.products.iter().any(|item| item.label == "Vitamin C 10% serum"));
        assert!(!report.routines.hair.is_empty());
    }

    #[test]
    fn engine_is_referentially_transparent() {
        let engine = DeterministicAdviceEngine;
        let input = profile();

        let first = engine.derive(&input);
        let second = engine.derive(&input);
        assert_eq!(first, second);
    }
}
