use serde::{Deserialize, Serialize};

use crate::domain::profile::{HairType, SkinType};

/// Morning and night skin routines plus optional hair-care steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutinePlan {
    pub morning: Vec<String>,
    pub night: Vec<String>,
    pub hair: Vec<String>,
}

pub fn routine_plan(
    skin_type: SkinType,
    hair_type: Option<HairType>,
    age: Option<u32>,
) -> RoutinePlan {
    RoutinePlan {
        morning: morning_steps(skin_type),
        night: night_steps(skin_type, age),
        hair: hair_type.map(hair_steps).unwrap_or_default(),
    }
}

fn morning_steps(skin_type: SkinType) -> Vec<String> {
    let steps: &[&str] = match skin_type {
        SkinType::Dry => &[
            "Hydrating cleanser",
            "Hyaluronic acid serum on damp skin",
            "Ceramide moisturizer",
            "SPF 50 PA++++ sunscreen",
        ],
        SkinType::Oily => &[
            "Gel cleanser",
            "Niacinamide 5%",
            "Lightweight moisturizer",
            "SPF 50 PA++++ sunscreen",
        ],
        SkinType::Combination => &[
            "Gentle cleanser",
            "Niacinamide 5% or BHA on T-zone",
            "Non-comedogenic moisturizer",
            "SPF 50 PA++++ sunscreen",
        ],
        SkinType::Sensitive => &[
            "Mild, fragrance-free cleanser",
            "Soothing serum (panthenol/centella)",
            "Ceramide moisturizer",
            "Mineral sunscreen SPF 50",
        ],
    };

    owned(steps)
}

fn night_steps(skin_type: SkinType, age: Option<u32>) -> Vec<String> {
    let steps: &[&str] = match skin_type {
        SkinType::Dry => {
            &["Creamy cleanser", "Layer hydrating toner/essence", "Rich ceramide moisturizer or sleeping mask"]
        }
        SkinType::Oily => {
            &["Gentle cleanser", "2% BHA (start 3x/week)", "Non-comedogenic moisturizer"]
        }
        SkinType::Combination => {
            &["Cleanser", "Targeted treatment on T-zone", "Hydrating cream on cheeks"]
        }
        SkinType::Sensitive => {
            &["Fragrance-free cleanser", "Barrier serum or squalane", "Ceramide cream"]
        }
    };

    let mut night = owned(steps);
    if age.is_some_and(|years| years >= 25) {
        night.push("Introduce retinol gradually (2–3x/week).".to_string());
    }
    night
}

fn hair_steps(hair_type: HairType) -> Vec<String> {
    let steps: &[&str] = match hair_type {
        HairType::Oily => {
            &["Shampoo 2–3x/week; focus on scalp", "Light conditioner on lengths only"]
        }
        HairType::Dry => &["Sulfate-free shampoo", "Weekly oiling and deep-conditioning"],
        HairType::Dandruff => {
            &["Ketoconazole 2% shampoo 2–3x/week (leave on 5 minutes)", "Alternate with gentle shampoo"]
        }
        HairType::Hairfall => {
            &["Check ferritin, B12, D3 with your doctor", "Gentle detangling; avoid tight hairstyles"]
        }
    };

    owned(steps)
}

fn owned(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|step| step.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::routine_plan;
    use crate::domain::profile::{HairType, SkinType};

    #[test]
    fn dry_skin_morning_routine_ends_with_sunscreen() {
        let plan = routine_plan(SkinType::Dry, None, None);

        assert_eq!(plan.morning.len(), 4);
        assert_eq!(plan.morning[3], "SPF 50 PA++++ sunscreen");
        assert!(plan.hair.is_empty());
    }

    #[test]
    fn retinol_step_appears_from_age_25() {
        let young = routine_plan(SkinType::Oily, None, Some(24));
        let adult = routine_plan(SkinType::Oily, None, Some(25));

        assert_eq!(young.night.len(), 3);
        assert_eq!(adult.night.len(), 4);
        assert!(adult.night[3].contains("retinol"));
    }

    #[test]
    fn dandruff_hair_steps_mention_ketoconazole() {
        let plan = routine_plan(SkinType::Combination, Some(HairType::Dandruff), None);

        assert_eq!(plan.hair.len(), 2);
        assert!(plan.hair[0].contains("Ketoconazole"));
    }
}
