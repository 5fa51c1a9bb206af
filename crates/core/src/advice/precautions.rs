use crate::domain::profile::{HairType, SkinType};

/// Advisory tips for a profile, in fixed rule order: skin branch, retinol age
/// rule, low-BMI rule, high-BMI rule, then the hair branch. Rules are
/// independent and append-only; the order is user-visible and must not change.
pub fn derive_precautions(
    skin_type: SkinType,
    hair_type: Option<HairType>,
    age: Option<u32>,
    bmi: Option<f64>,
) -> Vec<String> {
    let mut tips = Vec::new();

    tips.push(
        match skin_type {
            SkinType::Oily => {
                "Prefer gel cleansers, 2% BHA once daily, oil-free moisturizer, SPF 50 PA++++."
            }
            SkinType::Dry => {
                "Use creamy cleanser, layer hyaluronic acid and ceramide moisturizer, avoid hot water, SPF 50."
            }
            SkinType::Combination => {
                "Spot-treat T-zone with BHA/niacinamide, hydrate cheeks, non-comedogenic SPF."
            }
            SkinType::Sensitive => {
                "Keep routine fragrance-free, patch test actives (AHA/BHA/retinol), prefer mineral sunscreen."
            }
        }
        .to_string(),
    );

    if age.is_some_and(|years| years >= 25) {
        tips.push(
            "Introduce nightly retinol gradually (2–3x/week) and daily antioxidant serum."
                .to_string(),
        );
    }

    if bmi.is_some_and(|value| value < 18.5) {
        tips.push(
            "Ensure adequate calories and protein to support skin and hair barrier.".to_string(),
        );
    }

    if bmi.is_some_and(|value| value >= 25.0) {
        tips.push(
            "Focus on balanced diet and hydration; manage sugar spikes that may aggravate acne."
                .to_string(),
        );
    }

    if let Some(hair) = hair_type {
        tips.push(
            match hair {
                HairType::Dry => {
                    "Use sulfate-free shampoo, weekly oiling (coconut/argan), deep-condition with shea/ceramide masks."
                }
                HairType::Oily => {
                    "Clarify 1–2x/week, lightweight conditioner on lengths only, avoid heavy oils on scalp."
                }
                HairType::Dandruff => {
                    "Use anti-dandruff shampoos (ketoconazole 2%, zinc pyrithione) 2–3x/week, leave on 5 minutes."
                }
                HairType::Hairfall => {
                    "Check ferritin, B12, D3; use gentle detangling and scalp massages; avoid tight hairstyles."
                }
            }
            .to_string(),
        );
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::derive_precautions;
    use crate::domain::profile::{HairType, SkinType};

    #[test]
    fn oily_underweight_adult_gets_three_tips_in_rule_order() {
        let tips = derive_precautions(SkinType::Oily, None, Some(30), Some(17.0));

        assert_eq!(tips.len(), 3);
        assert!(tips[0].starts_with("Prefer gel cleansers"));
        assert!(tips[1].starts_with("Introduce nightly retinol"));
        assert!(tips[2].starts_with("Ensure adequate calories"));
        assert!(!tips.iter().any(|tip| tip.starts_with("Focus on balanced diet")));
    }

    #[test]
    fn hair_tip_comes_last() {
        let tips =
            derive_precautions(SkinType::Dry, Some(HairType::Dandruff), Some(40), Some(26.0));

        assert_eq!(tips.len(), 4);
        assert!(tips[3].starts_with("Use anti-dandruff shampoos"));
    }

    #[test]
    fn no_hair_interest_means_no_hair_tip() {
        let tips = derive_precautions(SkinType::Sensitive, None, Some(20), None);

        assert_eq!(tips.len(), 1);
        assert!(tips[0].starts_with("Keep routine fragrance-free"));
    }

    #[test]
    fn unknown_age_and_bmi_contribute_nothing() {
        let tips = derive_precautions(SkinType::Combination, Some(HairType::Oily), None, None);

        assert_eq!(tips.len(), 2);
        assert!(tips[0].starts_with("Spot-treat T-zone"));
        assert!(tips[1].starts_with("Clarify 1–2x/week"));
    }

    #[test]
    fn output_is_stable_across_calls() {
        let first = derive_precautions(SkinType::Oily, Some(HairType::Hairfall), Some(27), Some(24.0));
        let second = derive_precautions(SkinType::Oily, Some(HairType::Hairfall), Some(27), Some(24.0));
        assert_eq!(first, second);
    }
}
