use serde::{Deserialize, Serialize};

use crate::advice::concerns::Concern;

/// One row of the nutrition-focus table: nutrients to prioritize and Indian
/// foods that supply them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionRow {
    pub concern: Concern,
    pub nutrients: Vec<String>,
    pub foods: Vec<String>,
}

/// Maps concern tags to nutrition rows, preserving input order. An empty input
/// substitutes the default pair [dullness, dryness]. `Concern` is a closed
/// enum, so every tag resolves to exactly one table row.
pub fn nutrition_focus(concerns: &[Concern]) -> Vec<NutritionRow> {
    let keys: &[Concern] =
        if concerns.is_empty() { &[Concern::Dullness, Concern::Dryness] } else { concerns };

    keys.iter().map(|concern| table_row(*concern)).collect()
}

fn table_row(concern: Concern) -> NutritionRow {
    let (nutrients, foods): (&[&str], &[&str]) = match concern {
        Concern::Acne => {
            (&["Zinc", "Vitamin A", "Omega-3"], &["chana, rajma", "carrot, spinach", "flaxseed, walnut"])
        }
        Concern::Dullness => {
            (&["Vitamin C", "Vitamin E"], &["amla, orange", "almond, sunflower seeds"])
        }
        Concern::Dryness => {
            (&["Essential fats", "Ceramide precursors"], &["ghee in moderation", "soy, dairy, millets"])
        }
        Concern::Pigmentation => {
            (&["Vitamin C", "Antioxidants"], &["guava, amla", "green tea, berries"])
        }
        Concern::Hairfall => {
            (&["Protein", "Iron", "Biotin"], &["paneer, dal, eggs", "spinach, jaggery", "peanuts, til"])
        }
        Concern::Dandruff => (&["Zinc", "B-vitamins"], &["pumpkin seeds", "whole grains, curd"]),
    };

    NutritionRow {
        concern,
        nutrients: nutrients.iter().map(|value| value.to_string()).collect(),
        foods: foods.iter().map(|value| value.to_string()).collect(),
    }
}
