use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::profile::{HairType, SkinType};

/// Budget tier gating the higher-cost items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    Mid,
    Premium,
}

impl BudgetTier {
    /// Thresholds: ≤600 budget, ≤1500 mid, above that premium.
    pub fn from_budget(budget: Decimal) -> Self {
        if budget <= Decimal::from(600u32) {
            Self::Budget
        } else if budget <= Decimal::from(1500u32) {
            Self::Mid
        } else {
            Self::Premium
        }
    }
}

/// A display label plus the search text fed to the affiliate link builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub label: String,
    pub search_query: String,
}

impl ProductQuery {
    fn new(label: &str, search_query: &str) -> Self {
        Self { label: label.to_string(), search_query: search_query.to_string() }
    }
}

/// Builds the ordered product list: skin group first, hair group second, each
/// in a fixed enumeration order. Tier-gated items appear only above the budget
/// tier.
pub fn product_queries(
    skin_type: Option<SkinType>,
    hair_type: Option<HairType>,
    budget: Decimal,
) -> Vec<ProductQuery> {
    let tier = BudgetTier::from_budget(budget);
    let mut items = Vec::new();

    if let Some(skin) = skin_type {
        items.push(ProductQuery::new(
            "Gentle cleanser (fragrance-free)",
            "gentle cleanser fragrance free pH balanced",
        ));
        if matches!(skin, SkinType::Oily | SkinType::Combination) {
            items.push(ProductQuery::new("2% BHA exfoliant", "BHA 2% salicylic acid leave on"));
        }
        if skin == SkinType::Dry {
            items.push(ProductQuery::new("Ceramide moisturizer", "ceramide moisturizer dry skin"));
        }
        items.push(ProductQuery::new("Niacinamide 5% serum", "niacinamide 5% serum"));
        items.push(ProductQuery::new(
            "Sunscreen SPF 50 PA++++",
            "sunscreen SPF 50 PA++++ broad spectrum",
        ));
        if tier != BudgetTier::Budget {
            items.push(ProductQuery::new("Vitamin C 10% serum", "vitamin C 10% l-ascorbic"));
        }
    }

    if let Some(hair) = hair_type {
        items.push(ProductQuery::new("Sulfate-free shampoo", "sulfate free shampoo"));
        if hair == HairType::Dandruff {
            items.push(ProductQuery::new("Ketoconazole 2% shampoo", "ketoconazole 2% shampoo"));
        }
        items.push(ProductQuery::new(
            "Lightweight conditioner",
            "lightweight conditioner silicone free",
        ));
        if tier != BudgetTier::Budget {
            items.push(ProductQuery::new("Hair mask weekly", "repair hair mask ceramide protein"));
        }
    }

    items
}
