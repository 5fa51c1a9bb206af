pub mod advice;
pub mod config;
pub mod domain;
pub mod errors;

pub use advice::bmi::compute_bmi;
pub use advice::concerns::{infer_concerns, Concern};
pub use advice::links::{affiliate_link, Platform};
pub use advice::nutrition::{nutrition_focus, NutritionRow};
pub use advice::precautions::derive_precautions;
pub use advice::products::{product_queries, BudgetTier, ProductQuery};
pub use advice::routines::{routine_plan, RoutinePlan};
pub use advice::{derive_report, AdviceEngine, AdviceReport, DeterministicAdviceEngine};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::analysis::{AdviceSource, AnalysisId, SavedAnalysis};
pub use domain::profile::{Gender, HairType, Profile, SkinType};
pub use errors::{ApplicationError, DomainError, InterfaceError};
