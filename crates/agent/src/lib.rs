//! Generative-advice boundary.
//!
//! This crate wraps the one failure-prone dependency of the product: the
//! hosted generative-language API. Everything deterministic lives in
//! `glowguide-core`; this crate only
//! - builds the analysis prompt from a profile (`prompt`)
//! - calls the Gemini `generateContent` endpoint behind a trait (`llm`,
//!   `gemini`)
//! - falls back to the local rule-based advice text when the call fails
//!   (`runtime`)
//!
//! # Safety principle
//!
//! The model is strictly an advisor. It never decides product tiers, budget
//! gating, or nutrition rows; those come from the deterministic engine and
//! are identical whether or not the model responds.

pub mod gemini;
pub mod llm;
pub mod prompt;
pub mod runtime;

pub use gemini::GeminiClient;
pub use llm::{AdviceModel, AdviceRequest, InlineImage};
pub use runtime::{AdviceOutcome, AdviceRuntime};
