//! Interaction layer for VisMove: LLM-backed explainers.

pub mod openai_explainer;

pub use crate::openai_explainer::OpenAIExplainer;
