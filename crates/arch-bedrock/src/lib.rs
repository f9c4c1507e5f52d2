//! arch-bedrock
//!
//! Patient advice generation. Bedrock model invocation behind a narrow
//! text-generation seam, with deterministic rule-based advice as fallback.

pub mod advice;
pub mod client;
pub mod error;
pub mod generate;
pub mod prompt;
pub mod rules;
