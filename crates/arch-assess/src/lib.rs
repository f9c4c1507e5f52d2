//! arch-assess
//!
//! Batch entry point for the assessment engine: newline-delimited JSON
//! requests in, one JSON result per line out.

pub mod config;
pub mod stream;
