//! arch-engine
//!
//! Turns a new glucose reading into a risk assessment: trend over prior
//! readings, additive scoring, advice, and the alert decision, run as one
//! operation with at most one assessment in flight per patient.

pub mod assessor;
pub mod error;
pub mod locks;
