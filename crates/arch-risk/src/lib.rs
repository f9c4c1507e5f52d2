//! arch-risk
//!
//! Rule-based glucose risk scoring. Pure functions with no I/O and no AWS
//! dependency. Covers trend detection over prior readings, additive scoring
//! into a risk tier, and the alerting decision.

pub mod alert;
pub mod scoring;
pub mod trend;
