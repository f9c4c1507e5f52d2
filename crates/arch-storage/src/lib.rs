//! arch-storage
//!
//! S3 persistence for readings, assessments, and alerts. Thin wrapper around
//! the AWS S3 SDK plus the reading-history adapter the engine consumes.

pub mod client;
pub mod error;
pub mod objects;
pub mod readings;
pub mod state;
