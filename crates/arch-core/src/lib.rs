//! arch-core
//!
//! Pure domain types, S3 key conventions, and the reading-history capability.
//! No AWS SDK dependency; this is the shared vocabulary of the ARCH system.

pub mod error;
pub mod store;
pub mod models;
pub mod s3_keys;
