//! Data models.

pub mod asset;
pub mod config;
pub mod plan;
pub mod tally;
