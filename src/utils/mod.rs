//! Utility modules.

pub mod fs;
pub mod hash;
pub mod logs;
