//! Core business logic modules.

pub mod classifier;
pub mod executor;
pub mod library;
pub mod matcher;
pub mod normalizer;
pub mod planner;
pub mod processor;
pub mod scanner;
