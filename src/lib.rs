//! Asset Assistant Library
//!
//! Classifies staged artwork by filename, matches it to movie, show and
//! collection folders, and renames it into place for Kometa, Plex or Kodi.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
