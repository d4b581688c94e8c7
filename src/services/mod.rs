//! External service integrations.

pub mod discord;
pub mod image;
