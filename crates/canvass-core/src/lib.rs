//! Canvass Core — domain models, error taxonomy, repository traits, and
//! role promotion rules shared across all crates.

pub mod error;
pub mod models;
pub mod promotion;
pub mod repository;
