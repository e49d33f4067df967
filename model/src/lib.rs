//! Declarative model-building types and the native backend boundary they render into.

mod config;
mod error;
pub mod initialization;
pub mod native;
pub mod optimization;
pub mod regularization;

pub use config::{ModelConfig, load_config};
pub use error::{ModelErr, Result};
