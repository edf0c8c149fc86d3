pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::audit::{MemoryAuditSink, TracingAuditSink};
pub use crate::config::CatalogConfig;
pub use crate::core::showcase::{Demo, Showcase};
pub use crate::utils::error::{CatalogError, Result};
