pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use app::pipelines::{ComparePipeline, ReleasePipeline};
pub use config::{AnalysisConfig, CompareConfig, ReleaseConfig};
pub use core::engine::{AnalysisEngine, RunOutcome};
pub use utils::error::{AnalysisError, Result};
