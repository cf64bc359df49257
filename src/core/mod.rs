pub mod deviation;
pub mod engine;
pub mod release_parser;
pub mod reverse_lines;
pub mod session;
pub mod timing_csv;

pub use crate::domain::model::{ReleaseAnalysis, ReleaseRecord, TimingSeries};
pub use crate::domain::ports::{CompareSettings, Pipeline, ReleaseSettings, Storage};
pub use crate::utils::error::Result;
