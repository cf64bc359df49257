pub mod compare_pipeline;
pub mod release_pipeline;

pub use compare_pipeline::ComparePipeline;
pub use release_pipeline::ReleasePipeline;
