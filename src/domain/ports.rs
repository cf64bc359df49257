use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    type Reader: Read + Seek + Send;

    /// Opens an input file for (possibly backward) reading.
    fn open(&self, path: &Path) -> Result<Self::Reader>;

    /// Lists the regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Resolves an output file name, creating the output directory if needed.
    fn output_path(&self, name: &str) -> Result<PathBuf>;
}

pub trait ReleaseSettings: Send + Sync {
    fn syslog_path(&self) -> &Path;
    fn program_tag(&self) -> &str;
    fn image_size(&self) -> (u32, u32);
}

pub trait CompareSettings: Send + Sync {
    fn input_dir(&self) -> &Path;
    fn all_plot_name(&self) -> &str;
    fn filtered_plot_name(&self) -> &str;
    fn exclude_pattern(&self) -> &str;
    fn image_size(&self) -> (u32, u32);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Input: Send;
    type Output: Send + Sync;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Input>;
    async fn transform(&self, data: Self::Input) -> Result<Self::Output>;
    async fn load(&self, result: &Self::Output) -> Result<Vec<PathBuf>>;
}
