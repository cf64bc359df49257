use super::toml_config::{CompareSection, ReleasesSection};
use crate::core::release_parser::DEFAULT_PROGRAM_TAG;
use crate::core::timing_csv::DEFAULT_EXCLUDE_PATTERN;
use crate::domain::ports::{CompareSettings, ReleaseSettings};
use crate::render::{comparison_chart, release_chart};
use crate::utils::error::{AnalysisError, Result};
use crate::utils::validation::{
    validate_image_size, validate_non_empty_string, validate_path, validate_png_file_name,
    Validate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SYSLOG_PATH: &str = "/var/log/syslog";
pub const DEFAULT_DIR: &str = ".";

/// Fully resolved settings of the `releases` command.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseConfig {
    pub syslog_path: PathBuf,
    pub program_tag: String,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        let (width, height) = release_chart::DEFAULT_SIZE;
        Self {
            syslog_path: PathBuf::from(DEFAULT_SYSLOG_PATH),
            program_tag: DEFAULT_PROGRAM_TAG.to_string(),
            output_dir: PathBuf::from(DEFAULT_DIR),
            width,
            height,
        }
    }
}

impl ReleaseConfig {
    /// 以檔案設定覆蓋預設值
    pub fn from_section(section: Option<&ReleasesSection>) -> Self {
        let mut config = Self::default();
        let Some(section) = section else {
            return config;
        };

        if let Some(path) = &section.syslog_path {
            config.syslog_path = PathBuf::from(path);
        }
        if let Some(tag) = &section.program_tag {
            config.program_tag = tag.clone();
        }
        if let Some(dir) = &section.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(width) = section.width {
            config.width = width;
        }
        if let Some(height) = section.height {
            config.height = height;
        }
        config
    }
}

impl ReleaseSettings for ReleaseConfig {
    fn syslog_path(&self) -> &Path {
        &self.syslog_path
    }

    fn program_tag(&self) -> &str {
        &self.program_tag
    }

    fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Validate for ReleaseConfig {
    fn validate(&self) -> Result<()> {
        validate_path("releases.syslog_path", &self.syslog_path.to_string_lossy())?;
        validate_non_empty_string("releases.program_tag", &self.program_tag)?;
        validate_path("releases.output_dir", &self.output_dir.to_string_lossy())?;
        validate_image_size("releases", (self.width, self.height))
    }
}

/// Fully resolved settings of the `compare` command.
#[derive(Debug, Clone, Serialize)]
pub struct CompareConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub all_plot_name: String,
    pub filtered_plot_name: String,
    pub exclude_pattern: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        let (width, height) = comparison_chart::DEFAULT_SIZE;
        Self {
            input_dir: PathBuf::from(DEFAULT_DIR),
            output_dir: PathBuf::from(DEFAULT_DIR),
            all_plot_name: comparison_chart::DEFAULT_ALL_PLOT_NAME.to_string(),
            filtered_plot_name: comparison_chart::DEFAULT_FILTERED_PLOT_NAME.to_string(),
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
            width,
            height,
        }
    }
}

impl CompareConfig {
    pub fn from_section(section: Option<&CompareSection>) -> Self {
        let mut config = Self::default();
        let Some(section) = section else {
            return config;
        };

        if let Some(dir) = &section.input_dir {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = &section.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(name) = &section.all_plot_name {
            config.all_plot_name = name.clone();
        }
        if let Some(name) = &section.filtered_plot_name {
            config.filtered_plot_name = name.clone();
        }
        if let Some(pattern) = &section.exclude_pattern {
            config.exclude_pattern = pattern.clone();
        }
        if let Some(width) = section.width {
            config.width = width;
        }
        if let Some(height) = section.height {
            config.height = height;
        }
        config
    }
}

impl CompareSettings for CompareConfig {
    fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    fn all_plot_name(&self) -> &str {
        &self.all_plot_name
    }

    fn filtered_plot_name(&self) -> &str {
        &self.filtered_plot_name
    }

    fn exclude_pattern(&self) -> &str {
        &self.exclude_pattern
    }

    fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Validate for CompareConfig {
    fn validate(&self) -> Result<()> {
        validate_path("compare.input_dir", &self.input_dir.to_string_lossy())?;
        validate_path("compare.output_dir", &self.output_dir.to_string_lossy())?;
        validate_png_file_name("compare.all_plot_name", &self.all_plot_name)?;
        validate_png_file_name("compare.filtered_plot_name", &self.filtered_plot_name)?;
        // 兩張圖同名時後者會覆蓋前者
        if self.all_plot_name == self.filtered_plot_name {
            return Err(AnalysisError::InvalidConfigValueError {
                field: "compare.filtered_plot_name".to_string(),
                value: self.filtered_plot_name.clone(),
                reason: "Must differ from compare.all_plot_name".to_string(),
            });
        }
        validate_non_empty_string("compare.exclude_pattern", &self.exclude_pattern)?;
        validate_image_size("compare", (self.width, self.height))
    }
}
