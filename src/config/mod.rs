pub mod settings;
pub mod toml_config;

pub use settings::{CompareConfig, ReleaseConfig};
pub use toml_config::AnalysisConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "seqgen-analysis")]
#[command(about = "Timing analysis plots for the seqgen periodic task generator")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log process memory and CPU per phase")]
    pub monitor: bool,

    /// Write a JSON run summary to this file
    #[arg(long, global = true)]
    pub summary: Option<String>,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Plot release deltas of the last logging session in the syslog
    Releases(ReleaseArgs),
    /// Plot every csv timing file of a directory side by side
    Compare(CompareArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    #[arg(long)]
    pub syslog: Option<String>,

    /// Program tag the release lines are logged under
    #[arg(long)]
    pub tag: Option<String>,

    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

#[cfg(feature = "cli")]
impl ReleaseArgs {
    /// 命令列參數優先於設定檔
    pub fn apply(&self, config: &mut ReleaseConfig) {
        if let Some(syslog) = &self.syslog {
            config.syslog_path = syslog.into();
        }
        if let Some(tag) = &self.tag {
            config.program_tag = tag.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.into();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct CompareArgs {
    #[arg(long)]
    pub input_dir: Option<String>,

    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub all_name: Option<String>,

    #[arg(long)]
    pub filtered_name: Option<String>,

    /// Files whose name contains this are left out of the filtered plot
    #[arg(long)]
    pub exclude: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

#[cfg(feature = "cli")]
impl CompareArgs {
    pub fn apply(&self, config: &mut CompareConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.into();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.into();
        }
        if let Some(name) = &self.all_name {
            config.all_plot_name = name.clone();
        }
        if let Some(name) = &self.filtered_name {
            config.filtered_plot_name = name.clone();
        }
        if let Some(pattern) = &self.exclude {
            config.exclude_pattern = pattern.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
    }
}
