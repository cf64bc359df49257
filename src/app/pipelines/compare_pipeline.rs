use crate::core::timing_csv::{is_excluded, read_timing_series, select_csv_files};
use crate::core::{CompareSettings, Pipeline, Storage, TimingSeries};
use crate::domain::model::ComparisonSet;
use crate::render::comparison_chart::render_comparison_chart;
use crate::utils::error::{AnalysisError, Result};
use std::path::PathBuf;

/// CSV directory → clock comparison charts.
pub struct ComparePipeline<S: Storage, C: CompareSettings> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: CompareSettings> ComparePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Discovers the `.csv` files of the input directory, sorted by name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let dir = self.config.input_dir();
        let files = select_csv_files(self.storage.list_files(dir)?);

        if files.is_empty() {
            return Err(AnalysisError::NoInputFiles {
                directory: dir.display().to_string(),
            });
        }

        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: CompareSettings> Pipeline for ComparePipeline<S, C> {
    type Input = Vec<TimingSeries>;
    type Output = Vec<ComparisonSet>;

    fn name(&self) -> &str {
        "compare"
    }

    async fn extract(&self) -> Result<Vec<TimingSeries>> {
        let files = self.discover()?;
        tracing::info!("Found {} csv files", files.len());

        let mut series = Vec::with_capacity(files.len());
        for path in files {
            let reader = self.storage.open(&path)?;
            let timing = read_timing_series(&path, reader)?;
            tracing::debug!("{}: {} samples", timing.name, timing.samples.len());
            series.push(timing);
        }

        Ok(series)
    }

    async fn transform(&self, data: Vec<TimingSeries>) -> Result<Vec<ComparisonSet>> {
        let pattern = self.config.exclude_pattern();
        let filtered: Vec<TimingSeries> = data
            .iter()
            .filter(|s| !is_excluded(&s.path, pattern))
            .cloned()
            .collect();

        let mut sets = vec![ComparisonSet {
            output_name: self.config.all_plot_name().to_string(),
            series: data,
        }];

        if filtered.is_empty() {
            tracing::warn!(
                "⚠️ Every csv file matches '{}', skipping {}",
                pattern,
                self.config.filtered_plot_name()
            );
        } else {
            sets.push(ComparisonSet {
                output_name: self.config.filtered_plot_name().to_string(),
                series: filtered,
            });
        }

        Ok(sets)
    }

    async fn load(&self, result: &Vec<ComparisonSet>) -> Result<Vec<PathBuf>> {
        let mut images = Vec::with_capacity(result.len());

        for set in result {
            let path = self.storage.output_path(&set.output_name)?;
            tracing::debug!(
                "Rendering {} series into {}",
                set.series.len(),
                path.display()
            );
            render_comparison_chart(&path, set, self.config.image_size())?;
            images.push(path);
        }

        Ok(images)
    }
}
