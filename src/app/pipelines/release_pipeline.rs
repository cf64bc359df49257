use crate::core::deviation::{analyse_releases, format_frequency, SECONDS_TO_MILLISECONDS};
use crate::core::release_parser::ReleaseLineParser;
use crate::core::session::scan_last_session;
use crate::core::{Pipeline, ReleaseAnalysis, ReleaseRecord, ReleaseSettings, Storage};
use crate::render::release_chart::{file_name, render_release_chart};
use crate::utils::error::{AnalysisError, Result};
use std::path::PathBuf;

/// Syslog → per-frequency release deviation charts.
pub struct ReleasePipeline<S: Storage, C: ReleaseSettings> {
    pub(crate) storage: S,
    pub(crate) config: C,
    parser: ReleaseLineParser,
}

impl<S: Storage, C: ReleaseSettings> ReleasePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let parser = ReleaseLineParser::new(config.program_tag())?;
        Ok(Self {
            storage,
            config,
            parser,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ReleaseSettings> Pipeline for ReleasePipeline<S, C> {
    type Input = Vec<ReleaseRecord>;
    type Output = Vec<ReleaseAnalysis>;

    fn name(&self) -> &str {
        "release"
    }

    async fn extract(&self) -> Result<Vec<ReleaseRecord>> {
        let path = self.config.syslog_path();
        tracing::debug!("Scanning {} backward for the last session", path.display());

        let source = self.storage.open(path)?;
        let scan = scan_last_session(source, &self.parser)?;

        tracing::info!(
            "Extracted {} release records ({} lines scanned)",
            scan.records.len(),
            scan.lines_scanned
        );

        if scan.records.is_empty() {
            return Err(AnalysisError::NoReleaseRecords {
                path: path.display().to_string(),
            });
        }

        Ok(scan.records)
    }

    async fn transform(&self, data: Vec<ReleaseRecord>) -> Result<Vec<ReleaseAnalysis>> {
        let analyses = analyse_releases(data);

        for analysis in &analyses {
            tracing::info!(
                "⏱️ {}Hz: {} releases, period {}ms, max deviation {:.3}ms",
                format_frequency(analysis.frequency_hz),
                analysis.release_count,
                analysis.period_s * SECONDS_TO_MILLISECONDS,
                analysis.max_deviation_s * SECONDS_TO_MILLISECONDS
            );
        }

        if analyses.is_empty() {
            return Err(AnalysisError::ProcessingError {
                message: "no frequency has at least two releases to compare".to_string(),
            });
        }

        Ok(analyses)
    }

    async fn load(&self, result: &Vec<ReleaseAnalysis>) -> Result<Vec<PathBuf>> {
        let mut images = Vec::with_capacity(result.len());

        for analysis in result {
            let path = self.storage.output_path(&file_name(analysis))?;
            render_release_chart(&path, analysis, self.config.image_size())?;
            images.push(path);
        }

        Ok(images)
    }
}
