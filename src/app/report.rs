use crate::core::deviation::SECONDS_TO_MILLISECONDS;
use crate::core::engine::RunOutcome;
use crate::core::ReleaseAnalysis;
use crate::domain::model::{ComparisonSet, FrequencySummary, RunReport, SeriesSummary};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

pub fn run_id(now: DateTime<Utc>) -> String {
    format!("run_{}", now.format("%Y%m%d_%H%M%S"))
}

fn base_report<T>(command: &str, outcome: &RunOutcome<T>) -> RunReport {
    let now = Utc::now();
    RunReport {
        run_id: run_id(now),
        timestamp: now.to_rfc3339(),
        command: command.to_string(),
        elapsed_ms: outcome.elapsed.as_millis() as u64,
        images: outcome
            .images
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        frequencies: Vec::new(),
        series: Vec::new(),
    }
}

pub fn release_report(outcome: &RunOutcome<Vec<ReleaseAnalysis>>) -> RunReport {
    let mut report = base_report("releases", outcome);
    report.frequencies = outcome
        .output
        .iter()
        .map(|a| FrequencySummary {
            frequency_hz: a.frequency_hz,
            period_ms: a.period_s * SECONDS_TO_MILLISECONDS,
            release_count: a.release_count,
            mean_delta_ms: a.mean_delta_s * SECONDS_TO_MILLISECONDS,
            max_deviation_ms: a.max_deviation_s * SECONDS_TO_MILLISECONDS,
        })
        .collect();
    report
}

pub fn compare_report(outcome: &RunOutcome<Vec<ComparisonSet>>) -> RunReport {
    let mut report = base_report("compare", outcome);
    // 第一組包含所有檔案
    if let Some(all) = outcome.output.first() {
        report.series = all
            .series
            .iter()
            .map(|s| SeriesSummary {
                name: s.name.clone(),
                samples: s.samples.len(),
            })
            .collect();
    }
    report
}

pub async fn export_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json).await?;

    tracing::info!("📊 Run summary exported to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TimingSample, TimingSeries};
    use chrono::TimeZone;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_run_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 21, 4, 11).unwrap();
        assert_eq!(run_id(now), "run_20240610_210411");
    }

    #[test]
    fn test_release_report_converts_to_milliseconds() {
        let outcome = RunOutcome {
            images: vec![PathBuf::from("seqgen_10.0hz.png")],
            output: vec![ReleaseAnalysis {
                frequency_hz: 10.0,
                period_s: 0.1,
                release_count: 3,
                deltas_s: vec![0.1, 0.102],
                mean_delta_s: 0.101,
                max_deviation_s: 0.002,
            }],
            elapsed: Duration::from_millis(42),
        };

        let report = release_report(&outcome);
        assert_eq!(report.command, "releases");
        assert_eq!(report.elapsed_ms, 42);
        assert_eq!(report.frequencies.len(), 1);
        assert_eq!(report.frequencies[0].period_ms, 100.0);
        assert!(report.series.is_empty());
    }

    #[tokio::test]
    async fn test_export_compare_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let outcome = RunOutcome {
            images: vec![PathBuf::from("comparison_all.png")],
            output: vec![ComparisonSet {
                output_name: "comparison_all.png".to_string(),
                series: vec![TimingSeries {
                    name: "monotonic".to_string(),
                    path: PathBuf::from("monotonic.csv"),
                    samples: vec![TimingSample {
                        iteration_time_s: 0.01,
                        delay_error_s: 0.0,
                    }],
                }],
            }],
            elapsed: Duration::from_millis(5),
        };

        let path = dir.path().join("out").join("summary.json");
        export_report(&compare_report(&outcome), &path).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["command"], "compare");
        assert_eq!(json["series"][0]["name"], "monotonic");
        assert_eq!(json["series"][0]["samples"], 1);
        assert!(json.get("frequencies").is_none());
    }
}
