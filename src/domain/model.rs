use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一筆 seqgen release 紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub service: u8,
    pub frequency_hz: f64,
    pub core: u32,
    pub release: u64,
    pub release_time_s: f64,
}

/// Exact parsed frequency as an ordered grouping key.
///
/// Parsed frequencies are never negative, so the IEEE-754 bit pattern
/// sorts the same way as the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrequencyKey(u64);

impl FrequencyKey {
    pub fn from_hz(frequency_hz: f64) -> Self {
        Self(frequency_hz.to_bits())
    }

    pub fn as_hz(&self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[derive(Debug, Clone)]
pub struct FrequencyGroup {
    pub frequency_hz: f64,
    pub records: Vec<ReleaseRecord>,
}

impl FrequencyGroup {
    pub fn release_times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.release_time_s).collect()
    }
}

/// Inter-release statistics for one frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAnalysis {
    pub frequency_hz: f64,
    pub period_s: f64,
    pub release_count: usize,
    pub deltas_s: Vec<f64>,
    pub mean_delta_s: f64,
    pub max_deviation_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub iteration_time_s: f64,
    pub delay_error_s: f64,
}

/// 一個 CSV 檔案的時間序列
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSeries {
    pub name: String,
    pub path: PathBuf,
    pub samples: Vec<TimingSample>,
}

impl TimingSeries {
    pub fn iteration_times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.iteration_time_s).collect()
    }

    pub fn delay_errors(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.delay_error_s).collect()
    }
}

/// One comparison image and the series drawn on it.
#[derive(Debug, Clone)]
pub struct ComparisonSet {
    pub output_name: String,
    pub series: Vec<TimingSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencySummary {
    pub frequency_hz: f64,
    pub period_ms: f64,
    pub release_count: usize,
    pub mean_delta_ms: f64,
    pub max_deviation_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub name: String,
    pub samples: usize,
}

/// 執行摘要，可匯出為 JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub timestamp: String,
    pub command: String,
    pub elapsed_ms: u64,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub frequencies: Vec<FrequencySummary>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub series: Vec<SeriesSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_key_orders_numerically() {
        let mut keys = vec![
            FrequencyKey::from_hz(10.0),
            FrequencyKey::from_hz(3.33),
            FrequencyKey::from_hz(1.0),
        ];
        keys.sort();
        assert_eq!(keys[0], FrequencyKey::from_hz(1.0));
        assert_eq!(keys[2].as_hz(), 10.0);
        assert_eq!(FrequencyKey::from_hz(3.33).as_hz(), 3.33);
        assert!(FrequencyKey::from_hz(3.3331) < FrequencyKey::from_hz(3.3334));
    }
}
