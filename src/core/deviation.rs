use crate::domain::model::{FrequencyGroup, FrequencyKey, ReleaseAnalysis, ReleaseRecord};
use std::collections::BTreeMap;

pub const SECONDS_TO_MILLISECONDS: f64 = 1000.0;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Formats a value the way it appears in chart labels and file names
/// (`10.0`, `3.33`): whole numbers keep one decimal.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub fn format_frequency(frequency_hz: f64) -> String {
    format_decimal(frequency_hz)
}

/// Groups records by frequency, ascending, keeping log order inside each group.
pub fn group_by_frequency(records: Vec<ReleaseRecord>) -> Vec<FrequencyGroup> {
    let mut groups: BTreeMap<FrequencyKey, Vec<ReleaseRecord>> = BTreeMap::new();

    for record in records {
        groups
            .entry(FrequencyKey::from_hz(record.frequency_hz))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(key, records)| FrequencyGroup {
            frequency_hz: key.as_hz(),
            records,
        })
        .collect()
}

/// Consecutive differences of a time series.
pub fn time_deltas(times: &[f64]) -> Vec<f64> {
    times.windows(2).map(|w| w[1] - w[0]).collect()
}

pub fn max_abs_deviation(reference: f64, values: &[f64]) -> Option<f64> {
    values
        .iter()
        .map(|v| (reference - v).abs())
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.max(d))))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Computes the inter-release statistics for one group.
///
/// Returns `None` when the group cannot define a deviation: fewer than two
/// releases or a non-positive frequency.
pub fn analyse_group(group: &FrequencyGroup) -> Option<ReleaseAnalysis> {
    let frequency_hz = round_to(group.frequency_hz, 2);
    if frequency_hz <= 0.0 {
        return None;
    }

    let period_s = round_to(1.0 / frequency_hz, 3);
    let deltas_s = time_deltas(&group.release_times());
    let max_deviation_s = max_abs_deviation(period_s, &deltas_s)?;
    let mean_delta_s = mean(&deltas_s)?;

    Some(ReleaseAnalysis {
        frequency_hz,
        period_s,
        release_count: group.records.len(),
        deltas_s,
        mean_delta_s,
        max_deviation_s,
    })
}

pub fn analyse_releases(records: Vec<ReleaseRecord>) -> Vec<ReleaseAnalysis> {
    group_by_frequency(records)
        .iter()
        .filter_map(|group| {
            let analysis = analyse_group(group);
            if analysis.is_none() {
                tracing::warn!(
                    "⚠️ Skipping {}Hz: {} release(s) cannot define a deviation",
                    format_frequency(group.frequency_hz),
                    group.records.len()
                );
            }
            analysis
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frequency_hz: f64, release: u64, release_time_s: f64) -> ReleaseRecord {
        ReleaseRecord {
            service: 1,
            frequency_hz,
            core: 2,
            release,
            release_time_s,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(10.0), "10.0");
        assert_eq!(format_frequency(3.33), "3.33");
        assert_eq!(format_frequency(round_to(1.0 / 3.0 * 10.0, 2)), "3.33");
        assert_eq!(format_decimal(300.0), "300.0");
    }

    #[test]
    fn test_groups_sorted_by_frequency_and_keep_order() {
        let records = vec![
            record(10.0, 1, 0.0),
            record(1.0, 1, 0.0),
            record(10.0, 2, 0.1),
            record(1.0, 2, 1.0),
            record(10.0, 3, 0.2),
        ];

        let groups = group_by_frequency(records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].frequency_hz, 1.0);
        assert_eq!(groups[1].frequency_hz, 10.0);
        let releases: Vec<u64> = groups[1].records.iter().map(|r| r.release).collect();
        assert_eq!(releases, vec![1, 2, 3]);
    }

    #[test]
    fn test_close_frequencies_stay_separate() {
        let records = vec![
            record(3.3331, 1, 0.0),
            record(3.3334, 1, 0.1),
            record(3.3331, 2, 0.3),
            record(3.3334, 2, 0.4),
        ];

        let groups = group_by_frequency(records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].frequency_hz, 3.3331);
        assert_eq!(groups[0].release_times(), vec![0.0, 0.3]);
        assert_eq!(groups[1].frequency_hz, 3.3334);
    }

    #[test]
    fn test_time_deltas() {
        let deltas = time_deltas(&[1.0, 1.5, 2.25]);
        assert_eq!(deltas, vec![0.5, 0.75]);
        assert!(time_deltas(&[1.0]).is_empty());
    }

    #[test]
    fn test_analyse_group_max_deviation() {
        let group = FrequencyGroup {
            frequency_hz: 10.0,
            records: vec![
                record(10.0, 1, 5.000),
                record(10.0, 2, 5.100),
                record(10.0, 3, 5.203),
                record(10.0, 4, 5.299),
            ],
        };

        let analysis = analyse_group(&group).unwrap();
        assert_eq!(analysis.period_s, 0.1);
        assert_eq!(analysis.release_count, 4);
        assert_eq!(analysis.deltas_s.len(), 3);
        assert!(close(analysis.max_deviation_s, 0.004));
        assert!(close(analysis.mean_delta_s, 0.299 / 3.0));
    }

    #[test]
    fn test_period_is_rounded() {
        let group = FrequencyGroup {
            frequency_hz: 3.33,
            records: vec![record(3.33, 1, 0.0), record(3.33, 2, 0.3)],
        };

        let analysis = analyse_group(&group).unwrap();
        assert_eq!(analysis.period_s, 0.3);
        assert!(close(analysis.max_deviation_s, 0.0));
    }

    #[test]
    fn test_degenerate_groups_are_skipped() {
        let single = FrequencyGroup {
            frequency_hz: 5.0,
            records: vec![record(5.0, 1, 0.0)],
        };
        assert!(analyse_group(&single).is_none());

        let zero = FrequencyGroup {
            frequency_hz: 0.0,
            records: vec![record(0.0, 1, 0.0), record(0.0, 2, 1.0)],
        };
        assert!(analyse_group(&zero).is_none());

        let analyses = analyse_releases(vec![
            record(5.0, 1, 0.0),
            record(2.0, 1, 0.0),
            record(2.0, 2, 0.5),
        ]);
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].frequency_hz, 2.0);
    }
}
