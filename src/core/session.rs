use crate::core::release_parser::{LogLine, ReleaseLineParser};
use crate::core::reverse_lines::ReverseLines;
use crate::domain::model::ReleaseRecord;
use crate::utils::error::Result;
use std::io::{Read, Seek};

/// Progress of a backward session scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No stop marker met yet.
    NotStarted,
    /// Inside the session, collecting release lines.
    InProgress,
    /// Start marker reached.
    Finished,
}

#[derive(Debug, Clone)]
pub struct SessionScan {
    /// Records in chronological order.
    pub records: Vec<ReleaseRecord>,
    pub state: ScanState,
    pub lines_scanned: usize,
}

/// Scans lines supplied from last to first and keeps the release records of
/// the most recent logging session.
pub fn scan_reversed<I>(lines: I, parser: &ReleaseLineParser) -> Result<SessionScan>
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut state = ScanState::NotStarted;
    let mut records = Vec::new();
    let mut lines_scanned = 0;

    for line in lines {
        let line = line?;
        lines_scanned += 1;

        // 由後往前讀，先遇到 STOP 才開始收集
        match (state, parser.classify(&line)) {
            (ScanState::NotStarted, LogLine::Stop) => state = ScanState::InProgress,
            (ScanState::InProgress, LogLine::Release(record)) => records.push(record),
            (ScanState::InProgress, LogLine::Start) => {
                state = ScanState::Finished;
                break;
            }
            _ => {}
        }
    }

    records.reverse();

    Ok(SessionScan {
        records,
        state,
        lines_scanned,
    })
}

/// Reads `source` backward and extracts its last logging session.
pub fn scan_last_session<R: Read + Seek>(
    source: R,
    parser: &ReleaseLineParser,
) -> Result<SessionScan> {
    let mut lines = ReverseLines::new(source)?;
    let scan = scan_reversed(&mut lines, parser)?;

    match scan.state {
        ScanState::NotStarted => {
            tracing::warn!("⚠️ No STOP LOGGING marker found, no session to extract");
        }
        ScanState::InProgress => {
            tracing::warn!(
                "⚠️ START LOGGING marker not found, session runs to the beginning of the log"
            );
        }
        ScanState::Finished => {
            tracing::debug!(
                "Session located after scanning {} lines ({} of {} bytes)",
                scan.lines_scanned,
                lines.source_len() - lines.position(),
                lines.source_len()
            );
        }
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::release_parser::DEFAULT_PROGRAM_TAG;
    use std::io::Cursor;

    fn release(freq: &str, n: u64, sec: &str) -> String {
        format!(
            "Jun 10 21:04:11 pi seqgen3: S1 {} Hz on core 2 for release {} @ sec={}",
            freq, n, sec
        )
    }

    const START: &str = "Jun 10 21:04:10 pi seqgen3: ==== START LOGGING ====";
    const STOP: &str = "Jun 10 21:04:20 pi seqgen3: ==== STOP LOGGING ====";

    fn scan(lines: &[String]) -> SessionScan {
        let parser = ReleaseLineParser::new(DEFAULT_PROGRAM_TAG).unwrap();
        let content = lines.join("\n") + "\n";
        scan_last_session(Cursor::new(content.into_bytes()), &parser).unwrap()
    }

    #[test]
    fn test_extracts_session_in_chronological_order() {
        let lines = vec![
            "Jun 10 21:00:00 pi kernel: boot".to_string(),
            START.to_string(),
            release("10.0", 1, "0.100"),
            "Jun 10 21:04:11 pi cron: noise".to_string(),
            release("10.0", 2, "0.200"),
            release("5.0", 1, "0.205"),
            STOP.to_string(),
            "Jun 10 21:05:00 pi kernel: trailing".to_string(),
        ];

        let result = scan(&lines);
        assert_eq!(result.state, ScanState::Finished);
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[0].release, 1);
        assert_eq!(result.records[0].release_time_s, 0.1);
        assert_eq!(result.records[2].frequency_hz, 5.0);
    }

    #[test]
    fn test_only_last_session_is_used() {
        let lines = vec![
            START.to_string(),
            release("1.0", 1, "100.0"),
            STOP.to_string(),
            START.to_string(),
            release("2.0", 1, "200.0"),
            release("2.0", 2, "200.5"),
            STOP.to_string(),
        ];

        let result = scan(&lines);
        assert_eq!(result.records.len(), 2);
        assert!(result.records.iter().all(|r| r.frequency_hz == 2.0));
    }

    #[test]
    fn test_releases_after_stop_marker_are_ignored() {
        let lines = vec![
            START.to_string(),
            release("1.0", 1, "1.0"),
            STOP.to_string(),
            release("1.0", 2, "2.0"),
        ];

        let result = scan(&lines);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].release, 1);
    }

    #[test]
    fn test_missing_stop_marker_yields_nothing() {
        let lines = vec![START.to_string(), release("1.0", 1, "1.0")];

        let result = scan(&lines);
        assert_eq!(result.state, ScanState::NotStarted);
        assert!(result.records.is_empty());
        assert_eq!(result.lines_scanned, 2);
    }

    #[test]
    fn test_missing_start_marker_keeps_records_to_file_head() {
        let lines = vec![
            release("1.0", 1, "1.0"),
            release("1.0", 2, "2.0"),
            STOP.to_string(),
        ];

        let result = scan(&lines);
        assert_eq!(result.state, ScanState::InProgress);
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_scan_stops_at_start_marker() {
        let lines = vec![
            "old line".to_string(),
            "older line".to_string(),
            START.to_string(),
            release("1.0", 1, "1.0"),
            STOP.to_string(),
        ];

        let result = scan(&lines);
        assert_eq!(result.lines_scanned, 3);
    }
}
