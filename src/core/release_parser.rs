use crate::domain::model::ReleaseRecord;
use crate::utils::error::Result;
use regex::Regex;

pub const DEFAULT_PROGRAM_TAG: &str = "seqgen3";
pub const START_MARKER: &str = "==== START LOGGING ====";
pub const STOP_MARKER: &str = "==== STOP LOGGING ====";

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Start,
    Stop,
    Release(ReleaseRecord),
    Other,
}

/// Matches the lines printed by seqgen for one program tag.
#[derive(Debug, Clone)]
pub struct ReleaseLineParser {
    release: Regex,
    start: Regex,
    stop: Regex,
}

impl ReleaseLineParser {
    pub fn new(program_tag: &str) -> Result<Self> {
        let tag = regex::escape(program_tag);

        let release = Regex::new(&format!(
            r"^.*{tag}:\sS(?P<service>\d)\s(?P<frequency>[0-9]+([.][0-9]+)?)\sHz\son\score\s(?P<core>[0-9]+)\sfor\srelease\s(?P<release>[0-9]+)\s@\ssec=(?P<release_time>[0-9]+([.][0-9]+)?)"
        ))?;
        let start = Regex::new(&format!(r"^.*{}:\s{}", tag, regex::escape(START_MARKER)))?;
        let stop = Regex::new(&format!(r"^.*{}:\s{}", tag, regex::escape(STOP_MARKER)))?;

        Ok(Self {
            release,
            start,
            stop,
        })
    }

    pub fn is_start_marker(&self, line: &str) -> bool {
        self.start.is_match(line)
    }

    pub fn is_stop_marker(&self, line: &str) -> bool {
        self.stop.is_match(line)
    }

    /// Extracts a release record, or `None` when the line does not match.
    pub fn parse_release(&self, line: &str) -> Option<ReleaseRecord> {
        let caps = self.release.captures(line)?;

        // 數字過大時視為不符合格式，直接略過
        Some(ReleaseRecord {
            service: caps.name("service")?.as_str().parse().ok()?,
            frequency_hz: caps.name("frequency")?.as_str().parse().ok()?,
            core: caps.name("core")?.as_str().parse().ok()?,
            release: caps.name("release")?.as_str().parse().ok()?,
            release_time_s: caps.name("release_time")?.as_str().parse().ok()?,
        })
    }

    pub fn classify(&self, line: &str) -> LogLine {
        if self.is_stop_marker(line) {
            LogLine::Stop
        } else if self.is_start_marker(line) {
            LogLine::Start
        } else if let Some(record) = self.parse_release(line) {
            LogLine::Release(record)
        } else {
            LogLine::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ReleaseLineParser {
        ReleaseLineParser::new(DEFAULT_PROGRAM_TAG).unwrap()
    }

    const RELEASE_LINE: &str =
        "Jun 10 21:04:11 raspberrypi seqgen3: S1 3.33 Hz on core 2 for release 17 @ sec=1.234567";

    #[test]
    fn test_parse_release_line() {
        let parser = parser();
        let record = parser.parse_release(RELEASE_LINE).unwrap();

        assert_eq!(record.service, 1);
        assert_eq!(record.frequency_hz, 3.33);
        assert_eq!(record.core, 2);
        assert_eq!(record.release, 17);
        assert_eq!(record.release_time_s, 1.234567);
    }

    #[test]
    fn test_integer_values() {
        let parser = parser();
        let record = parser
            .parse_release("host seqgen3: S3 10 Hz on core 0 for release 3 @ sec=12")
            .unwrap();
        assert_eq!(record.frequency_hz, 10.0);
        assert_eq!(record.release_time_s, 12.0);
    }

    #[test]
    fn test_non_matching_lines_are_skipped() {
        let parser = parser();
        assert!(parser
            .parse_release("host kernel: [12.3] usb 1-1: new device")
            .is_none());
        assert!(parser
            .parse_release("host seqgen2: S1 3.33 Hz on core 2 for release 17 @ sec=1.2")
            .is_none());
        assert!(parser
            .parse_release("host seqgen3: S12 3.33 Hz on core 2 for release 17 @ sec=1.2")
            .is_none());
        assert!(parser
            .parse_release("host seqgen3: S1 fast Hz on core 2 for release 17 @ sec=1.2")
            .is_none());
    }

    #[test]
    fn test_markers() {
        let parser = parser();
        assert_eq!(
            parser.classify("Jun 10 21:04:11 pi seqgen3: ==== START LOGGING ===="),
            LogLine::Start
        );
        assert_eq!(
            parser.classify("Jun 10 21:05:11 pi seqgen3: ==== STOP LOGGING ===="),
            LogLine::Stop
        );
        assert_eq!(
            parser.classify("Jun 10 21:05:11 pi other: ==== STOP LOGGING ===="),
            LogLine::Other
        );
        assert!(matches!(parser.classify(RELEASE_LINE), LogLine::Release(_)));
    }

    #[test]
    fn test_custom_tag_is_escaped() {
        let parser = ReleaseLineParser::new("seq.gen[1]").unwrap();
        assert!(parser
            .parse_release("host seq.gen[1]: S1 1.0 Hz on core 1 for release 1 @ sec=0.5")
            .is_some());
        assert!(parser
            .parse_release("host seqXgen1: S1 1.0 Hz on core 1 for release 1 @ sec=0.5")
            .is_none());
    }
}
