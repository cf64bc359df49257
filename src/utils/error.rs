use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Plot rendering error: {message}")]
    PlotError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("No csv input files found in {directory}")]
    NoInputFiles { directory: String },

    #[error("No release records found in logging session of {path}")]
    NoReleaseRecords { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalysisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::CsvError(_)
            | AnalysisError::NoInputFiles { .. }
            | AnalysisError::NoReleaseRecords { .. } => ErrorCategory::Input,
            AnalysisError::ConfigValidationError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::RegexError(_) => ErrorCategory::Configuration,
            AnalysisError::ProcessingError { .. } | AnalysisError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            AnalysisError::PlotError { .. } => ErrorCategory::Rendering,
            AnalysisError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 沒有輸入檔案只是提示，程式正常結束
            AnalysisError::NoInputFiles { .. } => ErrorSeverity::Low,
            AnalysisError::NoReleaseRecords { .. } | AnalysisError::PlotError { .. } => {
                ErrorSeverity::Medium
            }
            AnalysisError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalysisError::NoInputFiles { .. } => {
                "Error: no csv input files to produce plot.".to_string()
            }
            AnalysisError::NoReleaseRecords { path } => {
                format!("No seqgen release records found in the last logging session of {}", path)
            }
            AnalysisError::IoError(e) => format!("File access failed: {}", e),
            AnalysisError::CsvError(e) => format!("Could not read CSV input: {}", e),
            AnalysisError::PlotError { message } => format!("Could not render plot: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => match self {
                AnalysisError::NoInputFiles { .. } => {
                    "Run the clock test first or point --input-dir at the folder holding its .csv output"
                }
                AnalysisError::NoReleaseRecords { .. } => {
                    "Check that seqgen logged both START and STOP markers and that --tag matches its syslog identifier"
                }
                _ => "Make sure every input file is a ';' separated table with a header and two numeric columns",
            },
            ErrorCategory::Configuration => "Review the TOML configuration and command line flags",
            ErrorCategory::Processing => "Inspect the input data for unexpected values",
            ErrorCategory::Rendering => "Check that the output directory is writable and system fonts are installed",
            ErrorCategory::System => "Check file paths and permissions (reading syslog usually needs the adm group)",
        }
    }

    /// 依嚴重程度決定程式結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for AnalysisError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::PlotError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_files_exits_cleanly() {
        let err = AnalysisError::NoInputFiles {
            directory: "./data".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.exit_code(), 0);
        assert_eq!(
            err.user_friendly_message(),
            "Error: no csv input files to produce plot."
        );
    }

    #[test]
    fn test_error_categories() {
        let io = AnalysisError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io.category(), ErrorCategory::System);
        assert_eq!(io.exit_code(), 3);

        let cfg = AnalysisError::InvalidConfigValueError {
            field: "releases.width".to_string(),
            value: "10".to_string(),
            reason: "Value must be between 64 and 20000".to_string(),
        };
        assert_eq!(cfg.category(), ErrorCategory::Configuration);
        assert_eq!(cfg.exit_code(), 1);

        let empty = AnalysisError::NoReleaseRecords {
            path: "/var/log/syslog".to_string(),
        };
        assert_eq!(empty.exit_code(), 2);
    }
}
