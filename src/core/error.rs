use std::fmt;

/// Error types for audit runs.
///
/// Only faults that end a run are represented here. Network failures while
/// probing a URL and rejected pause mutations are contained by the prober and
/// the remediator and never surface as an `AuditError` from `Auditor::run`.
#[derive(Debug)]
pub enum AuditError {
    /// IO error (export files, sink files, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON (de)serialization error
    Json(serde_json::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// The ad source failed to yield data
    Enumeration(String),

    /// The platform rejected a pause mutation
    Remediation(String),

    /// The report sink could not persist the report
    Sink(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Io(err) => write!(f, "IO error: {err}"),
            AuditError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AuditError::Http(err) => write!(f, "HTTP error: {err}"),
            AuditError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            AuditError::Json(err) => write!(f, "JSON error: {err}"),
            AuditError::Regex(err) => write!(f, "Regex error: {err}"),
            AuditError::Enumeration(msg) => write!(f, "Ad enumeration error: {msg}"),
            AuditError::Remediation(msg) => write!(f, "Remediation error: {msg}"),
            AuditError::Sink(msg) => write!(f, "Report sink error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Io(err) => Some(err),
            AuditError::Http(err) => Some(err),
            AuditError::TomlParsing(err) => Some(err),
            AuditError::Json(err) => Some(err),
            AuditError::Regex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err)
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Http(err)
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        AuditError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Json(err)
    }
}

impl From<regex::Error> for AuditError {
    fn from(err: regex::Error) -> Self {
        AuditError::Regex(err)
    }
}

/// Type alias for Results using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;
