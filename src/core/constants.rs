/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Output format constants
pub mod output_formats {
    /// Text output format - colored summary on stdout
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// CSV output format - spreadsheet-friendly rows written to a file
    pub const CSV: &str = "csv";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, CSV];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status treated as healthy
    pub const OK: u16 = 200;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Maximum redirects followed by the prober
    pub const MAX_REDIRECTS: usize = 10;
}

/// Ad and campaign status values as exported by the platform
pub mod ad_status {
    pub const ENABLED: &str = "ENABLED";
    pub const PAUSED: &str = "PAUSED";
}

/// Config file discovery
pub mod config_files {
    /// File name searched in the working directory and its parents
    pub const FILE_NAME: &str = ".adlink-audit.toml";
    /// How many parent directories are searched
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}

/// Report column headers, in sink order
pub mod report_columns {
    pub const HEADERS: [&str; 8] = [
        "Date Checked",
        "Campaign",
        "Ad ID",
        "Ad Type",
        "URL",
        "Status Code",
        "Error",
        "Paused",
    ];
}

/// Error message constants
pub mod error_messages {
    /// Symbolic status used when no HTTP status was obtained
    pub const SYMBOLIC_ERROR_STATUS: &str = "ERROR";
}
