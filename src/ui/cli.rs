// Command-line interface definitions and parsing for adlink-audit

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ad export to audit (JSON array, or JSON lines with .jsonl/.ndjson)
    pub ads: String,

    // Core Options
    /// Request timeout in seconds (default: 10)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Also audit ads that are paused or in paused campaigns
    #[arg(long, help_heading = "Core Options")]
    pub include_paused: bool,

    /// URL patterns to skip (regex)
    #[arg(long, value_name = "REGEX", help_heading = "Core Options")]
    pub exclude_pattern: Vec<String>,

    // Remediation
    /// Pause ads whose destination URL is broken
    #[arg(long, help_heading = "Remediation")]
    pub auto_pause: bool,

    /// Endpoint receiving pause mutations
    #[arg(long, value_name = "URL", help_heading = "Remediation")]
    pub pause_endpoint: Option<String>,

    // Output & Verbosity
    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub output: Option<String>,

    /// Suppress progress output and logging
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress spinner
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network")]
    pub proxy: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed CLI arguments into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        auto_pause: cli.auto_pause,
        pause_endpoint: cli.pause_endpoint.clone(),
        include_paused: cli.include_paused,
        exclude_patterns: if cli.exclude_pattern.is_empty() {
            None
        } else {
            Some(cli.exclude_pattern.clone())
        },
        user_agent: cli.user_agent.clone(),
        proxy: cli.proxy.clone(),
        output_format: cli.format.clone(),
        output_path: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
