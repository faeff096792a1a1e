use adlink_audit::audit::Auditor;
use adlink_audit::config::{CliConfig, Config};
use adlink_audit::core::constants::output_formats;
use adlink_audit::reporting::logging;
use adlink_audit::ui::{Cli, ProgressReporter, cli_to_config};
use adlink_audit::{sink, source};
use clap::Parser;

/// Exit code when the run completed and found broken links
const EXIT_FINDINGS: i32 = 1;
/// Exit code when the run aborted
const EXIT_FATAL: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_audit(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_FATAL);
        }
    }
}

/// Main audit logic extracted from main() for testing
pub async fn run_audit(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    let verbose = config.verbose.unwrap_or(false);
    logging::init_logger(verbose, cli_config.quiet);
    logging::log_config_info(&config);

    let mut ads = source::open_export(&cli.ads, config.enabled_only()).inspect_err(|e| {
        logging::log_error("Could not open ad export", Some(e));
    })?;
    let mut report_sink = sink::from_config(&config)?;
    let mut progress = create_progress_reporter(&cli_config, &config);

    let auditor = Auditor::from_config(config)?;
    let report = auditor
        .run_and_submit(ads.as_mut(), report_sink.as_mut(), progress.as_mut())
        .await
        .inspect_err(|e| {
            logging::log_error("Audit aborted", Some(e));
        })?;

    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }

    Ok(if report.has_findings() { EXIT_FINDINGS } else { 0 })
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Progress is only drawn for text output and when not silenced
pub fn create_progress_reporter(cli_config: &CliConfig, config: &Config) -> Option<ProgressReporter> {
    let show = !cli_config.quiet
        && !cli_config.no_progress
        && config.output_format() == output_formats::TEXT
        && config.output_path.is_none();
    show.then(|| ProgressReporter::new(true))
}
