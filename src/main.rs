use asset_sweep::reporter::{
    csv::CsvReporter, json::JsonReporter, progress::ScanProgress, terminal::TerminalReporter,
    Reporter,
};
use asset_sweep::{cache, config, engine, CancelToken, Cli, OutputFormat, Result, ScanError};
use clap::Parser;
use std::fs;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error ({}): {}", e.exit_category(), e);
            eprintln!("hint: {}", e.remediation());
            ExitCode::from(e.exit_category().code())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_overlay = config::load_config_overlay(&cli.path)?;

    // Progress and colour are decided here, never by the engine.
    if file_overlay
        .as_ref()
        .is_some_and(|o| o.color_output == Some(false))
    {
        colored::control::set_override(false);
    }
    let config_progress = file_overlay
        .as_ref()
        .and_then(|o| o.show_progress)
        .unwrap_or(true);
    let show_progress = config_progress
        && !cli.no_progress
        && !cli.quiet
        && std::io::stderr().is_terminal();
    let progress = ScanProgress::new(show_progress);

    let options = engine::ScanOptions {
        file_overlay,
        cli_overlay: Some(cli.overlay()),
        progress: progress.callback(),
    };

    let result = engine::run_scan(&cli.path, options, &CancelToken::new())?;
    progress.finish();

    let output = match cli.format {
        OutputFormat::Text => TerminalReporter::new(cli.verbose).report(&result),
        OutputFormat::Json => JsonReporter::new().report(&result),
        OutputFormat::Csv => CsvReporter::new().report(&result),
    };

    match &cli.output {
        Some(path) => fs::write(path, &output).map_err(|e| ScanError::WriteError {
            path: path.clone(),
            source: e,
        })?,
        None => println!("{output}"),
    }

    // Cache failures are warnings; the scan already succeeded.
    match cache::save(&result) {
        Ok(path) => {
            if !cli.quiet {
                eprintln!("Scan results saved to {}", path.display());
            }
        }
        Err(e) => eprintln!("warning: failed to cache scan results: {e}"),
    }

    Ok(())
}
