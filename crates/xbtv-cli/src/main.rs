//! XBTV schedule editor.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use xbtv_cli::commands::{run_check, run_show};
use xbtv_cli::logging::{LogConfig, LogFormat, init_logging};
use xbtv_cli::repl::Repl;
use xbtv_cli::settings::{Settings, load_settings};
use xbtv_core::Application;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = load_settings(cli.config.as_deref());
    let result = match cli.command {
        Some(Command::Show { file }) => run_show(&file, &mut io::stdout().lock()),
        Some(Command::Check { file }) => run_check(&file, &mut io::stdout().lock()),
        None => run_editor(&cli.files, settings),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_editor(files: &[PathBuf], settings: Settings) -> Result<()> {
    let mut app = Application::with_config(settings.engine);
    let mut opened = 0;
    for file in files {
        match app.open(file) {
            Ok(()) => opened += 1,
            Err(error) => eprintln!("error: {}", error.user_message()),
        }
    }
    // Drop the initial empty buffer when files took its place.
    if opened > 0 {
        app.select_buffer(0)?;
        app.close_buffer();
        app.select_buffer(app.buffer_count() - 1)?;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut repl = Repl::new(app, io::stdout().lock()).with_prompt(interactive);
    repl.run(stdin.lock()).context("editor input/output failed")?;
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
