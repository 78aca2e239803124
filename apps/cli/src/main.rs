//! `bindery`: convert raw request parameters from the command line.
//!
//! Exit status: 0 on success, 1 on configuration errors and unknown type
//! names, 2 when a value or field fails to convert. Malformed arguments are
//! rejected by clap, also with status 2.

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use bindery_convert::ConverterRegistry;
use clap::Parser;

use crate::cli::{Cli, Command};

/// Exit status for conversion and binding failures.
const EXIT_CONVERSION_FAILED: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let config = settings::load(cli.config.as_deref())?;
    let registry = ConverterRegistry::with_defaults(&config);

    let report = match &cli.command {
        Command::Convert(args) => commands::convert(&registry, args)?,
        Command::Bind(args) => commands::bind(&registry, &config, args)?,
        Command::Types => {
            print!("{}", commands::types(&registry));
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", serde_json::to_string_pretty(&report.output)?);

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CONVERSION_FAILED)
    })
}

/// Logs go to stderr; stdout carries only command output.
fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let from_env = std::env::var_os(bindery_log::ENV_LOG).is_some()
        || std::env::var_os("RUST_LOG").is_some();

    let mut config = bindery_log::Config::from_env();
    match level {
        Some(level) => config = config.with_level(level),
        None if !from_env => config = config.with_level("warn"),
        None => {}
    }

    bindery_log::init_with(config).context("cannot initialize logging")
}
