//! Topograph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use topograph_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    // Unknown levels fall back to warn
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?, input:? = args.input; "Starting Topograph");
    debug!(args:?; "Parsed arguments");

    // Render the inventory to SVG
    if let Err(err) = topograph_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // Decode failures carry the inventory source for a labeled snippet
        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");

            error!(input:? = args.input; "{writer}");
        }

        process::exit(1);
    }

    info!(output_file:? = args.output; "Topology rendered");
}
