mod app;
mod commands;
mod output;

use clap::Parser;
use rdschema::EventOptions;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .expect("failed to set Ctrl+C handler");

    let cli = Cli::parse();

    // rdschema info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("rdschema", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Generate { input, out_dir } => commands::generate::run(input, out_dir),
        Command::Shape {
            input,
            name,
            kind,
            fixed_y,
        } => {
            let options = EventOptions { fixed_y: *fixed_y };
            commands::shape::run(input, name, *kind, options, &cli.global)
        }
        Command::Catalog { input } => commands::catalog::run(input, &cli.global),
    }
}
