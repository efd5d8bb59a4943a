use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use lastbreath::cli::args::{Cli, Commands};
use lastbreath::cli::commands;
use lastbreath::config::Config;
use lastbreath::logging::init_tracing;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let format = cli.output;
    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = Config::load_from_path(&config_path)?;

    let output = match cli.command {
        None | Some(Commands::Tui) => {
            lastbreath::tui::run(&config)?;
            String::new()
        }
        Some(Commands::Run(args)) => commands::run(&config, &args, format)?,
        Some(Commands::Plan(args)) => commands::plan(&config, &args, format)?,
        Some(Commands::Config(args)) => {
            commands::config(&config, &config_path, &args.command, format)?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
