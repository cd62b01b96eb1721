use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use my_plantitas::cli::{Cli, Commands, PlantCommands};
use my_plantitas::clock::SystemClock;
use my_plantitas::commands;
use my_plantitas::config::{self, ConfigFile, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_file, force } => {
            init_logging(cli.debug);
            cmd_init(data_file, force)
        }
        Commands::Plants(command) => {
            let settings = Settings::resolve(cli.file.as_deref(), cli.debug)?;
            init_logging(settings.debug);
            run(command, &settings)
        }
    }
}

/// Load the plant file, run `command`, and save if it changed anything.
fn run(command: PlantCommands, settings: &Settings) -> Result<()> {
    tracing::debug!(file = %settings.data_file.display(), "using plant file");

    let clock = SystemClock;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let path = settings.data_file.as_path();
    let mut collection = commands::load_collection(path)?;

    match command {
        PlantCommands::List { due, sort, ids } => {
            commands::run_list(&mut out, &collection, &clock, due, sort, ids)?;
        }
        PlantCommands::Show { index } => {
            commands::run_show(&mut out, &collection, &clock, index)?;
        }
        PlantCommands::Add(args) => {
            let index = commands::run_add(&mut out, &mut collection, &clock, args)?;
            commands::save_collection(&collection, path)?;
            writeln!(out, "Índice: {index}")?;
        }
        PlantCommands::Water { index, all_due } => {
            if commands::run_water(&mut out, &mut collection, &clock, index, all_due)? > 0 {
                commands::save_collection(&collection, path)?;
            }
        }
        PlantCommands::Update(args) => {
            commands::run_update(&mut out, &mut collection, args)?;
            commands::save_collection(&collection, path)?;
        }
        PlantCommands::Remove { index } => {
            commands::run_remove(&mut out, &mut collection, index)?;
            commands::save_collection(&collection, path)?;
        }
    }

    Ok(())
}

/// Warnings and errors always print; `--debug` adds debug-level detail.
/// `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Execute `plantitas init`: write the config file.
fn cmd_init(data_file: Option<std::path::PathBuf>, force: bool) -> Result<()> {
    let path = config::config_path();
    let data_file = data_file.unwrap_or_else(config::default_data_file);
    let cfg = ConfigFile {
        data_file: Some(data_file.clone()),
        debug: None,
    };
    config::save_config(&path, &cfg, force)?;

    println!("Config escrito en {}", path.display());
    println!("  data_file = {}", data_file.display());
    Ok(())
}
