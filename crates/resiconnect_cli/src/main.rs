//! ResiConnect command-line front end.
//!
//! # Responsibility
//! - Load config, start logging and restore the directory from disk.
//! - Run the line-oriented command loop until `exit` or end of input.

use clap::Parser;
use log::{error, info};
use resiconnect_core::{init_logging, AppConfig, Directory, JsonDirectoryStorage, ModelManager};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod repl;

#[derive(Parser)]
#[command(name = "resiconnect")]
#[command(about = "Residence contact and event directory", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file path
    #[arg(short, long, default_value = "resiconnect.config.json")]
    config: PathBuf,

    /// Data file path, overriding the config value
    #[arg(short, long)]
    data: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = AppConfig::load(&cli.config).map_err(|err| err.to_string())?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    if let Err(err) = init_logging(&config.log_settings()) {
        eprintln!("file logging disabled: {err}");
    }

    let storage = JsonDirectoryStorage::new(&config.data_file);
    let mut model = ModelManager::new(load_directory(&storage));

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut model, &storage, stdin.lock(), stdout.lock())
        .map_err(|err| format!("terminal io error: {err}"))
}

/// Restores the saved directory, falling back to an empty one.
fn load_directory(storage: &JsonDirectoryStorage) -> Directory {
    match storage.read_directory() {
        Ok(Some(directory)) => directory,
        Ok(None) => {
            info!("event=cli_load module=cli status=ok found=false");
            Directory::new()
        }
        Err(err) => {
            error!(
                "event=cli_load module=cli status=error error_code={}",
                err.code()
            );
            eprintln!(
                "Data file {} could not be loaded ({err}). Starting with an empty directory.",
                storage.path().display()
            );
            Directory::new()
        }
    }
}
