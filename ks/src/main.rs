use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use keystore::cli::{Cli, Command};
use keystore::config::Config;
use keystore::{Backend, FileBackend};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.store.unwrap_or(config.store_path);

    info!("keystore opening {}", store_path.display());
    let backend = FileBackend::open(&store_path)?;

    match cli.command {
        Command::Get { key } => match backend.get(&key)? {
            Some(raw) => {
                // Pretty-print when the stored text is valid JSON
                match serde_json::from_str::<serde_json::Value>(&raw) {
                    Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                    Err(_) => println!("{}", raw),
                }
            }
            None => {
                eprintln!("{} No value stored under: {}", "✗".red(), key.cyan());
                std::process::exit(1);
            }
        },
        Command::Set { key, value } => {
            let parsed: serde_json::Value = serde_json::from_str(&value).context("Value must be valid JSON")?;
            backend.set(&key, &serde_json::to_string(&parsed)?)?;
            println!("{} Stored: {}", "✓".green(), key.cyan());
        }
        Command::Rm { key } => {
            backend.remove(&key)?;
            println!("{} Removed: {}", "✓".green(), key);
        }
        Command::List => {
            let keys = backend.keys()?;
            if keys.is_empty() {
                println!("No keys found");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
    }

    Ok(())
}
