//! CLI argument parsing for keystore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kv")]
#[command(author, version, about = "Inspect the scrumsim key-value store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides config)
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key
    Get {
        #[arg(required = true)]
        key: String,
    },

    /// Store a JSON value under a key
    Set {
        #[arg(required = true)]
        key: String,

        /// JSON text to store
        #[arg(required = true)]
        value: String,
    },

    /// Remove a key
    Rm {
        #[arg(required = true)]
        key: String,
    },

    /// List all keys
    List,
}
