//! CLI module - Command-line interface for Arsenal
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arsenal - build planner backend
#[derive(Parser)]
#[command(name = "arsenal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Seed the mod, warframe and weapon catalog from a JSON file
    #[command(alias = "import")]
    ImportCatalog {
        /// Path to a file shaped like {"mods": [...], "warframes": [...], "weapons_primary": [...]}
        path: PathBuf,
    },

    /// Print the mod catalog
    Mods,
}

pub use commands::*;
