//! CLI for the cpr content-URI resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cpr_core::config;
use std::path::PathBuf;

use commands::{run_classify, run_resolve};

/// Top-level CLI for the cpr resolver.
#[derive(Debug, Parser)]
#[command(name = "cpr")]
#[command(about = "cpr: resolve content-provider URIs to filesystem paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a content or file URI to a local path.
    Resolve {
        /// URI to resolve (content://…, file://…).
        uri: String,

        /// TOML provider fixture backing metadata queries and byte streams.
        /// Without it, every query answers empty.
        #[arg(long, value_name = "FILE")]
        fixture: Option<PathBuf>,

        /// External storage root for `primary:` document ids.
        #[arg(long, value_name = "DIR")]
        storage_root: Option<PathBuf>,

        /// Directory receiving fallback cache copies.
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,

        /// Print the resolution as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how a URI is classified (scheme, authority, document id).
    Classify {
        /// URI to inspect.
        uri: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                uri,
                fixture,
                storage_root,
                cache_dir,
                json,
            } => run_resolve(&cfg, &uri, fixture.as_deref(), storage_root, cache_dir, json),
            CliCommand::Classify { uri } => run_classify(&uri),
        }
    }
}

#[cfg(test)]
mod tests;
