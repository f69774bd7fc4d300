pub mod check;
pub mod convert;
pub mod init;
pub mod status;
pub mod tables;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::Settings;

/// Flag (or its environment variable) wins; otherwise the configured mapping
/// file, if any.
pub(crate) fn resolve_mapping(flag: Option<PathBuf>, settings: &Settings) -> Option<PathBuf> {
    flag.or_else(|| settings.mapping_path())
}

/// Paths a run actually uses after flags, environment and settings are applied.
#[derive(Debug, PartialEq)]
pub(crate) struct ResolvedPaths {
    pub source: PathBuf,
    pub output: PathBuf,
    pub mapping: Option<PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn resolve(self, settings: &Settings) -> ResolvedPaths {
        ResolvedPaths {
            source: self.source.unwrap_or_else(|| settings.source_path()),
            output: self.output.unwrap_or_else(|| settings.output_path()),
            mapping: resolve_mapping(self.mapping, settings),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "nawallet2icost",
    version,
    about = "Convert a NaWallet backup into an iCost CSV import file.",
    long_about = "Convert a NaWallet backup into an iCost CSV import file.\n\n\
                  Without a subcommand, runs `convert` with the configured paths.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ConvertArgs {
    /// NaWallet backup database (default: settings, then data/MoneyKeeper.db)
    #[arg(long, env = "NAWALLET_DB")]
    pub source: Option<PathBuf>,
    /// Destination CSV (default: settings, then data/iCost.csv)
    #[arg(long, env = "ICOST_CSV")]
    pub output: Option<PathBuf>,
    /// JSON mapping tables replacing the built-in ones
    #[arg(long, env = "NAWALLET2ICOST_MAPPING")]
    pub mapping: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the NaWallet database into an iCost CSV file.
    Convert(ConvertArgs),
    /// List every category or account the mapping tables cannot translate.
    Check {
        /// NaWallet backup database
        #[arg(long, env = "NAWALLET_DB")]
        source: Option<PathBuf>,
        /// JSON mapping tables replacing the built-in ones
        #[arg(long, env = "NAWALLET2ICOST_MAPPING")]
        mapping: Option<PathBuf>,
    },
    /// Show the effective mapping tables.
    Tables {
        /// JSON mapping tables replacing the built-in ones
        #[arg(long, env = "NAWALLET2ICOST_MAPPING")]
        mapping: Option<PathBuf>,
        /// Write the tables to this JSON file as a starting point for edits
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Save default paths to ~/.config/nawallet2icost/settings.json.
    Init {
        /// NaWallet backup database
        #[arg(long)]
        source: Option<String>,
        /// Destination CSV
        #[arg(long)]
        output: Option<String>,
        /// JSON mapping tables
        #[arg(long)]
        mapping: Option<String>,
    },
    /// Show the effective configuration and source database statistics.
    Status(ConvertArgs),
}
