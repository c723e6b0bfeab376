use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pdbsoup - load PDB structures into columnar tables, infer bonds and assign secondary structure.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a structure: title, table sizes, extent and secondary structure per chain.
    Info(InfoArgs),
    /// List residues with their secondary-structure tag and averaged normal.
    Residues(ResiduesArgs),
    /// List inferred bonds, one line per atom pair.
    Bonds(BondsArgs),
}

/// Options shared by every command that loads a structure.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the bond inference strategy ('strategic', 'spatial' or 'neighbor-residues').
    #[arg(short, long, value_name = "NAME")]
    pub bond_strategy: Option<String>,

    /// Read every model instead of stopping at the first ENDMDL record.
    #[arg(long)]
    pub all_models: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S secondary.hbond-cutoff=3.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for the `residues` subcommand.
#[derive(Args, Debug)]
pub struct ResiduesArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Only list residues of this chain.
    #[arg(long, value_name = "ID")]
    pub chain: Option<String>,
}

/// Arguments for the `bonds` subcommand.
#[derive(Args, Debug)]
pub struct BondsArgs {
    #[command(flatten)]
    pub load: LoadArgs,
}
