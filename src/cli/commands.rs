use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "entitykit")]
#[command(version, about = "Validate, repair, migrate and generate entity collections")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every repair (debug level)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a collection export and repair what can be repaired
    Validate {
        /// Collection export to check (overrides `input` in the config file)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Write the repaired collection here
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Do not write the repaired collection even if an output is configured
        #[arg(long)]
        no_output: bool,

        /// YAML or JSON file with paths and required-field schema
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert legacy associations into relationships
    Migrate {
        /// Collection export to migrate
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Write the migrated collection here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate synthetic entities
    Generate {
        /// Number of entities
        #[arg(long, short = 'n', default_value_t = 3)]
        count: usize,

        /// Owner identifier for every record
        #[arg(long)]
        owner: Option<String>,

        /// Creation timestamp for every record (RFC 3339, defaults to now)
        #[arg(long)]
        created: Option<String>,

        /// Add a history snapshot to each entity
        #[arg(long)]
        history: bool,

        /// Write the collection here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}
