use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spacegraph")]
#[command(about = "Knowledge graph of the people currently in space", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Args, Default)]
pub(crate) struct RunArgs {
    /// JSON config file (missing file means defaults)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Override the JSON-LD output path
    #[arg(long)]
    pub(crate) json_ld: Option<PathBuf>,
    /// Override the Turtle output path
    #[arg(long)]
    pub(crate) turtle: Option<PathBuf>,
    /// Print the run summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the crew list, annotate it and write the graph (default).
    Run(RunArgs),

    /// Resolve a single string and print the matches.
    Annotate {
        text: String,
        /// Type filter (default: the configured astronaut type)
        #[arg(long, conflicts_with = "no_filter")]
        types: Option<String>,
        /// Accept matches of any type
        #[arg(long)]
        no_filter: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Read a written graph (.ttl, .json, .jsonld) and print counts.
    Inspect {
        path: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration to a file.
    Config { path: PathBuf },
}
