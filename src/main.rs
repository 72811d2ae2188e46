// Module declarations
mod assemble;
mod cli;
mod config;
mod config_file;
mod error;
mod graph;
mod inspect;
mod jsonld;
mod people;
mod spotlight;
mod turtle;
mod types;
mod util;
mod vocab;

// Re-export module items at crate root so modules can refer to each other
// through `crate::` without spelling out paths.
#[allow(unused_imports)]
pub(crate) use assemble::*;
#[allow(unused_imports)]
pub(crate) use cli::*;
#[allow(unused_imports)]
pub(crate) use config::*;
#[allow(unused_imports)]
pub(crate) use config_file::*;
#[allow(unused_imports)]
pub(crate) use error::*;
#[allow(unused_imports)]
pub(crate) use graph::*;
#[allow(unused_imports)]
pub(crate) use inspect::*;
#[allow(unused_imports)]
pub(crate) use jsonld::*;
#[allow(unused_imports)]
pub(crate) use people::*;
#[allow(unused_imports)]
pub(crate) use spotlight::*;
#[allow(unused_imports)]
pub(crate) use turtle::*;
#[allow(unused_imports)]
pub(crate) use types::*;
#[allow(unused_imports)]
pub(crate) use util::*;
#[allow(unused_imports)]
pub(crate) use vocab::*;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,spacegraph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            let mut config = load_file_config(args.config.as_deref())?;
            if let Some(path) = args.json_ld {
                config.json_ld_path = path;
            }
            if let Some(path) = args.turtle {
                config.turtle_path = path;
            }
            let agent = http_agent(&config);
            let people = OpenNotifyClient::new(agent.clone(), config.people_url.clone());
            let spotlight =
                SpotlightClient::new(agent, config.spotlight_url.clone(), config.confidence);
            let summary = run_space_graph(&config, &people, &spotlight)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Done: records={} astronauts={} fallbacks={} triples={} -> {}, {}",
                    summary.records,
                    summary.astronauts,
                    summary.fallbacks,
                    summary.triples,
                    summary.json_ld.display(),
                    summary.turtle.display()
                );
            }
            Ok(())
        }

        Command::Annotate {
            text,
            types,
            no_filter,
            config,
        } => {
            let config = load_file_config(config.as_deref())?;
            let spotlight = SpotlightClient::new(
                http_agent(&config),
                config.spotlight_url.clone(),
                config.confidence,
            );
            let filter = if no_filter {
                None
            } else {
                Some(types.unwrap_or_else(|| config.astronaut_type.clone()))
            };
            let matches = annotate_or_fallback(&spotlight, &config, &text, filter.as_deref());
            println!("{}", serde_json::to_string_pretty(&matches)?);
            Ok(())
        }

        Command::Inspect { path, config } => {
            let config = load_file_config(config.as_deref())?;
            let report = inspect_graph(&path, &config.namespaces)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }

        Command::Config { path } => {
            if path.exists() {
                eprintln!("Refusing to overwrite existing file: {}", path.display());
                std::process::exit(2);
            }
            save_file_config(&path, &SpaceGraphConfig::default())?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
