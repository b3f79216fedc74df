pub mod commands;

use clap::{Parser, Subcommand};
use optica_core::config::{AppConfig, LoadOptions, LogFormat};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "optica",
    about = "Optica storefront CLI",
    long_about = "Browse the optical catalog with facets, run the lens recommendation rules, and walk a quote request end to end.",
    after_help = "Examples:\n  optica facets --category frames\n  optica filter --category frames --facet Gender=Male\n  optica recommend --purpose distance --lifestyle active --degree high\n  optica quote --item f1 --purpose near --lifestyle digital --degree low --lens l1"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the facet sections offered for a category")]
    Facets {
        #[arg(long, help = "frames | lenses | accessories")]
        category: String,
    },
    #[command(about = "Filter the catalog by category, search text and facet selections")]
    Filter {
        #[arg(long, default_value = "all", help = "all | frames | lenses | accessories")]
        category: String,
        #[arg(long, default_value = "", help = "Case-insensitive match on name or brand")]
        search: String,
        #[arg(long = "facet", help = "Repeatable `Section=Option` selection")]
        facets: Vec<String>,
    },
    #[command(about = "Shortlist lenses for the three anamnesis answers")]
    Recommend {
        #[arg(long, help = "distance | near | multifocal | occupational")]
        purpose: Option<String>,
        #[arg(long, help = "digital | sun | active")]
        lifestyle: Option<String>,
        #[arg(long, help = "low | medium | high")]
        degree: Option<String>,
    },
    #[command(about = "Run a full quote wizard pass and print the quote summary")]
    Quote {
        #[arg(long = "item", required = true, help = "Repeatable product id to add to the budget")]
        items: Vec<String>,
        #[arg(long)]
        purpose: Option<String>,
        #[arg(long)]
        lifestyle: Option<String>,
        #[arg(long)]
        degree: Option<String>,
        #[arg(long, help = "Lens id chosen from the shortlist")]
        lens: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Facets { category } => commands::facets::run(&category),
        Command::Filter { category, search, facets } => {
            commands::filter::run(&category, &search, &facets)
        }
        Command::Recommend { purpose, lifestyle, degree } => commands::recommend::run(
            purpose.as_deref(),
            lifestyle.as_deref(),
            degree.as_deref(),
        ),
        Command::Quote { items, purpose, lifestyle, degree, lens } => {
            commands::quote::run(commands::quote::QuoteArgs {
                items: &items,
                purpose: purpose.as_deref(),
                lifestyle: lifestyle.as_deref(),
                degree: degree.as_deref(),
                lens: lens.as_deref(),
            })
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

// Logs go to stderr so stdout only carries command output. A config that fails
// to load is reported by the command itself, so logging just stays off.
fn init_logging() {
    use tracing::Level;

    let Ok(config) = AppConfig::load(LoadOptions::default()) else {
        return;
    };
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
