mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{formatters, Cli, Commands};
use notas::config::NotasConfig;
use notas::importers::{self, NoteSource};
use notas::symbols::yahoo::YahooSymbolLookup;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli.command) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            println!("{}", formatters::format_error_json(&err));
            std::process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Parse {
            broker,
            file,
            password,
            password_flag,
            from_text,
            table,
            timeout,
        } => {
            let mut config = NotasConfig::load()?;
            if let Some(secs) = timeout {
                config.lookup.timeout_secs = secs;
            }

            let lookup = YahooSymbolLookup::new(&config.lookup)
                .context("Failed to build symbol lookup client")?;
            let password = password.or(password_flag);
            let source = if from_text {
                NoteSource::Text
            } else {
                NoteSource::Pdf {
                    password: password.as_deref(),
                }
            };

            let records = importers::import_note(&file, source, broker, &lookup)?;
            info!("Parsed {} trades from {}", records.len(), file);

            if table {
                Ok(formatters::format_records_table(&records))
            } else {
                formatters::format_records_json(&records)
            }
        }
        Commands::Brokers => Ok(formatters::format_brokers()),
    }
}
