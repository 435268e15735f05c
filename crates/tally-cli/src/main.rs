//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                               Initialize database
//!   tally add expense --amount 12.50         Record a transaction
//!   tally dashboard --filter this-month      Metrics, insights and charts
//!   tally export --format csv -o out.csv     Export the filtered view

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stderr keeps stdout clean for exports
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| settings.database.clone().into());
    let view = commands::ViewOptions::today(
        cli.filter.unwrap_or(settings.default_filter),
        settings.money_format(),
    );

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Add {
            kind,
            amount,
            category,
            date,
            note,
        } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_add(
                &db,
                &view,
                kind,
                amount,
                category.as_deref(),
                date,
                note.as_deref(),
            )
        }
        Commands::Categories { kind } => commands::cmd_categories(kind),
        Commands::List => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_list(&db, &view)
        }
        Commands::Dashboard { json } => commands::cmd_dashboard(&db_path, &view, json),
        Commands::Insights => commands::cmd_insights(&db_path, &view),
        Commands::Edit { row, set } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_edit(&db, &view, row, &set)
        }
        Commands::Delete { rows } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_delete(&db, &view, &rows)
        }
        Commands::Apply { file } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_apply(&db, &view, &file)
        }
        Commands::Reset { yes } => commands::cmd_reset(&db_path, yes),
        Commands::Export { format, output } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_export(&db, &view, format, output.as_deref())
        }
    }
}
