//! `regform` - CLI for the registration book
//!
//! Each invocation opens the configured database, runs one command through a
//! [`FormSession`], and exits.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use regform::cli::{
    render_records, AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand,
};
use regform::{init_logging, Config, FormSession, SqliteRecordStore, SubmitOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    debug!("Using database {}", config.database_path().display());

    match cli.command {
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Delete(cmd) => handle_delete(&config, &cmd).await,
        Command::Status(cmd) => handle_status(&config, cmd.json).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_session(config: &Config) -> anyhow::Result<FormSession<SqliteRecordStore>> {
    let path = config.database_path();
    let store = SqliteRecordStore::open(&path)
        .with_context(|| format!("opening database {}", path.display()))?;
    Ok(FormSession::new(store, config.form.on_incomplete))
}

async fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    session.set_name(cmd.name);
    session.set_email(cmd.email);

    match session.submit().await? {
        SubmitOutcome::Saved(id) => println!("Registered with id {id}."),
        SubmitOutcome::Skipped => println!("Name and email are both required; nothing saved."),
    }
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    let records = session.load().await?;
    println!("{}", render_records(records, cmd.format)?);
    Ok(())
}

async fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    if session.delete(cmd.id).await? {
        println!("Deleted record {}.", cmd.id);
    } else {
        println!("No record with id {}.", cmd.id);
    }
    println!("{} registration(s) remain.", session.entries().len());
    Ok(())
}

async fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let session = open_session(config)?;
    let stats = session.store().stats().await?;

    if json {
        let status = serde_json::json!({
            "database": config.database_path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("regform status");
        println!("--------------");
        println!("Database:      {}", config.database_path().display());
        println!("Records:       {}", stats.total_records);
        if let (Some(lowest), Some(highest)) = (stats.lowest_id, stats.highest_id) {
            println!("Id range:      {lowest}..={highest}");
        }
        println!("Next id:       {}", stats.next_id);
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Database name:      {}", config.storage.database_name);
                println!();
                println!("[Form]");
                println!("  On incomplete:      {}", config.form.on_incomplete);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
