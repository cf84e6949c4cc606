use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use vibedeck::config::AppConfig;
use vibedeck::form::{ConnectionForm, Field, SaveOutcome};
use vibedeck::model::Connection;
use vibedeck::session::{BrowserLauncher, SessionLauncher, SessionRequest};
use vibedeck::store::{ConnectionsStore, KeyValueStore};

use crate::Commands;

#[derive(Parser)]
#[command(name = "vibedeck")]
#[command(about = "Registry and launcher for remote terminal sessions", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding the connection registry
    #[arg(long, value_name = "DIR", env = "VIBEDECK_STORE", global = true)]
    store: Option<PathBuf>,

    /// Keep the registry in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Command used to open session URLs (the URL is appended)
    #[arg(long, value_name = "CMD", env = "VIBEDECK_OPENER", global = true)]
    opener: Option<String>,

    /// Write logs here instead of next to the registry
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.store, cli.ephemeral, cli.opener, cli.log_file);
    vibedeck::logging::init(config.log_path().as_deref())?;

    match cli.command {
        None => vibedeck::tui::run(&config)?,
        Some(command) => {
            let store = ConnectionsStore::new(config.open_kv());
            handle_command(&config, &store, command)?
        }
    }

    Ok(())
}

fn handle_command<K: KeyValueStore>(
    config: &AppConfig,
    store: &ConnectionsStore<K>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::List { json } => {
            let list = store.load();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&list).context("serialize connections json")?
                );
            } else if list.is_empty() {
                println!("(no connections)");
            } else {
                for c in &list {
                    println!("{}  {:<20}  {}", c.id, c.name, c.endpoint());
                }
            }
        }
        Commands::Add { name, host, port } => {
            let mut form = ConnectionForm::new_connection();
            form.set_field(Field::Name, &name);
            form.set_field(Field::Host, &host);
            if let Some(port) = port {
                form.set_field(Field::Port, &port);
            }
            let c = submit(&mut form, store)?;
            println!("Added {} ({})", c.name, c.id);
        }
        Commands::Edit {
            id,
            name,
            host,
            port,
        } => {
            let target = require_connection(store, &id)?;
            let mut form = ConnectionForm::open(store, Some(&target.id));
            for (field, value) in [(Field::Name, name), (Field::Host, host), (Field::Port, port)] {
                if let Some(value) = value {
                    form.set_field(field, &value);
                }
            }
            let c = submit(&mut form, store)?;
            println!("Updated {} ({})", c.name, c.id);
        }
        Commands::Remove { id } => match store.resolve(&id) {
            Some(c) => {
                store.delete(&c.id)?;
                println!("Removed {} ({})", c.name, c.id);
            }
            None => println!("No connection matching `{}`", id),
        },
        Commands::Url { id, stream } => {
            let c = require_connection(store, &id)?;
            if stream {
                println!("{}", c.stream_url());
            } else {
                println!("{}", c.session_url());
            }
        }
        Commands::Open { id } => {
            let c = require_connection(store, &id)?;
            let request = SessionRequest::for_connection(&c);
            BrowserLauncher::new(config.opener.clone()).launch(&request)?;
            println!("Opened {} at {}", request.display_name, request.url);
        }
    }

    Ok(())
}

fn submit<K: KeyValueStore>(
    form: &mut ConnectionForm,
    store: &ConnectionsStore<K>,
) -> Result<Connection> {
    match form.submit(store)? {
        SaveOutcome::Saved(c) => Ok(c),
        SaveOutcome::Rejected(err) => anyhow::bail!("{}", err),
    }
}

pub(crate) fn require_connection<K: KeyValueStore>(
    store: &ConnectionsStore<K>,
    query: &str,
) -> Result<Connection> {
    store
        .resolve(query)
        .with_context(|| format!("no connection matching `{}` (see `vibedeck list`)", query))
}
