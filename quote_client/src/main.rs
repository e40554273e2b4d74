//! Quote Client — keeps a local list of categorized quotes in a JSON store file and
//! reconciles it with a remote quote collection.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client add "Simplicity is prerequisite for reliability." Engineering
//! quote_client show --category Engineering
//! quote_client import ./more_quotes.json
//! quote_client export --out quotes.json
//! quote_client --sync-interval 30 watch
//! ```
//!
//! Without a subcommand the client starts in watch mode: it prints the current
//! view, reads commands from stdin and syncs with the remote collection every
//! `--sync-interval` seconds until Ctrl+C or `quit`.
#![warn(missing_docs)]
mod action;
mod app;
mod args;
mod watch;

use crate::app::{App, IMPORTED_MESSAGE, INVALID_IMPORT_MESSAGE};
use crate::args::{Args, Command};
use crate::watch::Watcher;
use clap::Parser;
use log::{error, info, warn};
use quote_common::{FileBlobStore, QuoteError, QuoteStore, Result};
use quote_sync::{HttpRemote, SyncEngine, SyncReport};
use std::fs;
use std::path::Path;
use std::process;
use std::time::Duration;

fn main() {
    init_logger();
    let args = Args::parse();

    if let Err(e) = run(args) {
        if e.is_user_facing() {
            eprintln!("{}", e);
        } else {
            error!("Command failed: {}", e);
        }
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let blob = open_blob_store(&args.store)?;
    let remote = HttpRemote::new(&args.endpoint, args.timeout.map(Duration::from_secs))?;
    let app = App::new(QuoteStore::open(blob), SyncEngine::new(remote));
    run_command(app, args.command, args.sync_interval)
}

fn run_command(
    mut app: App<FileBlobStore, HttpRemote>,
    command: Option<Command>,
    sync_interval: u64,
) -> Result<()> {
    match command.unwrap_or(Command::Watch) {
        Command::Show { category } => {
            let output = match category {
                Some(category) => app.filter(&category)?,
                None => app.show(),
            };
            println!("{}", output);
        }
        Command::Random => println!("{}", app.random(&mut rand::rng())),
        Command::Categories => println!("{}", app.categories()),
        Command::Add { text, category, no_sync } => {
            let report = app.add(&text, &category, !no_sync)?;
            println!("{}", app.show());
            print_report(report.as_ref());
        }
        Command::Import { path, no_sync } => {
            let bytes = fs::read(&path)?;
            match app.import(&bytes, !no_sync) {
                Ok((count, report)) => {
                    info!("Imported {} quotes from {}", count, path.display());
                    println!("{}", IMPORTED_MESSAGE);
                    println!("{}", app.show());
                    print_report(report.as_ref());
                }
                Err(e @ QuoteError::Parse(_)) => {
                    eprintln!("{}", INVALID_IMPORT_MESSAGE);
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }
        Command::Export { out } => {
            fs::write(&out, app.export()?)?;
            println!(
                "Exported {} quotes to {}",
                app.store().quotes().len(),
                out.display()
            );
        }
        Command::Sync => {
            let report = app.sync();
            println!("{}", report.view);
            print_report(Some(&report));
        }
        Command::Push => {
            if app.push() {
                println!("Quotes posted to the server.");
            } else {
                println!("The server did not accept the quotes.");
            }
        }
        Command::Watch => {
            Watcher::new(app).run(Duration::from_secs(sync_interval))?;
        }
    }
    Ok(())
}

fn print_report(report: Option<&SyncReport>) {
    if let Some(report) = report {
        println!("[notice] {}", report.notification.message);
    }
}

/// Opens the file-backed blob store, starting over if the file is unreadable JSON.
fn open_blob_store(path: &Path) -> Result<FileBlobStore> {
    match FileBlobStore::open(path) {
        Ok(store) => Ok(store),
        Err(QuoteError::Parse(e)) => {
            warn!(
                "Store file {} is not valid JSON ({}); starting from defaults",
                path.display(),
                e
            );
            Ok(FileBlobStore::fresh(path))
        }
        Err(e) => Err(e),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
