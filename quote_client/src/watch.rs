//! Interactive watch mode.
//!
//! A single thread owns the `App` and multiplexes every source of work with
//! crossbeam `select!`:
//!
//! - user actions — lines read from stdin by a reader thread;
//! - the sync timer — a `tick` channel firing every `sync_interval`;
//! - network completions — fetches and pushes run on short-lived worker threads
//!   and post their results back, so a slow remote never blocks user input;
//! - notification expiry — a short `tick` that hides notices after three seconds;
//! - shutdown — Ctrl+C.
//!
//! A fetched snapshot is merged with the list as it is when the result arrives.
//! Overlapping syncs are not coordinated: each merge is written back in the order
//! results come in.
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, never, select, tick, unbounded};
use log::{debug, error, info, warn};
use quote_common::blob::BlobStore;
use quote_common::config::{ALL_CATEGORIES, EXPORT_FILE_NAME};
use quote_common::{Notification, Quote, QuoteError, Result};
use quote_sync::{RemoteCollection, SyncEngine, SyncReport};

use crate::action::{self, Action, Verb};
use crate::app::{App, IMPORTED_MESSAGE, INVALID_IMPORT_MESSAGE};

/// How often visible notifications are checked for expiry.
const NOTICE_CHECK_MS: u64 = 250;

/// Results posted back by network worker threads.
#[derive(Debug)]
pub enum NetEvent {
    /// A remote snapshot is ready to be merged.
    Fetched(Vec<Quote>),
    /// A push finished with the given acceptance.
    Pushed(bool),
}

/// What the loop should do after handling an action.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Keep going and start a background sync.
    Sync,
    /// Keep going and start a background push.
    Push,
    /// Stdin closed; keep syncing without input.
    InputClosed,
    /// Leave the loop.
    Quit,
}

/// Spawns a worker thread that fetches the remote snapshot.
fn spawn_fetch<R>(engine: SyncEngine<R>, tx: Sender<NetEvent>)
where
    R: RemoteCollection + 'static,
{
    thread::spawn(move || {
        let remote = engine.fetch_remote();
        if let Err(e) = tx.send(NetEvent::Fetched(remote)) {
            error!("Failed to deliver fetched quotes: {}", e);
        }
    });
}

/// Spawns a worker thread that posts `quotes`.
fn spawn_push<R>(engine: SyncEngine<R>, quotes: Vec<Quote>, tx: Sender<NetEvent>)
where
    R: RemoteCollection + 'static,
{
    thread::spawn(move || {
        let accepted = engine.push_local(&quotes);
        if let Err(e) = tx.send(NetEvent::Pushed(accepted)) {
            error!("Failed to deliver push result: {}", e);
        }
    });
}

/// Spawns the stdin reader. The channel disconnects when stdin closes.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader stopping...");
    });
    rx
}

/// Installs a Ctrl+C handler and returns the channel it signals on.
///
/// Without a handler the returned channel never fires.
fn shutdown_channel() -> Receiver<()> {
    let (tx, rx) = unbounded::<()>();
    match ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down...");
        let _ = tx.send(());
    }) {
        Ok(()) => rx,
        Err(e) => {
            warn!("Failed to install Ctrl+C handler: {}", e);
            never()
        }
    }
}

/// Channels the watch loop selects over.
pub struct Sources {
    input: Receiver<String>,
    sync_timer: Receiver<Instant>,
    notice_timer: Receiver<Instant>,
    shutdown: Receiver<()>,
    net_tx: Sender<NetEvent>,
    net_rx: Receiver<NetEvent>,
}

impl Sources {
    /// Bundles the event sources; network results get a fresh internal channel.
    pub fn new(
        input: Receiver<String>,
        sync_timer: Receiver<Instant>,
        notice_timer: Receiver<Instant>,
        shutdown: Receiver<()>,
    ) -> Self {
        let (net_tx, net_rx) = unbounded::<NetEvent>();
        Sources {
            input,
            sync_timer,
            notice_timer,
            shutdown,
            net_tx,
            net_rx,
        }
    }
}

/// Interactive front end state: the app plus the notification currently shown.
pub struct Watcher<B: BlobStore, R: RemoteCollection> {
    app: App<B, R>,
    notice: Option<Notification>,
}

impl<B: BlobStore, R: RemoteCollection + 'static> Watcher<B, R> {
    /// Wraps an application.
    pub fn new(app: App<B, R>) -> Self {
        Self { app, notice: None }
    }

    /// The wrapped application.
    pub fn app(&self) -> &App<B, R> {
        &self.app
    }

    /// The notification shown right now, if any.
    pub fn notice(&self) -> Option<&Notification> {
        self.notice.as_ref()
    }

    fn notify(&mut self, message: &str) {
        println!("[notice] {}", message);
        self.notice = Some(Notification::new(message));
    }

    /// Hides the current notification once it has expired at `now`.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
            debug!("Notification hidden");
            self.notice = None;
        }
    }

    /// Handles one input line and returns what the loop should do next.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        let action: Action = match line.parse() {
            Ok(action) => action,
            Err(e) => {
                println!("{}", e);
                return Flow::Continue;
            }
        };
        match self.handle_action(&action) {
            Ok(flow) => flow,
            Err(e) => {
                self.report_error(&action, e);
                Flow::Continue
            }
        }
    }

    fn handle_action(&mut self, action: &Action) -> Result<Flow> {
        match action.verb {
            Verb::Show => println!("{}", self.app.show()),
            Verb::Filter => {
                let category = if action.rest.is_empty() {
                    ALL_CATEGORIES
                } else {
                    action.rest.as_str()
                };
                println!("{}", self.app.filter(category)?);
            }
            Verb::Random => println!("{}", self.app.random(&mut rand::rng())),
            Verb::Categories => println!("{}", self.app.categories()),
            Verb::Add => {
                let (text, category) = action.text_and_category();
                self.app.add(text, category, false)?;
                println!("{}", self.app.show());
                return Ok(Flow::Sync);
            }
            Verb::Import => {
                let bytes = fs::read(Path::new(&action.rest))?;
                self.app.import(&bytes, false)?;
                self.notify(IMPORTED_MESSAGE);
                println!("{}", self.app.show());
                return Ok(Flow::Sync);
            }
            Verb::Export => {
                let path = if action.rest.is_empty() {
                    EXPORT_FILE_NAME
                } else {
                    action.rest.as_str()
                };
                fs::write(path, self.app.export()?)?;
                println!(
                    "Exported {} quotes to {}",
                    self.app.store().quotes().len(),
                    path
                );
            }
            Verb::Sync => return Ok(Flow::Sync),
            Verb::Push => return Ok(Flow::Push),
            Verb::Help => println!("{}", action::help()),
            Verb::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_error(&self, action: &Action, e: QuoteError) {
        match (&action.verb, &e) {
            (Verb::Import, QuoteError::Parse(_)) => {
                warn!("Import failed: {}", e);
                println!("{}", INVALID_IMPORT_MESSAGE);
            }
            (_, QuoteError::Validation(message)) => println!("{}", message),
            _ => {
                error!("{} failed: {}", action.verb, e);
                println!("{}", e);
            }
        }
    }

    /// Merges a fetched snapshot and shows the outcome.
    pub fn on_fetched(&mut self, remote: Vec<Quote>) -> SyncReport {
        let report = self.app.apply_remote(remote);
        println!("{}", report.view);
        self.notify(&report.notification.message);
        report
    }

    /// Waits for the next event from `sources`, handles it and dispatches the
    /// resulting flow. Returns `false` once the loop should stop.
    pub fn step(&mut self, sources: &mut Sources) -> Result<bool> {
        let flow = select! {
            recv(sources.input) -> line => match line {
                Ok(line) => self.handle_line(&line),
                Err(_) => Flow::InputClosed,
            },
            recv(sources.sync_timer) -> _ => {
                debug!("Sync timer fired");
                Flow::Sync
            },
            recv(sources.net_rx) -> event => match event {
                Ok(NetEvent::Fetched(remote)) => {
                    self.on_fetched(remote);
                    Flow::Continue
                }
                Ok(NetEvent::Pushed(accepted)) => {
                    info!("Push finished, accepted: {}", accepted);
                    Flow::Continue
                }
                Err(e) => return Err(QuoteError::ChannelRecv(e.to_string())),
            },
            recv(sources.notice_timer) -> now => {
                if let Ok(now) = now {
                    self.expire_notice(now);
                }
                Flow::Continue
            },
            recv(sources.shutdown) -> _ => Flow::Quit,
        };

        match flow {
            Flow::Continue => {}
            Flow::Sync => spawn_fetch(self.app.engine().clone(), sources.net_tx.clone()),
            Flow::Push => spawn_push(
                self.app.engine().clone(),
                self.app.store().quotes().to_vec(),
                sources.net_tx.clone(),
            ),
            Flow::InputClosed => {
                info!("Input closed; still syncing until Ctrl+C");
                sources.input = never();
            }
            Flow::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Runs the event loop until `quit`, Ctrl+C, or a broken internal channel.
    pub fn run(mut self, sync_interval: Duration) -> Result<()> {
        let mut sources = Sources::new(
            spawn_stdin_reader(),
            tick(sync_interval),
            tick(Duration::from_millis(NOTICE_CHECK_MS)),
            shutdown_channel(),
        );

        println!("{}", self.app.show());
        println!(
            "Type `help` for commands. Syncing every {}s.",
            sync_interval.as_secs()
        );

        while self.step(&mut sources)? {}
        info!("Watch loop stopping...");
        Ok(())
    }
}
