use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use board_logging::{board_debug, board_info, board_warn};
use clap::Parser;
use planboard_core::{update, AppState, Msg};
use planboard_engine::{decode_push, EngineHandle, SnapshotStore};

use super::config::{load_config, AppConfig, Cli};
use super::effects::EffectRunner;
use super::{logging, persistence, render};

const ENGINE_POLL: Duration = Duration::from_millis(100);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    config.apply_cli(&cli);
    logging::initialize(config.log.destination, config.log_level(), &config.log.file);
    board_info!("Starting planboard session for {} at {}", config.server.url, cli.path);

    let mut session = Session::open(&config)?;
    session.start(cli.path.clone());
    session.await_initial_loads();

    if let Some(events) = &cli.events {
        let delivered = session
            .consume_push_stream(events)
            .with_context(|| format!("reading push messages from {}", events.display()))?;
        board_info!("Processed {} push messages", delivered);
    }

    for line in render::render(session.state(), session.runner.date_pack(), &chrono::Utc::now()) {
        println!("{line}");
    }
    for url in session.runner.redirects() {
        println!("redirect {url}");
    }

    session.end();
    Ok(())
}

/// One page session: the state, and the runner that executes its effects.
struct Session {
    state: AppState,
    runner: EffectRunner,
    store: SnapshotStore,
}

impl Session {
    fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config.fetch_settings(), config.retry_policy())
            .context("starting fetch engine")?;
        let store = SnapshotStore::new(config.cache_dir.clone());
        Ok(Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine, store.clone()),
            store,
        })
    }

    fn state(&self) -> &AppState {
        &self.state
    }

    fn start(&mut self, path: String) {
        self.dispatch(Msg::SessionStarted { path });
        for msg in persistence::restore_messages(&self.store) {
            self.dispatch(msg);
        }
    }

    /// Blocks until the catalog and project fetches both report back.
    fn await_initial_loads(&mut self) {
        while self.runner.has_pending_fetches() {
            if let Some(event) = self.runner.engine().recv_timeout(ENGINE_POLL) {
                let msg = self.runner.complete(event);
                self.dispatch(msg);
            }
        }
    }

    /// Feeds push messages in receipt order; each is fully applied, including
    /// any redirect it triggers, before the next line is read.
    fn consume_push_stream(&mut self, source: &Path) -> io::Result<usize> {
        let reader: Box<dyn BufRead> = if source == Path::new("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(source)?))
        };

        let mut delivered = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match decode_push(&line) {
                Some(event) => {
                    board_debug!("Push entity_deleted entity={}", event.entity);
                    delivered += 1;
                    self.dispatch(Msg::PushReceived(event));
                }
                None => board_warn!("Skipping push message that is not an entity deletion"),
            }
        }
        Ok(delivered)
    }

    fn end(&mut self) {
        self.dispatch(Msg::SessionEnded);
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }
        if self.state.consume_dirty() {
            board_debug!("Session state changed: path={}", self.state.current_path());
        }
    }
}
