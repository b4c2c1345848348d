use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use board_logging::{board_error, board_warn};
use tokio::task::JoinError;

use crate::fetch::{FetchSettings, ProjectSource, ReqwestSource};
use crate::{CatalogLoad, CatalogLoader, EngineEvent, FailureKind, FetchError, RetryPolicy};

#[derive(Debug, Clone, Copy)]
enum EngineCommand {
    LoadCatalog,
    LoadProjects,
}

/// Runs server fetches on a background tokio runtime and reports results
/// over a channel, in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, policy: RetryPolicy) -> io::Result<Self> {
        let source = Arc::new(ReqwestSource::new(settings));
        let loader = CatalogLoader::new(source.clone(), policy);
        Self::with_sources(loader, source)
    }

    pub fn with_sources(
        loader: CatalogLoader,
        projects: Arc<dyn ProjectSource>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("planboard-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let loader = loader.clone();
                let projects = projects.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let task = tokio::spawn(handle_command(loader, projects, command));
                    let event = match task.await {
                        Ok(event) => event,
                        Err(err) => aborted(command, &err),
                    };
                    let _ = event_tx.send(event);
                });
            }
            // Dropping the runtime here abandons any retry still sleeping.
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_catalog(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadCatalog);
    }

    pub fn load_projects(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadProjects);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    loader: CatalogLoader,
    projects: Arc<dyn ProjectSource>,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::LoadCatalog => EngineEvent::CatalogLoaded(loader.load_catalog().await),
        EngineCommand::LoadProjects => {
            let result = projects.fetch_projects().await;
            if let Err(err) = &result {
                board_warn!("Project list fetch failed: {}", err);
            }
            EngineEvent::ProjectsLoaded(result)
        }
    }
}

/// Reports a command whose task died before producing a result as a failed load.
fn aborted(command: EngineCommand, err: &JoinError) -> EngineEvent {
    board_error!("{:?} task aborted: {}", command, err);
    let error = FetchError::new(FailureKind::Aborted, err.to_string());
    match command {
        // The attempt count died with the task.
        EngineCommand::LoadCatalog => EngineEvent::CatalogLoaded(CatalogLoad::exhausted(0, error)),
        EngineCommand::LoadProjects => EngineEvent::ProjectsLoaded(Err(error)),
    }
}
