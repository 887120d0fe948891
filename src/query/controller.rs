//! Query submission lifecycle
//!
//! The UI thread never blocks on the network: submissions go to a worker
//! thread over a command channel and results come back over an event
//! channel, tagged with a request id. Resubmitting while a request is in
//! flight supersedes it; completion events for superseded ids are dropped,
//! so the newest question always wins.

use crate::config::AppConfig;
use crate::error::SamarthError;
use crate::query::client::{Answer, QueryClient};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// State of the current submission
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been made, or the last one was resolved and cleared
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request produced an answer
    Success,
    /// The last request failed
    Error,
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Idle => write!(f, "Idle"),
            RequestState::Loading => write!(f, "Loading"),
            RequestState::Success => write!(f, "Success"),
            RequestState::Error => write!(f, "Error"),
        }
    }
}

/// Commands sent to the query worker
#[derive(Clone, Debug)]
enum QueryCommand {
    Submit { question: String, request_id: Uuid },
    Shutdown,
}

/// Events emitted by the query worker
#[derive(Clone, Debug)]
enum QueryEvent {
    Completed { request_id: Uuid, answer: Answer },
    Failed { request_id: Uuid, error: SamarthError },
}

/// Resolution of the active request, surfaced to the UI by `poll`
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
    Answered(Answer),
    Failed(SamarthError),
}

/// Owns the submission state machine and the worker thread
pub struct QueryController {
    command_tx: Sender<QueryCommand>,
    event_rx: Receiver<QueryEvent>,
    state: RequestState,
    /// Id of the request whose resolution the UI is waiting for
    active_request: Option<Uuid>,
    worker: Option<JoinHandle<()>>,
}

impl QueryController {
    /// Spawn the worker thread and return the controller
    pub fn new(config: AppConfig) -> Self {
        let (command_tx, command_rx) = bounded::<QueryCommand>(16);
        let (event_tx, event_rx) = bounded::<QueryEvent>(16);

        let worker = thread::Builder::new()
            .name("query-worker".to_string())
            .spawn(move || run_worker(config, command_rx, event_tx))
            .ok();

        if worker.is_none() {
            warn!("[QUERY] Failed to spawn worker thread");
        }

        Self {
            command_tx,
            event_rx,
            state: RequestState::default(),
            active_request: None,
            worker,
        }
    }

    /// Current submission state
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Check if a request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Submit a question to the backend
    ///
    /// A whitespace-only question is a no-op. Otherwise the state always
    /// enters `Loading` before any resolution can be observed. Returns the
    /// request id, or `None` when nothing was submitted.
    pub fn submit(&mut self, question: &str) -> Option<Uuid> {
        if question.trim().is_empty() {
            return None;
        }

        let request_id = Uuid::new_v4();
        let command = QueryCommand::Submit {
            question: question.to_string(),
            request_id,
        };

        if let Err(e) = self.command_tx.send(command) {
            warn!("[QUERY] Failed to send submit command: {}", e);
            self.state = RequestState::Error;
            self.active_request = Some(request_id);
            return None;
        }

        if let Some(previous) = self.active_request {
            debug!("[QUERY] Request {} supersedes {}", request_id, previous);
        }

        self.state = RequestState::Loading;
        self.active_request = Some(request_id);
        info!("[QUERY] Submitted request {}", request_id);
        Some(request_id)
    }

    /// Drain worker events and resolve the active request
    ///
    /// Events for superseded request ids are discarded; at most one outcome
    /// is returned per call because only one request can be active.
    pub fn poll(&mut self) -> Option<QueryOutcome> {
        let mut outcome = None;

        while let Ok(event) = self.event_rx.try_recv() {
            let (request_id, resolution) = match event {
                QueryEvent::Completed { request_id, answer } => {
                    (request_id, QueryOutcome::Answered(answer))
                }
                QueryEvent::Failed { request_id, error } => {
                    (request_id, QueryOutcome::Failed(error))
                }
            };

            if self.active_request != Some(request_id) {
                debug!("[QUERY] Dropping stale response for {}", request_id);
                continue;
            }

            self.state = match resolution {
                QueryOutcome::Answered(_) => RequestState::Success,
                QueryOutcome::Failed(_) => RequestState::Error,
            };
            self.active_request = None;
            outcome = Some(resolution);
        }

        outcome
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        let _ = self.command_tx.send(QueryCommand::Shutdown);
        // The worker may be mid-request (no HTTP timeout), so it is
        // detached rather than joined.
        drop(self.worker.take());
    }
}

/// Worker loop: one request at a time, driven by a current-thread runtime
fn run_worker(
    config: AppConfig,
    command_rx: Receiver<QueryCommand>,
    event_tx: Sender<QueryEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            warn!("[QUERY] Failed to build runtime: {}", e);
            return;
        }
    };

    let client = QueryClient::new(&config);
    info!("[QUERY] Worker started for {}", config.api_base_url);

    while let Ok(command) = command_rx.recv() {
        match command {
            QueryCommand::Submit {
                question,
                request_id,
            } => {
                let event = match runtime.block_on(client.ask(&question)) {
                    Ok(answer) => QueryEvent::Completed { request_id, answer },
                    Err(error) => {
                        warn!("[QUERY] Request {} failed: {}", request_id, error);
                        QueryEvent::Failed { request_id, error }
                    }
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
            QueryCommand::Shutdown => break,
        }
    }

    info!("[QUERY] Worker stopped");
}
