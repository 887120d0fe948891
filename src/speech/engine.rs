//! Recognition engine contract
//!
//! A platform speech service is continuous, session-oriented, and
//! event-driven: once started it streams interim and final result
//! hypotheses until stopped, it errors, or it ends on its own. This module
//! pins that contract down as a trait so the adapter and the tests never
//! depend on a concrete engine.

use crate::error::{Result, SamarthError};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

/// Configuration for a recognition session
#[derive(Clone, Debug)]
pub struct RecognitionConfig {
    /// BCP-47 language tag; fixed to Indian English
    pub language: String,
    /// Keep the session open across utterances
    pub continuous: bool,
    /// Stream provisional hypotheses before they stabilize
    pub interim_results: bool,
    /// Hypotheses per result; only the first is consumed
    pub max_alternatives: usize,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: "en-IN".to_string(),
            continuous: true,
            interim_results: true,
            max_alternatives: 3,
        }
    }
}

/// Engine failure classes surfaced through the event stream
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    /// The user or platform denied microphone access
    PermissionDenied,
    /// The recognition service lost connectivity
    Network,
    /// Any other engine-specific code
    Other(String),
}

impl RecognitionErrorCode {
    pub fn into_error(self) -> SamarthError {
        match self {
            RecognitionErrorCode::PermissionDenied => SamarthError::SpeechPermissionDenied,
            RecognitionErrorCode::Network => SamarthError::SpeechNetwork,
            RecognitionErrorCode::Other(code) => SamarthError::Speech(code),
        }
    }
}

/// Events streamed by a recognition session
#[derive(Clone, Debug)]
pub enum RecognitionEvent {
    /// The session is live and capturing
    Started,
    /// A result hypothesis batch
    Result {
        /// Alternative transcripts, best first
        alternatives: Vec<String>,
        /// Final results are stable; interim ones may still change
        is_final: bool,
    },
    /// The session failed
    Error(RecognitionErrorCode),
    /// The session ended, normally or after an error
    Ended,
}

/// A continuous speech-to-text session provider
pub trait RecognitionEngine: Send {
    /// Whether the runtime environment can recognize speech at all
    fn is_supported(&self) -> bool;

    /// Begin a session with the given configuration
    fn start(&mut self, config: &RecognitionConfig) -> Result<()>;

    /// End the session; the engine emits `Ended` when capture stops
    fn stop(&mut self);

    /// Event stream for the engine's sessions
    fn events(&self) -> Receiver<RecognitionEvent>;
}

/// Engine for environments without a speech service
///
/// Reports unsupported so the UI hides voice controls; starting it is a
/// programming error and fails cleanly.
pub struct UnsupportedEngine {
    events: (Sender<RecognitionEvent>, Receiver<RecognitionEvent>),
}

impl Default for UnsupportedEngine {
    fn default() -> Self {
        Self { events: unbounded() }
    }
}

impl RecognitionEngine for UnsupportedEngine {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _config: &RecognitionConfig) -> Result<()> {
        Err(SamarthError::SpeechStart(
            "speech recognition is not supported in this environment".to_string(),
        ))
    }

    fn stop(&mut self) {}

    fn events(&self) -> Receiver<RecognitionEvent> {
        self.events.1.clone()
    }
}

/// Scriptable engine for tests and development
///
/// Sessions are driven from the outside through a [`ScriptedEngineHandle`]:
/// a test pushes interim/final results and error codes exactly as a platform
/// engine would emit them.
pub struct ScriptedEngine {
    event_tx: Sender<RecognitionEvent>,
    event_rx: Receiver<RecognitionEvent>,
    active: bool,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            event_tx,
            event_rx,
            active: false,
        }
    }

    /// Handle for injecting events into the session
    pub fn handle(&self) -> ScriptedEngineHandle {
        ScriptedEngineHandle {
            event_tx: self.event_tx.clone(),
        }
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn is_supported(&self) -> bool {
        true
    }

    fn start(&mut self, config: &RecognitionConfig) -> Result<()> {
        debug!(
            "[SPEECH] Scripted session started ({}, {} alternatives)",
            config.language, config.max_alternatives
        );
        self.active = true;
        self.event_tx
            .send(RecognitionEvent::Started)
            .map_err(|e| SamarthError::SpeechStart(e.to_string()))
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            let _ = self.event_tx.send(RecognitionEvent::Ended);
        }
    }

    fn events(&self) -> Receiver<RecognitionEvent> {
        self.event_rx.clone()
    }
}

/// Injects recognition events into a [`ScriptedEngine`] session
#[derive(Clone)]
pub struct ScriptedEngineHandle {
    event_tx: Sender<RecognitionEvent>,
}

impl ScriptedEngineHandle {
    /// Emit an interim (still mutable) hypothesis
    pub fn interim(&self, text: &str) {
        let _ = self.event_tx.send(RecognitionEvent::Result {
            alternatives: vec![text.to_string()],
            is_final: false,
        });
    }

    /// Emit a final (stable) transcript segment
    pub fn finalize(&self, text: &str) {
        let _ = self.event_tx.send(RecognitionEvent::Result {
            alternatives: vec![text.to_string()],
            is_final: true,
        });
    }

    /// Emit a result with multiple alternative hypotheses
    pub fn result_with_alternatives(&self, alternatives: Vec<String>, is_final: bool) {
        let _ = self.event_tx.send(RecognitionEvent::Result {
            alternatives,
            is_final,
        });
    }

    /// Emit an engine error
    pub fn error(&self, code: RecognitionErrorCode) {
        let _ = self.event_tx.send(RecognitionEvent::Error(code));
    }

    /// Emit a natural session end
    pub fn end(&self) {
        let _ = self.event_tx.send(RecognitionEvent::Ended);
    }
}
