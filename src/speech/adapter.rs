//! Speech input adapter
//!
//! Owns a recognition engine for the lifetime of the UI and folds its event
//! stream into question text: final transcript segments are committed,
//! interim ones are shown but never committed, and a 2-second silence
//! window auto-stops the session.
//!
//! State machine: `idle <-> listening`, driven by start/stop calls and the
//! engine's `Started`/`Error`/`Ended` events. All transitions happen on the
//! UI thread inside `pump`, so buffer resets and timer resets are atomic
//! with the state change.

use crate::error::{Result, SamarthError};
use crate::speech::engine::{RecognitionConfig, RecognitionEngine, RecognitionEvent};
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Stop the session after this much silence
///
/// This is policy, not an engine default: continuous sessions otherwise
/// stay open indefinitely.
pub const SILENCE_TIMEOUT: Duration = Duration::from_secs(2);

/// What a pump pass produced for the UI to apply
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeechUpdate {
    /// Final transcript text to append to the question (trimmed, batch-joined)
    pub committed: Option<String>,
    /// Error to surface to the user
    pub error: Option<SamarthError>,
}

impl SpeechUpdate {
    fn is_empty(&self) -> bool {
        self.committed.is_none() && self.error.is_none()
    }
}

/// Wraps a recognition engine into start/stop/toggle with transcript state
pub struct SpeechInputAdapter {
    engine: Box<dyn RecognitionEngine>,
    events: Receiver<RecognitionEvent>,
    config: RecognitionConfig,
    supported: bool,
    listening: bool,
    interim: String,
    silence_deadline: Option<Instant>,
}

impl SpeechInputAdapter {
    /// Take ownership of an engine; released again when the adapter drops
    pub fn new(engine: Box<dyn RecognitionEngine>) -> Self {
        let events = engine.events();
        let supported = engine.is_supported();
        if !supported {
            info!("[SPEECH] Recognition not supported; voice controls will be hidden");
        }

        Self {
            engine,
            events,
            config: RecognitionConfig::default(),
            supported,
            listening: false,
            interim: String::new(),
            silence_deadline: None,
        }
    }

    /// Whether voice controls should be offered at all
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Interim transcript for live feedback; never part of the query
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Drop the interim buffer without ending the session
    ///
    /// Used when the user clears the question; a later result event may
    /// repopulate it.
    pub fn discard_interim(&mut self) {
        self.interim.clear();
    }

    /// Begin a continuous recognition session
    pub fn start(&mut self) -> Result<()> {
        if !self.supported {
            return Err(SamarthError::SpeechStart(
                "speech recognition is not supported in this environment".to_string(),
            ));
        }
        if self.listening {
            return Err(SamarthError::SpeechStart(
                "recognition session already active".to_string(),
            ));
        }

        self.engine.start(&self.config).inspect_err(|e| {
            debug!("[SPEECH] Start failed: {}", e);
        })?;

        self.listening = true;
        self.interim.clear();
        self.silence_deadline = None;
        info!("[SPEECH] Listening started");
        Ok(())
    }

    /// End the session and discard any interim transcript
    pub fn stop(&mut self) {
        if self.listening {
            info!("[SPEECH] Listening stopped");
        }
        self.engine.stop();
        self.clear_session();
    }

    /// Start if idle, stop if listening
    pub fn toggle(&mut self) -> Result<()> {
        if self.listening {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Drain engine events and enforce the silence timeout
    ///
    /// Call once per UI frame. Finalized transcripts arriving in one pass
    /// are joined with spaces into a single committed segment; interim text
    /// replaces the live buffer.
    pub fn pump(&mut self, now: Instant) -> SpeechUpdate {
        let mut update = SpeechUpdate::default();
        let mut finals: Vec<String> = Vec::new();

        while let Ok(event) = self.events.try_recv() {
            match event {
                RecognitionEvent::Started => {
                    self.listening = true;
                    self.interim.clear();
                }
                RecognitionEvent::Result {
                    alternatives,
                    is_final,
                } => {
                    // Only the best hypothesis is used
                    let Some(text) = alternatives.into_iter().next() else {
                        continue;
                    };
                    if is_final {
                        finals.push(text);
                        self.interim.clear();
                    } else {
                        self.interim = text;
                    }
                    self.silence_deadline = Some(now + SILENCE_TIMEOUT);
                }
                RecognitionEvent::Error(code) => {
                    debug!("[SPEECH] Engine error: {:?}", code);
                    update.error = Some(code.into_error());
                    self.clear_session();
                }
                RecognitionEvent::Ended => {
                    debug!("[SPEECH] Session ended");
                    self.clear_session();
                }
            }
        }

        let committed: String = finals
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !committed.is_empty() {
            update.committed = Some(committed);
        }

        if self.listening {
            if let Some(deadline) = self.silence_deadline {
                if now >= deadline {
                    info!("[SPEECH] Stopping after silence");
                    self.stop();
                }
            }
        }

        if !update.is_empty() {
            debug!(
                "[SPEECH] Update: committed={:?}, error={}",
                update.committed,
                update.error.is_some()
            );
        }
        update
    }

    fn clear_session(&mut self) {
        self.listening = false;
        self.interim.clear();
        self.silence_deadline = None;
    }
}

impl Drop for SpeechInputAdapter {
    fn drop(&mut self) {
        // Guaranteed release of the capture session on teardown
        self.engine.stop();
    }
}
