//! Application state management
//!
//! Central state for the Samarth UI: the question being composed, the
//! submission lifecycle, the latest answer, and the voice-input session.
//! One invariant holds throughout: an answer and an error message are never
//! present at the same time.

use crate::config::AppConfig;
use crate::query::{Answer, QueryController, QueryOutcome, RequestState};
use crate::speech::{SpeechInputAdapter, UnsupportedEngine};
use crate::ui::theme::ThemePreference;
use std::time::Instant;
use tracing::{debug, info};

/// Canned questions shown below the form, clickable to fill the editor
pub const SAMPLE_QUESTIONS: [&str; 3] = [
    "Compare the average annual rainfall in State_X and State_Y for the last N available years. In parallel, list the top M most produced crops of Crop_Type_C (by volume) in each of those states during the same period, citing all data sources.",
    "Identify the district in State_X with the highest production of Crop_Z in the most recent year available and compare that with the district with the lowest production of Crop_Z in State_Y?",
    "Analyze the production trend of Crop_Type_C in the Geographic_Region_Y over the last decade. Correlate this trend with the corresponding climate data for the same period and provide a summary of the apparent impact.",
];

/// Central application state
pub struct AppState {
    /// The user's question; final transcripts accumulate here
    pub question: String,

    /// Voice input session
    pub speech: SpeechInputAdapter,

    /// Query submission lifecycle
    pub query: QueryController,

    /// Latest successful answer; `None` before first success or after an error
    pub answer: Option<Answer>,

    /// Dismissible user-facing error message
    pub error: Option<String>,

    /// Persisted display-theme preference
    pub theme_preference: ThemePreference,
}

impl AppState {
    /// Create state with the default (unsupported) speech engine
    pub fn new(config: AppConfig) -> Self {
        Self::with_speech(
            config,
            SpeechInputAdapter::new(Box::new(UnsupportedEngine::default())),
        )
    }

    /// Create state with a specific speech adapter
    pub fn with_speech(config: AppConfig, speech: SpeechInputAdapter) -> Self {
        Self {
            question: String::new(),
            speech,
            query: QueryController::new(config),
            answer: None,
            error: None,
            theme_preference: ThemePreference::default(),
        }
    }

    /// Question text plus live interim transcript, for display only
    pub fn display_question(&self) -> String {
        let interim = self.speech.interim();
        if interim.is_empty() {
            self.question.clone()
        } else if self.question.is_empty() {
            interim.to_string()
        } else {
            format!("{} {}", self.question, interim)
        }
    }

    /// Append a committed transcript segment with a single separating space
    pub fn append_transcript(&mut self, segment: &str) {
        let segment = segment.trim();
        if segment.is_empty() {
            return;
        }
        if self.question.is_empty() {
            self.question = segment.to_string();
        } else {
            let trimmed_len = self.question.trim_end().len();
            self.question.truncate(trimmed_len);
            self.question.push(' ');
            self.question.push_str(segment);
        }
    }

    /// Submit the current question to the backend
    ///
    /// No-op for whitespace-only questions. Otherwise the prior answer and
    /// error are cleared and the request enters `Loading`.
    pub fn submit(&mut self) {
        if self.query.submit(&self.question).is_some() {
            self.answer = None;
            self.error = None;
        }
    }

    /// Clear the question text and any pending interim transcript
    ///
    /// Leaves the answer/error display untouched.
    pub fn clear_question(&mut self) {
        self.question.clear();
        self.speech.discard_interim();
    }

    /// Start or stop the voice session
    pub fn toggle_listening(&mut self) {
        if let Err(e) = self.speech.toggle() {
            self.set_error(e.user_message());
        }
    }

    /// Dismiss the current error message
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn request_state(&self) -> RequestState {
        self.query.state()
    }

    pub fn is_loading(&self) -> bool {
        self.query.is_loading()
    }

    /// Drain speech and query events; call once per frame
    pub fn poll_events(&mut self, now: Instant) {
        let update = self.speech.pump(now);
        if let Some(segment) = update.committed {
            debug!("[SPEECH] Committing transcript segment: {:?}", segment);
            self.append_transcript(&segment);
        }
        if let Some(error) = update.error {
            self.set_error(error.user_message());
        }

        match self.query.poll() {
            Some(QueryOutcome::Answered(answer)) => {
                info!("[QUERY] Answer received ({} sources)", answer.sources.len());
                self.set_answer(answer);
            }
            Some(QueryOutcome::Failed(error)) => {
                self.set_error(error.user_message());
            }
            None => {}
        }
    }

    fn set_answer(&mut self, answer: Answer) {
        self.answer = Some(answer);
        self.error = None;
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.answer = None;
    }
}
