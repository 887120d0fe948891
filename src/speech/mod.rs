//! Voice input
//!
//! Speech-to-text is a platform capability, not something this client
//! implements: the `RecognitionEngine` trait is the seam a platform binding
//! plugs into, and the `SpeechInputAdapter` turns its event stream into
//! committed question text.

mod adapter;
mod engine;

pub use adapter::{SpeechInputAdapter, SpeechUpdate, SILENCE_TIMEOUT};
pub use engine::{
    RecognitionConfig, RecognitionEngine, RecognitionErrorCode, RecognitionEvent, ScriptedEngine,
    ScriptedEngineHandle, UnsupportedEngine,
};
