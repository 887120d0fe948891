//! Samarth - desktop client for the agriculture & climate Q&A service
//!
//! This crate provides a voice-enabled question form over a single backend
//! endpoint, with light-markup answer rendering and best-effort chart
//! extraction from answer text.

pub mod config;
pub mod error;
pub mod insights;
pub mod markup;
pub mod query;
pub mod speech;
pub mod ui;

// Re-export error types
pub use error::{Result, SamarthError};

// Re-export core types
pub use config::AppConfig;
pub use query::{Answer, QueryController, QueryOutcome, RequestState, Source};
pub use speech::{RecognitionEngine, SpeechInputAdapter};
