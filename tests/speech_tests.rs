//! Integration tests for voice input
//!
//! The adapter is driven end-to-end through application state with a
//! scripted engine standing in for the platform speech service.

use samarth::config::AppConfig;
use samarth::speech::{
    RecognitionErrorCode, ScriptedEngine, ScriptedEngineHandle, SpeechInputAdapter,
    SILENCE_TIMEOUT,
};
use samarth::ui::AppState;
use std::time::{Duration, Instant};

fn scripted_state() -> (AppState, ScriptedEngineHandle) {
    let engine = ScriptedEngine::new();
    let handle = engine.handle();
    let state = AppState::with_speech(
        // Nothing listens on port 9; these tests never submit
        AppConfig::default().with_api_base_url("http://127.0.0.1:9"),
        SpeechInputAdapter::new(Box::new(engine)),
    );
    (state, handle)
}

#[test]
fn test_final_segment_appends_with_single_space() {
    let (mut state, handle) = scripted_state();
    state.question = "x".to_string();
    state.speech.start().unwrap();

    handle.finalize(" abc ");
    state.poll_events(Instant::now());

    assert_eq!(state.question, "x abc");
}

#[test]
fn test_dictating_a_question_across_batches() {
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();

    handle.interim("compare");
    state.poll_events(Instant::now());
    assert_eq!(state.question, "");
    assert_eq!(state.display_question(), "compare");

    handle.finalize("compare the rainfall");
    state.poll_events(Instant::now());
    assert_eq!(state.question, "compare the rainfall");

    handle.interim("in Punjab and");
    state.poll_events(Instant::now());
    assert_eq!(state.display_question(), "compare the rainfall in Punjab and");

    handle.finalize("in Punjab and Haryana");
    state.poll_events(Instant::now());
    assert_eq!(state.question, "compare the rainfall in Punjab and Haryana");
    assert_eq!(state.speech.interim(), "");
}

#[test]
fn test_stop_discards_interim_entirely() {
    let (mut state, handle) = scripted_state();
    state.question = "committed".to_string();
    state.speech.start().unwrap();

    handle.interim("provisional words");
    state.poll_events(Instant::now());
    assert_eq!(state.display_question(), "committed provisional words");

    state.speech.stop();
    state.poll_events(Instant::now());

    assert_eq!(state.question, "committed");
    assert_eq!(state.display_question(), "committed");
    assert!(!state.speech.is_listening());
}

#[test]
fn test_silence_stops_the_session_but_keeps_committed_text() {
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();

    let t0 = Instant::now();
    handle.finalize("list top crops");
    state.poll_events(t0);
    assert!(state.speech.is_listening());

    state.poll_events(t0 + SILENCE_TIMEOUT + Duration::from_millis(1));

    assert!(!state.speech.is_listening());
    assert_eq!(state.question, "list top crops");
}

#[test]
fn test_permission_denied_sets_dedicated_message() {
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();

    handle.error(RecognitionErrorCode::PermissionDenied);
    state.poll_events(Instant::now());

    let message = state.error.as_deref().unwrap();
    assert!(message.contains("Microphone access denied"));
    assert!(!state.speech.is_listening());

    // Distinct from the network-error message
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();
    handle.error(RecognitionErrorCode::Network);
    state.poll_events(Instant::now());
    assert_ne!(state.error.as_deref(), Some(message));
}

#[test]
fn test_generic_engine_code_is_embedded() {
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();

    handle.error(RecognitionErrorCode::Other("audio-capture".to_string()));
    state.poll_events(Instant::now());

    assert_eq!(
        state.error.as_deref(),
        Some("Error with voice recognition: audio-capture")
    );
}

#[test]
fn test_listening_survives_submission() {
    // Speech capture and a pending HTTP submission are not mutually
    // exclusive; submitting must not tear down the session.
    let (mut state, handle) = scripted_state();
    state.speech.start().unwrap();

    handle.finalize("compare rainfall");
    state.poll_events(Instant::now());

    state.submit();
    assert!(state.is_loading());
    assert!(state.speech.is_listening());
}

#[test]
fn test_unsupported_environment_hides_voice_controls() {
    let state = AppState::new(AppConfig::default().with_api_base_url("http://127.0.0.1:9"));
    assert!(!state.speech.is_supported());
    assert!(!state.speech.is_listening());
}
