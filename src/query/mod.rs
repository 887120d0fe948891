//! Query submission pipeline
//!
//! Wraps the single backend call the client makes: a question goes out as
//! JSON, an answer with cited sources comes back. The controller owns the
//! submission lifecycle; the client owns the wire format.

mod client;
mod controller;

pub use client::{Answer, QueryClient, Source, GENERIC_BACKEND_ERROR};
pub use controller::{QueryController, QueryOutcome, RequestState};
