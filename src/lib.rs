//! Jimmy AI · AI literacy tutor
//!
//! - Response assessment and per-session proficiency scoring
//! - Streaming chat client over a transcript with one in-flight reply
//! - Completion gateway relaying transcripts to a hosted model (axum)

pub mod assessor;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod generator;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod transcript;
pub mod upstream;
pub mod util;
