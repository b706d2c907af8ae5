//! Quill API server library.
//!
//! The binary in `main.rs` wires this up from the environment; the
//! integration tests build an [`state::AppState`] by hand instead.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
