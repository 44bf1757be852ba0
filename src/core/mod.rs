//! Shared core for the capture pipeline.
//!
//! This module is platform-agnostic: it holds the event contracts handed to
//! the transport and the error type used at the decoding edges.

pub mod contracts;
pub mod errors;
