//! Speech engine implementations.
//!
//! This module contains implementations of [`SpeechEngine`](crate::SpeechEngine).
//!
//! # Available Engines
//!
//! - `memory` - in-process engine that records requests and lets the host
//!   finish utterances by hand. Used by the console demo and the test suites.

pub mod memory;
