//! Entrycheck - store round-trip verification
//!
//! This library crate exposes the verification runner, output sinks and
//! configuration loading for the binary and for integration testing.

pub mod config;
pub mod runner;
pub mod sink;
