//! Shared building blocks for the VC server SDK crates.

#![warn(clippy::pedantic)]

/// Module for shared configuration types
pub mod config;

/// Module for secret types that keep project secrets out of logs
pub mod secret;

/// Module for token wire-format helpers (size limits, segment inspection)
pub mod token_format;

/// Module for logging setup and log-safe correlation hashing
pub mod observability;
