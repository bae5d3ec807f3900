//! `loan-desk` library crate.
//!
//! The binary (`loans`) is a thin wrapper around this library so that:
//!
//! - the loan operations are testable without a terminal or a live service
//! - the TUI and the one-shot commands share one bridge
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod report;
pub mod tui;
