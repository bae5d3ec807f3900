//! Plain-text rendering of operation outcomes.

pub mod format;

pub use format::*;
