//! Domain types shared by the bridge, the CLI and the TUI.
//!
//! - `Loan`: the wire record exchanged with the remote API
//! - per-request inputs (`NewLoan`, `BorrowerQuery`, `LoanIdQuery`)
//! - local validation (`ValidationError`, `parse_amount`)

pub mod types;

pub use types::*;
