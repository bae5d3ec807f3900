//! Remote loan service access.

pub mod api;

pub use api::{ApiError, ApiReply, HttpLoanApi, LoanApi};
