//! The five loan operations.
//!
//! Each operation validates its input, makes at most one call through
//! `LoanApi`, and maps the reply to an `Outcome`. Nothing here panics or
//! returns `Err`: every failure ends up as an outcome the caller can render.

use serde_json::Value;
use tracing::info;

use crate::data::{ApiError, ApiReply, LoanApi};
use crate::domain::{BorrowerQuery, LoanIdQuery, NewLoan, ValidationError};

pub mod outcome;

pub use outcome::{Level, Outcome};

/// Create a loan. Success is `201 Created`.
pub fn create(api: &dyn LoanApi, input: &NewLoan) -> Outcome {
    let loan = match input.validate() {
        Ok(loan) => loan,
        Err(err) => return invalid(err),
    };

    let reply = match api.create(&loan) {
        Ok(reply) => reply,
        Err(err) => return transport_failure("create", err),
    };

    let outcome = match reply.status {
        201 => Outcome::Created {
            loan_id: loan.loan_id,
        },
        _ => unexpected(&reply),
    };
    log_outcome("create", &outcome);
    outcome
}

/// Look up every loan held by a borrower. `404` means the borrower has none.
pub fn find_by_borrower(api: &dyn LoanApi, input: &BorrowerQuery) -> Outcome {
    let name = match input.validate() {
        Ok(name) => name,
        Err(err) => return invalid(err),
    };

    let reply = match api.find_by_borrower(name) {
        Ok(reply) => reply,
        Err(err) => return transport_failure("find_by_borrower", err),
    };

    let outcome = match reply.status {
        200 => collection(&reply, Some(name)),
        404 => Outcome::NotFound {
            message: format!("No loans found for borrower: {name}"),
        },
        _ => unexpected(&reply),
    };
    log_outcome("find_by_borrower", &outcome);
    outcome
}

/// Fetch a single loan. The returned object is kept exactly as sent.
pub fn find_by_id(api: &dyn LoanApi, input: &LoanIdQuery) -> Outcome {
    let loan_id = match input.validate() {
        Ok(id) => id,
        Err(err) => return invalid(err),
    };

    let reply = match api.find_by_id(loan_id) {
        Ok(reply) => reply,
        Err(err) => return transport_failure("find_by_id", err),
    };

    let outcome = match reply.status {
        200 => match serde_json::from_str::<Value>(&reply.body) {
            Ok(loan @ Value::Object(_)) => Outcome::Loan {
                loan_id: loan_id.to_string(),
                loan,
            },
            _ => unreadable(&reply, "a JSON object"),
        },
        404 => Outcome::NotFound {
            message: format!("No loan found with ID: {loan_id}"),
        },
        _ => unexpected(&reply),
    };
    log_outcome("find_by_id", &outcome);
    outcome
}

/// Fetch every loan. An empty collection is informational, not an error.
pub fn list_all(api: &dyn LoanApi) -> Outcome {
    let reply = match api.list_all() {
        Ok(reply) => reply,
        Err(err) => return transport_failure("list_all", err),
    };

    let outcome = match reply.status {
        200 => collection(&reply, None),
        _ => unexpected(&reply),
    };
    log_outcome("list_all", &outcome);
    outcome
}

/// Delete a loan. Success is `204 No Content`.
pub fn delete_by_id(api: &dyn LoanApi, input: &LoanIdQuery) -> Outcome {
    let loan_id = match input.validate() {
        Ok(id) => id,
        Err(err) => return invalid(err),
    };

    let reply = match api.delete_by_id(loan_id) {
        Ok(reply) => reply,
        Err(err) => return transport_failure("delete_by_id", err),
    };

    let outcome = match reply.status {
        204 => Outcome::Deleted {
            loan_id: loan_id.to_string(),
        },
        404 => Outcome::NotFound {
            message: format!("No loan found with ID: {loan_id}"),
        },
        _ => unexpected(&reply),
    };
    log_outcome("delete_by_id", &outcome);
    outcome
}

/// Map a `200` collection body. Both list endpoints share the empty policy.
fn collection(reply: &ApiReply, borrower: Option<&str>) -> Outcome {
    let loans = match serde_json::from_str::<Value>(&reply.body) {
        Ok(Value::Array(items)) => items,
        _ => return unreadable(reply, "a JSON array"),
    };

    if loans.is_empty() {
        let message = match borrower {
            Some(name) => format!("No loans found for borrower: {name}"),
            None => "No loans found in the system.".to_string(),
        };
        return Outcome::Empty { message };
    }

    Outcome::Loans {
        borrower: borrower.map(str::to_string),
        loans,
    }
}

fn invalid(err: ValidationError) -> Outcome {
    Outcome::Invalid {
        message: err.message,
    }
}

fn unexpected(reply: &ApiReply) -> Outcome {
    Outcome::Failed {
        message: format!("Error: {} - {}", reply.status, reply.body),
    }
}

fn unreadable(reply: &ApiReply, expected: &str) -> Outcome {
    Outcome::Failed {
        message: format!(
            "Error: {} - expected {expected}, got: {}",
            reply.status, reply.body
        ),
    }
}

fn transport_failure(operation: &str, err: ApiError) -> Outcome {
    let outcome = Outcome::Failed {
        message: format!("Exception: {err}"),
    };
    log_outcome(operation, &outcome);
    outcome
}

fn log_outcome(operation: &str, outcome: &Outcome) {
    info!(operation, level = ?outcome.level(), "{}", outcome.banner());
}
