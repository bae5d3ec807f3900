use serde_json::Value;

/// Banner severity shown for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Result of one loan operation.
///
/// Absence (`NotFound`, `Empty`) is kept apart from `Failed` so callers never
/// present a missing loan as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `201` from create.
    Created { loan_id: String },
    /// Non-empty collection, as returned by the service.
    Loans {
        borrower: Option<String>,
        loans: Vec<Value>,
    },
    /// Single loan, as returned by the service.
    Loan { loan_id: String, loan: Value },
    /// `204` from delete.
    Deleted { loan_id: String },
    /// `200` with an empty collection.
    Empty { message: String },
    /// `404` from a lookup or delete.
    NotFound { message: String },
    /// Local validation failed; no request was sent.
    Invalid { message: String },
    /// Unexpected status or transport failure.
    Failed { message: String },
}

impl Outcome {
    pub fn level(&self) -> Level {
        match self {
            Outcome::Created { .. }
            | Outcome::Loans { .. }
            | Outcome::Loan { .. }
            | Outcome::Deleted { .. } => Level::Success,
            Outcome::Empty { .. } => Level::Info,
            Outcome::NotFound { .. } => Level::Warning,
            Outcome::Invalid { .. } | Outcome::Failed { .. } => Level::Error,
        }
    }

    /// One-line status message.
    pub fn banner(&self) -> String {
        match self {
            Outcome::Created { loan_id } => format!("Loan {loan_id} added successfully!"),
            Outcome::Loans {
                borrower: Some(name),
                loans,
            } => format!("Found {} loan(s) for {name}", loans.len()),
            Outcome::Loans {
                borrower: None,
                loans,
            } => format!("Found {} loan(s)", loans.len()),
            Outcome::Loan { loan_id, .. } => format!("Found loan with ID: {loan_id}"),
            Outcome::Deleted { loan_id } => format!("Loan {loan_id} deleted successfully!"),
            Outcome::Empty { message }
            | Outcome::NotFound { message }
            | Outcome::Invalid { message }
            | Outcome::Failed { message } => message.clone(),
        }
    }

    /// JSON to render below the banner, if any.
    pub fn payload(&self) -> Option<Value> {
        match self {
            Outcome::Loans { loans, .. } => Some(Value::Array(loans.clone())),
            Outcome::Loan { loan, .. } => Some(loan.clone()),
            _ => None,
        }
    }

    /// `true` for local validation failures and unexpected errors.
    pub fn is_error(&self) -> bool {
        self.level() == Level::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_the_three_tiers() {
        let absent = Outcome::NotFound {
            message: "gone".to_string(),
        };
        let empty = Outcome::Empty {
            message: "none".to_string(),
        };
        let invalid = Outcome::Invalid {
            message: "required".to_string(),
        };
        assert_eq!(absent.level(), Level::Warning);
        assert_eq!(empty.level(), Level::Info);
        assert!(invalid.is_error());
        assert!(!absent.is_error());
    }

    #[test]
    fn only_lookups_carry_payloads() {
        let loan = serde_json::json!({"loanID": "L1"});
        let found = Outcome::Loan {
            loan_id: "L1".to_string(),
            loan: loan.clone(),
        };
        let created = Outcome::Created {
            loan_id: "L1".to_string(),
        };
        assert_eq!(found.payload(), Some(loan));
        assert_eq!(created.payload(), None);
    }
}
