//! Loan record and request inputs.
//!
//! The inputs are plain structs built fresh for every submission. Validation
//! only checks presence of required text, that amounts are non-negative
//! numbers, and that path values are not `.`/`..`; everything else is left to
//! the remote service.

use serde::{Deserialize, Serialize};

/// A loan as exchanged with the remote API.
///
/// Field names on the wire are fixed by the service (`loanID`, `borrowerName`,
/// `repaymentAmount`, `fundingAmount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(rename = "loanID")]
    pub loan_id: String,
    #[serde(rename = "borrowerName")]
    pub borrower_name: String,
    #[serde(rename = "repaymentAmount", default)]
    pub repayment_amount: f64,
    #[serde(rename = "fundingAmount", default)]
    pub funding_amount: f64,
}

/// Local validation failure. Always produced before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Input for the create operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLoan {
    pub loan_id: String,
    pub borrower_name: String,
    pub repayment_amount: f64,
    pub funding_amount: f64,
}

impl NewLoan {
    /// Check required fields and amounts, producing the payload to send.
    pub fn validate(&self) -> Result<Loan, ValidationError> {
        if is_blank(&self.loan_id) || is_blank(&self.borrower_name) {
            return Err(ValidationError::new(
                "Loan ID and Borrower Name are required!",
            ));
        }
        check_amount("Repayment Amount", self.repayment_amount)?;
        check_amount("Funding Amount", self.funding_amount)?;

        Ok(Loan {
            loan_id: self.loan_id.clone(),
            borrower_name: self.borrower_name.clone(),
            repayment_amount: self.repayment_amount,
            funding_amount: self.funding_amount,
        })
    }
}

/// Input for the lookup-by-borrower operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowerQuery {
    pub borrower_name: String,
}

impl BorrowerQuery {
    pub fn validate(&self) -> Result<&str, ValidationError> {
        if is_blank(&self.borrower_name) {
            return Err(ValidationError::new("Please enter a borrower name."));
        }
        if is_dot_segment(&self.borrower_name) {
            return Err(ValidationError::new(format!(
                "Borrower name '{}' cannot be looked up.",
                self.borrower_name
            )));
        }
        Ok(&self.borrower_name)
    }
}

/// Input for lookup-by-id and delete-by-id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanIdQuery {
    pub loan_id: String,
}

impl LoanIdQuery {
    pub fn validate(&self) -> Result<&str, ValidationError> {
        if is_blank(&self.loan_id) {
            return Err(ValidationError::new("Please enter a loan ID."));
        }
        if is_dot_segment(&self.loan_id) {
            return Err(ValidationError::new(format!(
                "Loan ID '{}' cannot be used in a request path.",
                self.loan_id
            )));
        }
        Ok(&self.loan_id)
    }
}

/// Parse a typed amount. Blank means zero.
pub fn parse_amount(label: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::new(format!("{label} must be a number, got '{trimmed}'.")))?;
    check_amount(label, value)?;
    Ok(value)
}

fn check_amount(label: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(format!(
            "{label} must be a non-negative number."
        )));
    }
    Ok(())
}

/// `.` and `..` are resolved away by URL path normalisation, so as a path
/// segment they would address the parent route instead of a loan.
///
/// Pushed segments have `%` escaped, so only the literal forms matter.
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_uses_service_field_names() {
        let loan = Loan {
            loan_id: "L1".to_string(),
            borrower_name: "Ada".to_string(),
            repayment_amount: 150.5,
            funding_amount: 100.0,
        };
        let json = serde_json::to_value(&loan).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loanID": "L1",
                "borrowerName": "Ada",
                "repaymentAmount": 150.5,
                "fundingAmount": 100.0,
            })
        );
    }

    #[test]
    fn loan_amounts_default_to_zero_when_absent() {
        let loan: Loan =
            serde_json::from_str(r#"{"loanID":"L2","borrowerName":"Bo"}"#).unwrap();
        assert_eq!(loan.repayment_amount, 0.0);
        assert_eq!(loan.funding_amount, 0.0);
    }

    #[test]
    fn new_loan_requires_id_and_borrower() {
        let missing_id = NewLoan {
            borrower_name: "Ada".to_string(),
            ..NewLoan::default()
        };
        let missing_name = NewLoan {
            loan_id: "L1".to_string(),
            borrower_name: "   ".to_string(),
            ..NewLoan::default()
        };
        for input in [missing_id, missing_name] {
            let err = input.validate().unwrap_err();
            assert_eq!(err.message, "Loan ID and Borrower Name are required!");
        }
    }

    #[test]
    fn new_loan_rejects_negative_amounts() {
        let input = NewLoan {
            loan_id: "L1".to_string(),
            borrower_name: "Ada".to_string(),
            repayment_amount: -1.0,
            funding_amount: 0.0,
        };
        let err = input.validate().unwrap_err();
        assert!(err.message.contains("Repayment Amount"), "{err}");
    }

    #[test]
    fn queries_reject_blank_input() {
        assert!(BorrowerQuery::default().validate().is_err());
        assert!(LoanIdQuery { loan_id: " ".to_string() }.validate().is_err());
        assert_eq!(
            LoanIdQuery { loan_id: "L9".to_string() }.validate().unwrap(),
            "L9"
        );
    }

    #[test]
    fn dot_ids_are_rejected_locally() {
        for id in [".", ".."] {
            let err = LoanIdQuery { loan_id: id.to_string() }.validate().unwrap_err();
            assert!(err.message.contains("request path"), "{err}");
        }
        assert!(BorrowerQuery { borrower_name: "..".to_string() }.validate().is_err());
        assert_eq!(
            LoanIdQuery { loan_id: "...".to_string() }.validate().unwrap(),
            "..."
        );
    }

    #[test]
    fn parse_amount_handles_blank_valid_and_bad_input() {
        assert_eq!(parse_amount("Funding Amount", "").unwrap(), 0.0);
        assert_eq!(parse_amount("Funding Amount", " 12.34 ").unwrap(), 12.34);
        assert!(parse_amount("Funding Amount", "abc").is_err());
        assert!(parse_amount("Funding Amount", "-5").is_err());
        assert!(parse_amount("Funding Amount", "inf").is_err());
    }
}
