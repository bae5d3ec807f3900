//! Command-line parsing for the `loans` binary.
//!
//! Parsing and dispatch live apart: this module only describes arguments,
//! `app` decides what to do with them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BorrowerQuery, LoanIdQuery, NewLoan};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loans", version, about = "Loan management client for the /api/Loans service")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct GlobalArgs {
    /// Base URL of the loans collection.
    #[arg(long, global = true, value_name = "URL", env = "LOANS_API_URL")]
    pub api_url: Option<String>,

    /// Append logs to this file (the TUI logs nowhere else).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive tabbed form (default).
    Tui,
    /// Add a new loan.
    Add(AddArgs),
    /// List the loans held by a borrower.
    Borrower(BorrowerArgs),
    /// Show one loan by id.
    Get(LoanIdArgs),
    /// List every loan.
    List,
    /// Delete a loan by id.
    Delete(LoanIdArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AddArgs {
    /// Loan identifier.
    #[arg(long = "id", default_value = "")]
    pub loan_id: String,

    /// Borrower name.
    #[arg(long = "borrower", default_value = "")]
    pub borrower_name: String,

    /// Total amount to be repaid.
    #[arg(long = "repayment", default_value_t = 0.0, allow_negative_numbers = true)]
    pub repayment_amount: f64,

    /// Initial amount funded.
    #[arg(long = "funding", default_value_t = 0.0, allow_negative_numbers = true)]
    pub funding_amount: f64,
}

impl AddArgs {
    pub fn to_input(&self) -> NewLoan {
        NewLoan {
            loan_id: self.loan_id.clone(),
            borrower_name: self.borrower_name.clone(),
            repayment_amount: self.repayment_amount,
            funding_amount: self.funding_amount,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct BorrowerArgs {
    /// Borrower name to search for.
    #[arg(value_name = "NAME")]
    pub borrower_name: String,
}

impl BorrowerArgs {
    pub fn to_input(&self) -> BorrowerQuery {
        BorrowerQuery {
            borrower_name: self.borrower_name.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct LoanIdArgs {
    /// Loan identifier.
    #[arg(value_name = "ID")]
    pub loan_id: String,
}

impl LoanIdArgs {
    pub fn to_input(&self) -> LoanIdQuery {
        LoanIdQuery {
            loan_id: self.loan_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn add_defaults_amounts_to_zero() {
        let cli = Cli::parse_from(["loans", "add", "--id", "L1", "--borrower", "Ada"]);
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        let input = args.to_input();
        assert_eq!(input.loan_id, "L1");
        assert_eq!(input.repayment_amount, 0.0);
        assert_eq!(input.funding_amount, 0.0);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from(["loans", "get", "L7", "--api-url", "http://localhost:5000/api/Loans"]);
        assert_eq!(
            cli.global.api_url.as_deref(),
            Some("http://localhost:5000/api/Loans")
        );
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.to_input().loan_id, "L7");
    }

    #[test]
    fn api_url_falls_back_to_environment() {
        use clap::CommandFactory;
        let command = Cli::command();
        let api_url = command
            .get_arguments()
            .find(|arg| arg.get_id() == "api_url")
            .unwrap();
        assert_eq!(
            api_url.get_env(),
            Some(std::ffi::OsStr::new(crate::config::API_URL_ENV))
        );
    }
}
