//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - builds the HTTP client for the configured API
//! - runs the TUI or a single operation and picks the exit code

use clap::Parser;
use tracing::info;

use crate::bridge::{self, Outcome};
use crate::cli::{Cli, Command};
use crate::config::ApiConfig;
use crate::data::{HttpLoanApi, LoanApi};
use crate::error::AppError;
use crate::logging::{LogOutput, init_logging};

/// Entry point for the `loans` binary. Returns the process exit code.
pub fn run() -> Result<u8, AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let interactive = matches!(cli.command, Command::Tui);
    init_logging(LogOutput::for_mode(interactive, cli.global.log_file.clone()))?;

    let config = ApiConfig::resolve(cli.global.api_url.as_deref());
    let api = HttpLoanApi::new(&config.base_url).map_err(|e| AppError::usage(e.to_string()))?;
    info!(base_url = %api.base_url(), "loan API client ready");

    match cli.command {
        Command::Tui => {
            crate::tui::run(&api)?;
            Ok(0)
        }
        command => Ok(run_once(&api, &command)),
    }
}

/// Run one non-interactive operation, print its outcome and return the exit code.
pub fn run_once(api: &dyn LoanApi, command: &Command) -> u8 {
    let outcome = dispatch(api, command);
    let text = crate::report::format_outcome(&outcome);
    if outcome.is_error() {
        eprintln!("{text}");
    } else {
        println!("{text}");
    }
    exit_code(&outcome)
}

fn dispatch(api: &dyn LoanApi, command: &Command) -> Outcome {
    match command {
        Command::Add(args) => bridge::create(api, &args.to_input()),
        Command::Borrower(args) => bridge::find_by_borrower(api, &args.to_input()),
        Command::Get(args) => bridge::find_by_id(api, &args.to_input()),
        Command::List => bridge::list_all(api),
        Command::Delete(args) => bridge::delete_by_id(api, &args.to_input()),
        Command::Tui => Outcome::Invalid {
            message: "The interactive form cannot run as a one-shot command.".to_string(),
        },
    }
}

fn exit_code(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Invalid { .. } => 2,
        Outcome::Failed { .. } => 1,
        _ => 0,
    }
}

/// Rewrite argv so `loans` defaults to `loans tui`.
///
/// Rules:
/// - `loans`                       -> `loans tui`
/// - `loans --api-url URL ...`     -> `loans tui --api-url URL ...`
/// - `loans --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AddArgs, LoanIdArgs};
    use crate::data::{ApiError, ApiReply};
    use crate::domain::Loan;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(args(&["loans"])), args(&["loans", "tui"]));
        assert_eq!(
            rewrite_args(args(&["loans", "--api-url", "http://x/api/Loans"])),
            args(&["loans", "tui", "--api-url", "http://x/api/Loans"])
        );
        assert_eq!(
            rewrite_args(args(&["loans", "--help"])),
            args(&["loans", "--help"])
        );
        assert_eq!(
            rewrite_args(args(&["loans", "list"])),
            args(&["loans", "list"])
        );
    }

    /// Answers every call with the same status.
    struct StatusApi(u16);

    impl LoanApi for StatusApi {
        fn create(&self, _loan: &Loan) -> Result<ApiReply, ApiError> {
            Ok(ApiReply::new(self.0, ""))
        }
        fn find_by_borrower(&self, _borrower_name: &str) -> Result<ApiReply, ApiError> {
            Ok(ApiReply::new(self.0, "[]"))
        }
        fn find_by_id(&self, _loan_id: &str) -> Result<ApiReply, ApiError> {
            Ok(ApiReply::new(self.0, "{}"))
        }
        fn list_all(&self) -> Result<ApiReply, ApiError> {
            Ok(ApiReply::new(self.0, "[]"))
        }
        fn delete_by_id(&self, _loan_id: &str) -> Result<ApiReply, ApiError> {
            Ok(ApiReply::new(self.0, ""))
        }
    }

    #[test]
    fn exit_codes_follow_outcome_tier() {
        let delete = Command::Delete(LoanIdArgs {
            loan_id: "L1".to_string(),
        });
        assert_eq!(run_once(&StatusApi(204), &delete), 0);
        assert_eq!(run_once(&StatusApi(404), &delete), 0);
        assert_eq!(run_once(&StatusApi(500), &delete), 1);

        let blank_add = Command::Add(AddArgs {
            loan_id: String::new(),
            borrower_name: "Ada".to_string(),
            repayment_amount: 0.0,
            funding_amount: 0.0,
        });
        assert_eq!(run_once(&StatusApi(201), &blank_add), 2);
    }
}
