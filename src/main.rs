use std::process::ExitCode;

fn main() -> ExitCode {
    match loan_desk::app::run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
