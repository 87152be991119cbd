//! kiwi CLI entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    match kiwi_scp::cli::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
