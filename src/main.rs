//! aevents binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match analysis_events::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            analysis_events::ui::output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
