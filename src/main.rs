use std::process::ExitCode;

fn main() -> ExitCode {
    match keytally::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            keytally::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
