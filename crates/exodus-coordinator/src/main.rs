use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match exodus_coordinator::run_coordinator() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "exodus-coordinator: {error}");
            ExitCode::FAILURE
        }
    }
}
