use std::process::ExitCode;

fn main() -> ExitCode {
    match tcas_index::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
