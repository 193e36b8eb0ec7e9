use std::process::ExitCode;

fn main() -> ExitCode {
    match archlinux_ai_cli::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
