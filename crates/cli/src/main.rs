use std::process::ExitCode;

fn main() -> ExitCode {
    optica_cli::run()
}
