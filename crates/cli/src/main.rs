use std::process::ExitCode;

fn main() -> ExitCode {
    glowguide_cli::run()
}
