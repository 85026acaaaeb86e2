use std::process::ExitCode;

fn main() -> ExitCode {
    cadenza::runtime::run()
}
