//! Entry point for the `waypost` binary.
#![forbid(unsafe_code)]

use waypost_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors to the terminal"
)]
fn main() {
    match waypost_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("waypost: {err}");
            std::process::exit(1);
        }
    }
}
