// src/main.rs

use anyhow::Result;
use bullcrypt::cli::Invocation;
use bullcrypt::logging::init_logging;
use bullcrypt::Registry;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bullcrypt: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let registry = Registry::builtin();
    let invocation = match Invocation::parse_from(&registry, std::env::args_os()) {
        Ok(invocation) => invocation,
        // --help, --version and usage errors print and exit on their own
        Err(e) => e.exit(),
    };

    init_logging(invocation.log_directive())?;

    let stdout = io::stdout().lock();
    let stderr = io::stderr().lock();
    invocation.execute(&registry, stdout, stderr)?;
    Ok(())
}
