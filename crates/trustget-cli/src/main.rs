use trustget_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // File logging when the state dir is usable, stderr otherwise.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match CliCommand::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("trustget error: {:#}", err);
            std::process::exit(1);
        }
    }
}
