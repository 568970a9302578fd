use clap::Parser;
use clonetally::cli::Cli;
use clonetally::ProfileError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    clonetally::logging::init(&cli.common.log_level);

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<ProfileError>() {
                Some(e) if e.is_config() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
