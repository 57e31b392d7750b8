use std::process::ExitCode;

use clap::Parser;
use resextract_cli::{Args, run};

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&args) {
        Ok(status) => status.into(),
        Err(failure) => {
            eprintln!("Error: {}", failure.message);
            failure.status.into()
        }
    }
}
