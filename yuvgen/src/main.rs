//! Generates a raw YUV sample file from `-option value` pairs, writing it into
//! `samples/`.
//!
//!     yuvgen -dimension 1920x1080 -downsample 4:2:0 -bitdepth 10 -endian big
//!     RUST_LOG=debug yuvgen -runtests

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use yuvgen::config::USAGE;
use yuvgen::output::{self, DEFAULT_OUTPUT_DIR};
use yuvgen::{selfcheck, Error};

const RUN_TESTS: &str = "-runtests";

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("failed to initialize logging: {}", e);
    }

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let result = if tokens.first().map(String::as_str) == Some(RUN_TESTS) {
        selfcheck::run().map(|passed| info!("{} self-checks passed", passed))
    } else {
        generate(&tokens)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_usage_error() => {
            error!("{}\n{}", e, USAGE);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn generate(tokens: &[String]) -> Result<(), Error> {
    let config = yuvgen::parse_options(tokens)?;
    info!("{:?}", config);

    let buffer = yuvgen::generate(&config)?;

    // Write failures are logged by the writer and leave the exit status alone.
    let _ = output::write_to_file(DEFAULT_OUTPUT_DIR, &config, &buffer);

    Ok(())
}
