use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_router::requests::{self, RequestError};

const USAGE: &str = "Usage: transit-router [make_base|process_requests]";

/// Log to stderr; stdout carries the response document.
fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{default_level}' - {err}",
            EnvFilter::DEFAULT_ENV
        );
        EnvFilter::new(default_level.to_string())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    MakeBase,
    ProcessRequests,
}

impl Mode {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "make_base" => Some(Self::MakeBase),
            "process_requests" => Some(Self::ProcessRequests),
            _ => None,
        }
    }
}

fn run(mode: Mode) -> Result<(), RequestError> {
    let stdin = BufReader::new(io::stdin().lock());
    match mode {
        Mode::MakeBase => {
            let base = requests::make_base(stdin)?;
            info!(
                stops = base.catalogue.stop_count(),
                buses = base.catalogue.bus_count(),
                "Base ready"
            );
            Ok(())
        }
        Mode::ProcessRequests => {
            let stdout = BufWriter::new(io::stdout().lock());
            requests::process_requests(stdin, stdout)
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(mode) = args.first().filter(|_| args.len() == 1).and_then(|a| Mode::parse(a)) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    init_logger();

    match run(mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error ({mode:?}): {e}");
            ExitCode::FAILURE
        }
    }
}
