use std::{fs, process::ExitCode};

use algom::Engine;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// algom is an expression language for mathematics with exact fractions,
/// complex numbers and closures.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells algom to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the last statement of the script.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

/// Logs go to stderr, filtered by `RUST_LOG`; only warnings by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    match Engine::new().run(&script) {
        Ok(value) => {
            if args.pipe_mode {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
