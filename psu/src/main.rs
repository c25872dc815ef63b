use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::info;
use psu_interpreter::{Config, ScopeResolution, Session};

#[cfg(test)]
mod tests;

/// Run a psu script, or start an interactive session when no path is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run as a single source text.
    path: Option<PathBuf>,

    /// Resolve names through every enclosing scope instead of two levels.
    #[arg(long)]
    lexical_scopes: bool,

    /// Silently drop unterminated strings and unexpected characters.
    #[arg(long)]
    lenient_scan: bool,

    /// Fail a `while` loop once its body has run this many times.
    #[arg(long, value_name = "N")]
    max_loop_iterations: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            scope_resolution: if self.lexical_scopes {
                ScopeResolution::Lexical
            } else {
                ScopeResolution::TwoLevel
            },
            report_scan_errors: !self.lenient_scan,
            max_loop_iterations: self.max_loop_iterations,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    info!("starting with {:?}", config);

    match &args.path {
        Some(path) => run_file(path, config),
        None => match repl(config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_file(path: &Path, config: Config) -> ExitCode {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read '{}': {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(config);
    match session.run(&data) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn repl(config: Config) -> io::Result<()> {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("PSU Language | psu {}", env!("CARGO_PKG_VERSION"));
    loop {
        print!(">>> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        if let Err(err) = session.run(&line) {
            eprintln!("{err}");
        }
    }
    println!("Bai bai!");
    Ok(())
}
