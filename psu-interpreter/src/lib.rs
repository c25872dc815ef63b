mod config;
mod environment;
mod error;
mod interpreter;
mod value;

use std::io::{Stdout, Write};

use log::debug;
use psu_syntax::position::{Diagnostic, Line};
use psu_syntax::ParseOptions;
use thiserror::Error;

pub use config::Config;
pub use environment::{Environment, ScopeResolution};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use interpreter::Interpreter;
pub use value::Value;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", join_diagnostics(.0))]
    Syntax(Vec<Diagnostic>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scan, parse and run source text against one long-lived environment.
/// Each call to `run` continues the line numbering of the previous one.
pub struct Session<W: Write> {
    interpreter: Interpreter<W>,
    report_scan_errors: bool,
    next_line: Line,
}

impl Session<Stdout> {
    pub fn new(config: Config) -> Self {
        Self::with_stdout(config, std::io::stdout())
    }
}

impl<W: Write> Session<W> {
    pub fn with_stdout(config: Config, stdout: W) -> Self {
        Self {
            interpreter: Interpreter::with_stdout(stdout, &config),
            report_scan_errors: config.report_scan_errors,
            next_line: 1,
        }
    }

    pub fn run(&mut self, source: &str) -> Result<(), Error> {
        let options = ParseOptions {
            first_line: self.next_line,
            report_scan_errors: self.report_scan_errors,
        };
        self.next_line += source.lines().count().max(1) as Line;

        let ast = psu_syntax::parse_with(source, options).map_err(Error::Syntax)?;
        debug!("running {} statements from line {}", ast.len(), options.first_line);
        self.interpreter.interpret(&ast)?;
        Ok(())
    }

    pub fn environment(&self) -> &Environment {
        self.interpreter.environment()
    }

    pub fn into_stdout(self) -> W {
        self.interpreter.into_stdout()
    }
}
