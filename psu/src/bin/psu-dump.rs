use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use psu_syntax::ParseOptions;

/// Print the tokens of a psu script, or its syntax tree as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    path: PathBuf,

    /// Dump the parsed syntax tree instead of the token stream.
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let data = match std::fs::read_to_string(&args.path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read '{}': {err}", args.path.display());
            return ExitCode::FAILURE;
        }
    };

    if !args.ast {
        for token in psu_syntax::tokenize(&data, 1) {
            println!("{:>4} {:>5}..{:<5} {:?}", token.span.line, token.span.start.0, token.span.end.0, token.value);
        }
        return ExitCode::SUCCESS;
    }

    let (ast, diagnostics) = psu_syntax::parse_recovering(&data, ParseOptions::default());
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }
    match serde_json::to_string_pretty(&ast) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to serialize syntax tree: {err}");
            return ExitCode::FAILURE;
        }
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
