use psu_interpreter::{Config, Error, Session};
use psu_syntax::position::DiagnosticKind;
use regex::Regex;

#[derive(PartialEq, Debug)]
enum TestResult {
    ScanError,
    ParseError,
    RuntimeError(String),
}

fn parse_expects(source: &str, regex: &Regex) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| regex.captures(line))
        .map(|caps| caps[1].to_owned())
        .collect()
}

fn parse_errors(source: &str) -> Vec<(usize, TestResult)> {
    let runtime = Regex::new(r"// expect runtime error: (.+)").unwrap();
    let mut results = vec![];
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        if line.contains("// expect parse error") {
            results.push((line_number, TestResult::ParseError));
        } else if line.contains("// expect scan error") {
            results.push((line_number, TestResult::ScanError));
        } else if let Some(caps) = runtime.captures(line) {
            results.push((line_number, TestResult::RuntimeError(caps[1].to_owned())));
        }
    }
    results
}

// Feeds the script line by line, the way the interactive loop does.
fn execute(source: &str) -> (Vec<String>, Vec<(usize, TestResult)>) {
    let mut session = Session::with_stdout(Config::default(), vec![]);
    let mut errors = vec![];

    for (index, line) in source.lines().enumerate() {
        let code = match line.split_once("//") {
            Some((code, _)) => code,
            None => line,
        };
        let result = match session.run(code) {
            Ok(()) => continue,
            Err(Error::Syntax(diagnostics)) => {
                if diagnostics.iter().any(|d| d.kind == DiagnosticKind::Scan) {
                    TestResult::ScanError
                } else {
                    TestResult::ParseError
                }
            }
            Err(Error::Runtime(err)) => {
                println!("Runtime error: {}", err);
                TestResult::RuntimeError(err.kind.to_string())
            }
        };
        errors.push((index + 1, result));
    }

    let output = String::from_utf8(session.into_stdout()).unwrap();
    (output.lines().map(|l| l.to_owned()).collect(), errors)
}

fn harness(source: &str) {
    let expects = parse_expects(source, &Regex::new(r"// expect: ?(.*)").unwrap());
    let expected_errors = parse_errors(source);

    let (output, errors) = execute(source);
    assert_eq!(expects, output);
    assert_eq!(expected_errors, errors);
}

#[test]
fn precedence() {
    harness(include_str!("precedence.psu"));
}

#[test]
fn variables() {
    harness(include_str!("variables.psu"));
}

#[test]
fn scope() {
    harness(include_str!("scope.psu"));
}

#[test]
fn while_loop() {
    harness(include_str!("while.psu"));
}

#[test]
fn if_else() {
    harness(include_str!("if.psu"));
}

#[test]
fn strings() {
    harness(include_str!("strings.psu"));
}

#[test]
fn logical() {
    harness(include_str!("logical.psu"));
}

#[test]
fn numbers() {
    harness(include_str!("numbers.psu"));
}

#[test]
fn errors() {
    harness(include_str!("errors.psu"));
}
