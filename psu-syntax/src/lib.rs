pub mod ast;
pub mod position;
pub mod token;

mod expr_parser;
mod parser;
mod stmt_parser;
mod tokenizer;

use ast::Ast;
use log::debug;
use position::{Diagnostic, DiagnosticKind, Line, WithSpan};
use token::Token;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Line number given to the first line of the source.
    pub first_line: Line,
    /// Report scan anomalies as diagnostics instead of dropping them.
    pub report_scan_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            first_line: 1,
            report_scan_errors: true,
        }
    }
}

/// Scan `code` into tokens, scan anomalies included as `Token::Error`.
pub fn tokenize(code: &str, first_line: Line) -> Vec<WithSpan<Token>> {
    tokenizer::tokenize_with_context(code, first_line)
}

pub fn parse(code: &str) -> Result<Ast, Vec<Diagnostic>> {
    parse_with(code, ParseOptions::default())
}

pub fn parse_with(code: &str, options: ParseOptions) -> Result<Ast, Vec<Diagnostic>> {
    let (ast, diagnostics) = parse_recovering(code, options);
    if diagnostics.is_empty() {
        Ok(ast)
    } else {
        Err(diagnostics)
    }
}

/// Parse as much as possible. Statements that failed to parse are left out
/// of the returned AST and described by the diagnostics.
pub fn parse_recovering(code: &str, options: ParseOptions) -> (Ast, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let tokens: Vec<WithSpan<Token>> = tokenize(code, options.first_line)
        .into_iter()
        .filter(|token| match &token.value {
            Token::Error(error) => {
                if options.report_scan_errors {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::Scan,
                        line: token.span.line,
                        lexeme: token.span.lexeme(code),
                        message: error.to_string(),
                    });
                }
                false
            }
            _ => true,
        })
        .collect();
    debug!("scanned {} tokens", tokens.len());

    let mut parser = parser::Parser::new(&tokens, code);
    let ast = stmt_parser::parse(&mut parser);
    diagnostics.extend(parser.into_diagnostics());
    debug!("parsed {} statements with {} diagnostics", ast.len(), diagnostics.len());

    (ast, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_errors_reported() {
        let diagnostics = parse("say \"open").unwrap_err();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].to_string(), "[Line 1] Scan Error at '\"open': unterminated string.");
        assert_eq!(diagnostics[1].kind, DiagnosticKind::Parse);
    }

    #[test]
    fn test_scan_errors_dropped() {
        let options = ParseOptions { report_scan_errors: false, ..ParseOptions::default() };
        let diagnostics = parse_with("say \"open", options).unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Parse);
        assert_eq!(parse_with("say 1 @", options).map(|ast| ast.len()), Ok(1));
        assert_eq!(parse_with("set x to 1 = 2", options).map(|ast| ast.len()), Ok(2));
    }

    #[test]
    fn test_lone_equal_is_reported() {
        let diagnostics = parse("set x = 1").unwrap_err();
        assert_eq!(diagnostics[0].to_string(), "[Line 1] Scan Error at '=': unexpected character '='.");
    }

    #[test]
    fn test_first_line() {
        let options = ParseOptions { first_line: 12, ..ParseOptions::default() };
        let diagnostics = parse_with("say", options).unwrap_err();
        assert_eq!(diagnostics[0].line, 12);
    }

    #[test]
    fn test_recovering_keeps_good_statements() {
        let (ast, diagnostics) = parse_recovering("say 1; say ); say 2", ParseOptions::default());
        assert_eq!(ast.len(), 2);
        assert_eq!(diagnostics.len(), 1);
    }
}
