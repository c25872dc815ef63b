use super::ast::*;
use super::token::*;
use crate::parser::Parser;
use crate::position::WithSpan;

fn parse_program(it: &mut Parser) -> Vec<Stmt> {
    let mut statements = Vec::new();
    loop {
        skip_newlines(it);
        if it.is_eof() {
            break;
        }
        let start = it.cursor();
        match parse_declaration(it) {
            Ok(stmt) => statements.push(stmt),
            Err(()) => it.synchronize(start),
        }
    }

    statements
}

fn skip_newlines(it: &mut Parser) {
    while it.optionally(TokenKind::Newline) {}
}

fn parse_declaration(it: &mut Parser) -> Result<Stmt, ()> {
    let stmt = match it.peek() {
        TokenKind::Set => parse_set_declaration(it)?,
        _ => parse_statement(it)?,
    };
    it.optionally(TokenKind::Semicolon);
    it.optionally(TokenKind::Newline);
    Ok(stmt)
}

fn parse_statement(it: &mut Parser) -> Result<Stmt, ()> {
    let depth = it.depth();
    let statement = it.nest().and_then(|()| parse_nested_statement(it));
    it.restore_depth(depth);
    statement
}

fn parse_nested_statement(it: &mut Parser) -> Result<Stmt, ()> {
    match it.peek() {
        TokenKind::Say => parse_say_statement(it),
        TokenKind::If => parse_if_statement(it),
        TokenKind::LeftBrace => parse_block_statement(it),
        TokenKind::While => parse_while_statement(it),
        TokenKind::Increment | TokenKind::Decrement => parse_step_statement(it),
        kind if kind.is_reserved() => {
            let token = it.peek_token();
            it.error(&format!("{} is reserved but not supported", kind), token.span);
            Err(())
        }
        _ => parse_expr_statement(it),
    }
}

fn parse_set_declaration(it: &mut Parser) -> Result<Stmt, ()> {
    it.expect(TokenKind::Set)?;
    let name = it.expect_identifier()?;
    let mut initializer = None;

    if it.optionally(TokenKind::To) {
        initializer = Some(parse_expr(it)?);
    }

    Ok(Stmt::Set(name, initializer.map(Box::new)))
}

fn parse_expr(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    super::expr_parser::parse(it)
}

fn parse_expr_statement(it: &mut Parser) -> Result<Stmt, ()> {
    let expr = parse_expr(it)?;
    Ok(Stmt::Expression(Box::new(expr)))
}

fn parse_block_statement(it: &mut Parser) -> Result<Stmt, ()> {
    it.expect(TokenKind::LeftBrace)?;
    let mut statements: Vec<Stmt> = Vec::new();
    let mut failed = false;
    loop {
        skip_newlines(it);
        if it.check(TokenKind::RightBrace) || it.is_eof() {
            break;
        }
        let start = it.cursor();
        match parse_declaration(it) {
            Ok(stmt) => statements.push(stmt),
            Err(()) => {
                failed = true;
                it.synchronize_block(start);
            }
        }
    }
    it.expect(TokenKind::RightBrace)?;
    if failed {
        return Err(());
    }
    Ok(Stmt::Block(statements))
}

fn parse_step_statement(it: &mut Parser) -> Result<Stmt, ()> {
    let tc = it.advance();
    let operator = match &tc.value {
        Token::Increment => StepOperator::Increment,
        Token::Decrement => StepOperator::Decrement,
        _ => {
            it.error(&format!("Expected 'increment' or 'decrement' got {}", tc.value), tc.span);
            return Err(());
        }
    };
    let name = it.expect_identifier()?;
    it.expect(TokenKind::By)?;
    let delta = parse_expr(it)?;
    Ok(Stmt::Step(name, WithSpan::new(operator, tc.span), Box::new(delta)))
}

fn parse_while_statement(it: &mut Parser) -> Result<Stmt, ()> {
    it.expect(TokenKind::While)?;
    let condition = parse_expr(it)?;
    it.expect(TokenKind::Do)?;
    skip_newlines(it);
    let statement = parse_statement(it)?;
    Ok(Stmt::While(Box::new(condition), Box::new(statement)))
}

// The then-branch is always a braced block.
fn parse_if_statement(it: &mut Parser) -> Result<Stmt, ()> {
    it.expect(TokenKind::If)?;
    let condition = parse_expr(it)?;
    it.expect(TokenKind::Then)?;
    skip_newlines(it);
    let if_stmt = parse_block_statement(it)?;
    let mut else_stmt: Option<Stmt> = None;

    if it.optionally(TokenKind::Else) {
        skip_newlines(it);
        else_stmt = Some(parse_statement(it)?);
    }

    Ok(Stmt::If(
        Box::new(condition),
        Box::new(if_stmt),
        else_stmt.map(Box::new),
    ))
}

fn parse_say_statement(it: &mut Parser) -> Result<Stmt, ()> {
    it.expect(TokenKind::Say)?;
    let expr = parse_expr(it)?;
    Ok(Stmt::Say(Box::new(expr)))
}

/// Parse every declaration, recovering after each malformed one.
pub fn parse(it: &mut Parser) -> Vec<Stmt> {
    parse_program(it)
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use super::super::tokenizer::*;
    use super::*;
    use crate::position::{Diagnostic, Span};

    fn parse_str(data: &str) -> Result<Vec<Stmt>, Vec<Diagnostic>> {
        let (statements, diagnostics) = parse_recovering(data);
        if diagnostics.is_empty() {
            Ok(statements)
        } else {
            Err(diagnostics)
        }
    }

    fn parse_recovering(data: &str) -> (Vec<Stmt>, Vec<Diagnostic>) {
        let tokens = tokenize_with_context(data, 1);
        let mut parser = crate::parser::Parser::new(&tokens, data);
        let statements = parse(&mut parser);
        (statements, parser.into_diagnostics())
    }

    fn ws<T>(value: T, range: Range<u32>) -> WithSpan<T> {
        WithSpan::new(value, Span::new(range.start, range.end, 1))
    }

    fn empty(range: Range<u32>) -> Box<WithSpan<Expr>> {
        Box::new(ws(Expr::Literal(Literal::Empty), range))
    }

    fn number(value: f64, range: Range<u32>) -> Box<WithSpan<Expr>> {
        Box::new(ws(Expr::Literal(Literal::Number(value)), range))
    }

    fn messages(data: &str) -> Vec<String> {
        parse_recovering(data).1.into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_expr_stmt() {
        assert_eq!(
            parse_str("empty;"),
            Ok(vec![Stmt::Expression(empty(0..5))])
        );
        assert_eq!(
            parse_str("empty;empty;"),
            Ok(vec![
                Stmt::Expression(empty(0..5)),
                Stmt::Expression(empty(6..11)),
            ])
        );
    }

    #[test]
    fn test_say_stmt() {
        assert_eq!(
            parse_str("say empty;"),
            Ok(vec![Stmt::Say(empty(4..9))])
        );
        assert_eq!(
            parse_str("say empty"),
            Ok(vec![Stmt::Say(empty(4..9))])
        );
    }

    #[test]
    fn test_set_decl() {
        assert_eq!(
            parse_str("set beverage;"),
            Ok(vec![Stmt::Set(ws("beverage".into(), 4..12), None)])
        );
        assert_eq!(
            parse_str("set beverage to 5;"),
            Ok(vec![Stmt::Set(ws("beverage".into(), 4..12), Some(number(5., 16..17)))])
        );
        assert_eq!(messages("set 5 to 5;"), vec!["Expected identifier got number"]);
        assert_eq!(messages("if empty then { } else set x to 1"), vec!["Unexpected 'set'"]);
    }

    #[test]
    fn test_if_stmt() {
        assert_eq!(
            parse_str("if empty then { say empty; }"),
            Ok(vec![Stmt::If(
                empty(3..8),
                Box::new(Stmt::Block(vec![Stmt::Say(empty(20..25))])),
                None,
            )])
        );
        assert_eq!(
            parse_str("if empty then { say 1 } else say false;"),
            Ok(vec![Stmt::If(
                empty(3..8),
                Box::new(Stmt::Block(vec![Stmt::Say(number(1., 20..21))])),
                Some(Box::new(Stmt::Say(Box::new(ws(Expr::Literal(Literal::Boolean(false)), 33..38))))),
            )])
        );
        assert_eq!(messages("if empty { say 1 }"), vec!["Expected 'then' got '{'"]);
        assert_eq!(messages("if empty then say 1"), vec!["Expected '{' got 'say'"]);
    }

    #[test]
    fn test_block_stmt() {
        assert_eq!(parse_str("{}"), Ok(vec![Stmt::Block(vec![])]));
        assert_eq!(
            parse_str("{empty;}"),
            Ok(vec![Stmt::Block(vec![Stmt::Expression(empty(1..6))])])
        );
        assert_eq!(
            parse_str("{empty;empty;}"),
            Ok(vec![Stmt::Block(vec![
                Stmt::Expression(empty(1..6)),
                Stmt::Expression(empty(7..12)),
            ])])
        );
        assert_eq!(
            parse_str("{\n\n  empty\n}"),
            Ok(vec![Stmt::Block(vec![Stmt::Expression(Box::new(WithSpan::new(
                Expr::Literal(Literal::Empty),
                Span::new(5, 10, 3),
            )))])])
        );
        assert_eq!(messages("{ say 1;"), vec!["Expected '}' got <EOF>"]);
    }

    #[test]
    fn test_while_stmt() {
        assert_eq!(
            parse_str("while empty do false;"),
            Ok(vec![Stmt::While(
                empty(6..11),
                Box::new(Stmt::Expression(Box::new(ws(Expr::Literal(Literal::Boolean(false)), 15..20)))),
            )])
        );
        assert_eq!(messages("while true { }"), vec!["Expected 'do' got '{'"]);
    }

    #[test]
    fn test_step_stmt() {
        assert_eq!(
            parse_str("increment i by 2"),
            Ok(vec![Stmt::Step(
                ws("i".into(), 10..11),
                ws(StepOperator::Increment, 0..9),
                number(2., 15..16),
            )])
        );
        assert_eq!(
            parse_str("decrement i by 1;"),
            Ok(vec![Stmt::Step(
                ws("i".into(), 10..11),
                ws(StepOperator::Decrement, 0..9),
                number(1., 15..16),
            )])
        );
        assert_eq!(messages("increment i 2"), vec!["Expected 'by' got number"]);
    }

    #[test]
    fn test_reserved() {
        assert_eq!(messages("procedure"), vec!["'procedure' is reserved but not supported"]);
        assert_eq!(messages("return 1"), vec!["'return' is reserved but not supported"]);
        assert_eq!(messages("say this"), vec!["Unexpected 'this'"]);
    }

    #[test]
    fn test_recovery_single_error() {
        let (statements, diagnostics) = parse_recovering("say (1 + 2;");
        assert_eq!(statements, vec![]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "[Line 1] Parse Error at ';': Expected ')' got ';'");
    }

    #[test]
    fn test_recovery_resumes_at_statement_start() {
        let (statements, diagnostics) = parse_recovering("say (1 + 2; say 3;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements, vec![Stmt::Say(number(3., 16..17))]);
    }

    #[test]
    fn test_recovery_resumes_after_newline() {
        let (statements, diagnostics) = parse_recovering("1 + + 2 3\n4");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(statements, vec![Stmt::Expression(Box::new(WithSpan::new(
            Expr::Literal(Literal::Number(4.)),
            Span::new(10, 11, 2),
        )))]);
    }

    #[test]
    fn test_recovery_reports_every_error() {
        let (statements, diagnostics) = parse_recovering("say )\nset 1\nsay 2\nwhile x say 3");
        assert_eq!(
            diagnostics.iter().map(|d| d.line).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_recovery_terminates_on_stray_tokens() {
        let (statements, diagnostics) = parse_recovering(") ) } for for");
        assert!(statements.is_empty());
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_block_recovery_reports_once() {
        let (statements, diagnostics) = parse_recovering("{ say ); say 2 }");
        assert!(statements.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Unexpected ')'");

        assert_eq!(messages("{ ) }\nsay 1"), vec!["Unexpected ')'"]);
        assert_eq!(messages("{ { say ) } say 2 }"), vec!["Unexpected ')'"]);
        assert_eq!(
            parse_recovering("{ ) }\nsay 1").0,
            vec![Stmt::Say(Box::new(WithSpan::new(
                Expr::Literal(Literal::Number(1.)),
                Span::new(10, 11, 2),
            )))]
        );
    }

    #[test]
    fn test_nesting_limit() {
        let message = "Nested more than 256 levels deep";
        let blocks = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
        assert_eq!(messages(&blocks), vec![message]);
        let loops = format!("{}say 1", "while true do ".repeat(10_000));
        assert_eq!(messages(&loops), vec![message]);
        let nested = format!("{}{}", "{".repeat(100), "}".repeat(100));
        assert_eq!(parse_str(&nested).map(|statements| statements.len()), Ok(1));
    }

    #[test]
    fn test_newline_after_branch_keyword() {
        assert_eq!(
            parse_str("while empty do\n  false").map(|statements| statements.len()),
            Ok(1)
        );
        assert_eq!(
            parse_str("if empty then\n{\n  say 1\n} else\n  say 2").map(|statements| statements.len()),
            Ok(1)
        );
        assert_eq!(messages("while empty do\n"), vec!["Unexpected <EOF>"]);
    }
}
