use super::ast::*;
use super::token::*;
use crate::parser::Parser;
use crate::position::{Span, WithSpan};

#[derive(PartialEq, PartialOrd, Copy, Clone)]
enum Precedence {
    None,
    Or,
    And,
    Equality,   // == !=
    Comparison, // < <= > >=
    Term,       // + -
    Factor,     // * / %
    Unary,      // ! -
}

impl From<TokenKind> for Precedence {
    fn from(token: TokenKind) -> Precedence {
        match token {
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::BangEqual | TokenKind::EqualEqual => Precedence::Equality,
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Factor,
            _ => Precedence::None,
        }
    }
}

fn parse_expr(it: &mut Parser, precedence: Precedence) -> Result<WithSpan<Expr>, ()> {
    let depth = it.depth();
    let expr = parse_nested_expr(it, precedence);
    it.restore_depth(depth);
    expr
}

// Every operand and every infix operator folded into the left operand counts
// as one level, which bounds the depth of the resulting tree.
fn parse_nested_expr(it: &mut Parser, precedence: Precedence) -> Result<WithSpan<Expr>, ()> {
    it.nest()?;
    let mut expr = parse_prefix(it)?;
    while !it.is_eof() {
        let next_precedence = Precedence::from(it.peek());
        if precedence >= next_precedence {
            break;
        }
        it.nest()?;
        expr = parse_infix(it, expr)?;
    }
    Ok(expr)
}

fn parse_infix(it: &mut Parser, left: WithSpan<Expr>) -> Result<WithSpan<Expr>, ()> {
    match it.peek() {
        TokenKind::BangEqual
        | TokenKind::EqualEqual
        | TokenKind::Less
        | TokenKind::LessEqual
        | TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => parse_binary(it, left),
        TokenKind::Or | TokenKind::And => parse_logical(it, left),
        _ => {
            let token = it.peek_token();
            it.error(&format!("Unexpected {}", token.value), token.span);
            Err(())
        },
    }
}

fn parse_prefix(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    match it.peek() {
        TokenKind::Number
        | TokenKind::Empty
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Identifier
        | TokenKind::String => parse_primary(it),
        TokenKind::Bang | TokenKind::Minus => parse_unary(it),
        TokenKind::LeftParen => parse_grouping(it),
        _ => {
            let token = it.peek_token();
            it.error(&format!("Unexpected {}", token.value), token.span);
            Err(())
        },
    }
}

fn parse_logical(it: &mut Parser, left: WithSpan<Expr>) -> Result<WithSpan<Expr>, ()> {
    let precedence = Precedence::from(it.peek());
    let operator = parse_logical_op(it)?;
    let right = parse_expr(it, precedence)?;
    let span = Span::union(&left, &right);
    Ok(WithSpan::new(Expr::Logical(Box::new(left), operator, Box::new(right)), span))
}

fn parse_grouping(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    let left_paren = it.expect(TokenKind::LeftParen)?;
    let expr = parse_expr(it, Precedence::None)?;
    let right_paren = it.expect(TokenKind::RightParen)?;

    let span = Span::union(left_paren, right_paren);
    Ok(WithSpan::new(Expr::Grouping(Box::new(expr)), span))
}

fn parse_binary(it: &mut Parser, left: WithSpan<Expr>) -> Result<WithSpan<Expr>, ()> {
    let precedence = Precedence::from(it.peek());
    let operator = parse_binary_op(it)?;
    let right = parse_expr(it, precedence)?;
    let span = Span::union(&left, &right);
    Ok(WithSpan::new(Expr::Binary(Box::new(left), operator, Box::new(right)), span))
}

fn parse_unary(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    let operator = parse_unary_op(it)?;
    let right = parse_expr(it, Precedence::Unary)?;
    let span = Span::union(&operator, &right);
    Ok(WithSpan::new(Expr::Unary(operator, Box::new(right)), span))
}

fn parse_logical_op(it: &mut Parser) -> Result<WithSpan<LogicalOperator>, ()> {
    let tc = it.advance();
    let operator = match &tc.value {
        Token::And => LogicalOperator::And,
        Token::Or => LogicalOperator::Or,
        _ => {
            it.error(&format!("Expected logical operator got {}", tc.value), tc.span);
            return Err(())
        },
    };

    Ok(WithSpan::new(operator, tc.span))
}

fn parse_unary_op(it: &mut Parser) -> Result<WithSpan<UnaryOperator>, ()> {
    let tc = it.advance();
    match &tc.value {
        Token::Bang => Ok(WithSpan::new(UnaryOperator::Bang, tc.span)),
        Token::Minus => Ok(WithSpan::new(UnaryOperator::Minus, tc.span)),
        _ => {
            it.error(&format!("Expected unary operator got {}", tc.value), tc.span);
            Err(())
        }
    }
}

fn parse_binary_op(it: &mut Parser) -> Result<WithSpan<BinaryOperator>, ()> {
    let tc = it.advance();
    let operator = match &tc.value {
        Token::BangEqual => BinaryOperator::BangEqual,
        Token::EqualEqual => BinaryOperator::EqualEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::Plus => BinaryOperator::Plus,
        Token::Minus => BinaryOperator::Minus,
        Token::Star => BinaryOperator::Star,
        Token::Slash => BinaryOperator::Slash,
        Token::Percent => BinaryOperator::Percent,
        _ => {
            it.error(&format!("Expected binary operator got {}", tc.value), tc.span);
            return Err(())
        },
    };

    Ok(WithSpan::new(operator, tc.span))
}

fn parse_primary(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    let tc = it.advance();
    let literal = |literal: Literal| -> Result<WithSpan<Expr>, ()> {
        Ok(WithSpan::new(Expr::Literal(literal), tc.span))
    };
    match &tc.value {
        Token::Empty => literal(Literal::Empty),
        Token::Number(n) => literal(Literal::Number(*n)),
        Token::True => literal(Literal::Boolean(true)),
        Token::False => literal(Literal::Boolean(false)),
        Token::String(s) => literal(Literal::String(s.clone())),
        Token::Identifier(s) => Ok(WithSpan::new(Expr::Variable(WithSpan::new(s.clone(), tc.span)), tc.span)),
        _ => {
            it.error(&format!("Expected primary got {}", tc.value), tc.span);
            Err(())
        },
    }
}

pub fn parse(it: &mut Parser) -> Result<WithSpan<Expr>, ()> {
    parse_expr(it, Precedence::None)
}
