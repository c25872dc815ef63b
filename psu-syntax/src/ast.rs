use std::fmt::Display;

use serde::Serialize;

use crate::position::WithSpan;

pub type Identifier = String;

#[derive(Debug, PartialEq, Copy, Clone, Serialize)]
pub enum UnaryOperator {
    Bang,
    Minus,
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize)]
pub enum BinaryOperator {
    Slash,
    Star,
    Percent,
    Plus,
    Minus,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    BangEqual,
    EqualEqual,
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize)]
pub enum StepOperator {
    Increment,
    Decrement,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Empty,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Expr {
    Literal(Literal),
    Unary(WithSpan<UnaryOperator>, Box<WithSpan<Expr>>),
    Binary(Box<WithSpan<Expr>>, WithSpan<BinaryOperator>, Box<WithSpan<Expr>>),
    Logical(Box<WithSpan<Expr>>, WithSpan<LogicalOperator>, Box<WithSpan<Expr>>),
    Grouping(Box<WithSpan<Expr>>),
    Variable(WithSpan<Identifier>),
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Stmt {
    Set(WithSpan<Identifier>, Option<Box<WithSpan<Expr>>>),
    Say(Box<WithSpan<Expr>>),
    Block(Vec<Stmt>),
    Expression(Box<WithSpan<Expr>>),
    Step(WithSpan<Identifier>, WithSpan<StepOperator>, Box<WithSpan<Expr>>),
    If(Box<WithSpan<Expr>>, Box<Stmt>, Option<Box<Stmt>>),
    While(Box<WithSpan<Expr>>, Box<Stmt>),
}

pub type Ast = Vec<Stmt>;

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnaryOperator::Bang => "!",
            UnaryOperator::Minus => "-",
        })
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryOperator::Slash => "/",
            BinaryOperator::Star => "*",
            BinaryOperator::Percent => "%",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::BangEqual => "!=",
            BinaryOperator::EqualEqual => "==",
        })
    }
}

impl Display for StepOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StepOperator::Increment => "increment",
            StepOperator::Decrement => "decrement",
        })
    }
}
