use std::io::Write;

use log::{debug, trace};
use psu_syntax::ast::*;
use psu_syntax::position::WithSpan;

use crate::config::Config;
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::value::Value;

/// Tree-walking evaluator. The environment outlives each call to
/// `interpret`, so bindings carry over from one line to the next.
pub struct Interpreter<W: Write> {
    environment: Environment,
    stdout: W,
    max_loop_iterations: Option<u64>,
}

impl<W: Write> Interpreter<W> {
    pub fn with_stdout(stdout: W, config: &Config) -> Self {
        Self {
            environment: Environment::new(config.scope_resolution),
            stdout,
            max_loop_iterations: config.max_loop_iterations,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_stdout(self) -> W {
        self.stdout
    }

    /// Run `statements` in order, stopping at the first runtime error.
    /// Bindings made before the error are kept.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        debug!("interpreting {} statements", statements.len());
        for statement in statements {
            self.execute(statement)?;
        }
        self.stdout.flush().map_err(|e| RuntimeError {
            line: 0,
            lexeme: String::new(),
            kind: RuntimeErrorKind::Output(e.to_string()),
        })
    }

    fn execute(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        trace!("execute {:?}", statement);
        match statement {
            Stmt::Set(name, initializer) => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Empty,
                };
                self.environment.set(&name.value, value);
                Ok(())
            }
            Stmt::Say(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.stdout, "{}", value).map_err(|e| {
                    RuntimeError::new(expr.span, "say", RuntimeErrorKind::Output(e.to_string()))
                })
            }
            Stmt::Block(statements) => self.execute_block(statements),
            Stmt::Expression(expr) => self.evaluate(expr).map(|_| ()),
            Stmt::Step(name, operator, delta) => self.execute_step(name, operator, delta),
            Stmt::If(condition, then_branch, else_branch) => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While(condition, body) => self.execute_while(condition, body),
        }
    }

    // The scope is popped whether or not a statement failed.
    fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        self.environment.push_scope();
        let result = statements.iter().try_for_each(|statement| self.execute(statement));
        self.environment.pop_scope();
        result
    }

    fn execute_while(&mut self, condition: &WithSpan<Expr>, body: &Stmt) -> Result<(), RuntimeError> {
        let mut iterations: u64 = 0;
        while self.evaluate(condition)?.is_truthy() {
            if let Some(limit) = self.max_loop_iterations {
                if iterations >= limit {
                    return Err(RuntimeError::new(condition.span, "while", RuntimeErrorKind::IterationLimit(limit)));
                }
            }
            iterations += 1;
            self.execute(body)?;
        }
        Ok(())
    }

    fn execute_step(
        &mut self,
        name: &WithSpan<Identifier>,
        operator: &WithSpan<StepOperator>,
        delta: &WithSpan<Expr>,
    ) -> Result<(), RuntimeError> {
        let current = self.environment.get(name)?.clone();
        let delta = self.evaluate(delta)?;
        let value = match (current, delta) {
            (Value::Number(current), Value::Number(delta)) => match operator.value {
                StepOperator::Increment => current + delta,
                StepOperator::Decrement => current - delta,
            },
            _ => return Err(RuntimeError::new(name.span, &name.value, RuntimeErrorKind::NonNumericStep)),
        };
        self.environment.set(&name.value, Value::Number(value));
        Ok(())
    }

    fn evaluate(&self, expr: &WithSpan<Expr>) -> Result<Value, RuntimeError> {
        match &expr.value {
            Expr::Literal(literal) => Ok(literal.into()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable(name) => self.environment.get(name).cloned(),
            Expr::Unary(operator, right) => {
                let right = self.evaluate(right)?;
                evaluate_unary(operator, right)
            }
            Expr::Logical(left, operator, right) => {
                let left = self.evaluate(left)?;
                match operator.value {
                    LogicalOperator::Or if left.is_truthy() => Ok(left),
                    LogicalOperator::And if !left.is_truthy() => Ok(left),
                    _ => self.evaluate(right),
                }
            }
            Expr::Binary(left, operator, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(operator, left, right)
            }
        }
    }
}

fn evaluate_unary(operator: &WithSpan<UnaryOperator>, right: Value) -> Result<Value, RuntimeError> {
    match operator.value {
        UnaryOperator::Bang => Ok(Value::Boolean(!right.is_truthy())),
        UnaryOperator::Minus => match right.to_number() {
            Some(n) => Ok(Value::Number(-n)),
            None => Err(RuntimeError::type_mismatch(
                operator.span,
                operator.value,
                format!("operand of '-' must be a number, got {}.", right.type_name()),
            )),
        },
    }
}

fn evaluate_binary(operator: &WithSpan<BinaryOperator>, left: Value, right: Value) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;

    match operator.value {
        Plus => match (&left, &right) {
            (Value::String(l), Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),
            _ => numeric_operands(operator, &left, &right).map(|(l, r)| Value::Number(l + r)),
        },
        Minus => numeric_operands(operator, &left, &right).map(|(l, r)| Value::Number(l - r)),
        Star => numeric_operands(operator, &left, &right).map(|(l, r)| Value::Number(l * r)),
        Slash => {
            let (l, r) = numeric_operands(operator, &left, &right)?;
            if r == 0.0 {
                return Err(RuntimeError::new(operator.span, right, RuntimeErrorKind::DivisionByZero));
            }
            Ok(Value::Number(l / r))
        }
        Percent => match (left.as_integer(), right.as_integer()) {
            (Some(_), Some(r)) if r == 0.0 => {
                Err(RuntimeError::new(operator.span, right, RuntimeErrorKind::DivisionByZero))
            }
            (Some(l), Some(r)) => Ok(Value::Number(l % r)),
            _ => Err(RuntimeError::new(operator.span, right, RuntimeErrorKind::NonIntegerModulus)),
        },
        EqualEqual | BangEqual => {
            if left == Value::Empty || right == Value::Empty {
                return Ok(Value::Boolean(false));
            }
            let equal = left == right;
            Ok(Value::Boolean(if operator.value == EqualEqual { equal } else { !equal }))
        }
        Greater | GreaterEqual | Less | LessEqual => {
            let ordering = match (&left, &right) {
                (Value::String(l), Value::String(r)) => l.partial_cmp(r),
                (Value::Number(l), Value::Number(r)) => l.partial_cmp(r),
                _ => {
                    return Err(RuntimeError::type_mismatch(
                        operator.span,
                        operator.value,
                        format!(
                            "expected two strings or two numbers for comparison, got {} and {}.",
                            left.type_name(),
                            right.type_name()
                        ),
                    ))
                }
            };
            let result = match ordering {
                Some(ordering) => match operator.value {
                    Greater => ordering.is_gt(),
                    GreaterEqual => ordering.is_ge(),
                    Less => ordering.is_lt(),
                    _ => ordering.is_le(),
                },
                None => false,
            };
            Ok(Value::Boolean(result))
        }
    }
}

fn numeric_operands(operator: &WithSpan<BinaryOperator>, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left.to_number(), right.to_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(RuntimeError::type_mismatch(
            operator.span,
            operator.value,
            format!(
                "operands of '{}' must be numbers, got {} and {}.",
                operator.value,
                left.type_name(),
                right.type_name()
            ),
        )),
    }
}
