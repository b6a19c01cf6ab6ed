//! Postfix expression evaluator used by production conditions and blueprint
//! parameters.
//!
//! Expressions are whitespace separated tokens evaluated left to right on a
//! value stack:
//!
//! | Token                                | Effect                                  |
//! |--------------------------------------|-----------------------------------------|
//! | single letter naming a parameter     | push the bound value                    |
//! | numeric literal                      | push the number                         |
//! | `+` `-` `*` `/`                      | pop `y`, pop `x`, push `x op y`         |
//! | `<` `<=` `>` `>=`                    | pop `y`, pop `x`, stop with `x op y`    |
//! | anything else                        | skipped                                 |
//!
//! So `"10 4 -"` is `6` and `"x 5 <="` is `x <= 5`. A condition stops at its
//! first relational operator; tokens after it are never read.

use crate::error::ExprError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arith {
    fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            Arith::Add => x + y,
            Arith::Sub => x - y,
            Arith::Mul => x * y,
            Arith::Div => x / y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    fn apply(self, x: f64, y: f64) -> bool {
        match self {
            Relation::Lt => x < y,
            Relation::Le => x <= y,
            Relation::Gt => x > y,
            Relation::Ge => x >= y,
        }
    }
}

enum Token {
    Value(f64),
    Arith(Arith),
    Relation(Relation),
    Unknown,
}

fn classify(token: &str, params: &[char], values: &[f64]) -> Token {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_alphabetic()
        && let Some(i) = params.iter().position(|&p| p == c)
        && let Some(&v) = values.get(i)
    {
        return Token::Value(v);
    }

    if let Ok(v) = token.parse::<f64>() {
        return Token::Value(v);
    }

    match token {
        "+" => Token::Arith(Arith::Add),
        "-" => Token::Arith(Arith::Sub),
        "*" => Token::Arith(Arith::Mul),
        "/" => Token::Arith(Arith::Div),
        "<" => Token::Relation(Relation::Lt),
        "<=" => Token::Relation(Relation::Le),
        ">" => Token::Relation(Relation::Gt),
        ">=" => Token::Relation(Relation::Ge),
        _ => Token::Unknown,
    }
}

/// Pops `(x, y)` where `x` was pushed first.
fn pop_pair(stack: &mut Vec<f64>, op: &str, expr: &str) -> Result<(f64, f64), ExprError> {
    let underflow = || ExprError::StackUnderflow {
        op: op.to_string(),
        expr: expr.to_string(),
    };
    let y = stack.pop().ok_or_else(underflow)?;
    let x = stack.pop().ok_or_else(underflow)?;
    Ok((x, y))
}

/// Outcome of running the stack machine over an expression.
enum Outcome {
    Exhausted(Vec<f64>),
    Relation { op: String, result: bool },
}

fn run(expr: &str, params: &[char], values: &[f64]) -> Result<Outcome, ExprError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in expr.split_whitespace() {
        match classify(token, params, values) {
            Token::Value(v) => stack.push(v),
            Token::Arith(op) => {
                let (x, y) = pop_pair(&mut stack, token, expr)?;
                stack.push(op.apply(x, y));
            }
            Token::Relation(rel) => {
                let (x, y) = pop_pair(&mut stack, token, expr)?;
                return Ok(Outcome::Relation {
                    op: token.to_string(),
                    result: rel.apply(x, y),
                });
            }
            Token::Unknown => {
                tracing::trace!(token, expr, "skipping unrecognized token");
            }
        }
    }

    Ok(Outcome::Exhausted(stack))
}

/// Evaluates a purely arithmetic postfix expression.
///
/// `params` and `values` are parallel: `values[i]` is bound to `params[i]`.
pub fn evaluate_arithmetic(expr: &str, params: &[char], values: &[f64]) -> Result<f64, ExprError> {
    match run(expr, params, values)? {
        Outcome::Exhausted(stack) => stack.last().copied().ok_or_else(|| ExprError::EmptyStack {
            expr: expr.to_string(),
        }),
        Outcome::Relation { op, .. } => Err(ExprError::UnexpectedRelational {
            op,
            expr: expr.to_string(),
        }),
    }
}

/// Evaluates a condition; the first relational operator decides the result.
///
/// Returns [`ExprError::MissingRelational`] when the expression ends without
/// one. Callers treat that as an unsatisfied condition.
pub fn evaluate_conditional(expr: &str, params: &[char], values: &[f64]) -> Result<bool, ExprError> {
    match run(expr, params, values)? {
        Outcome::Relation { result, .. } => Ok(result),
        Outcome::Exhausted(_) => Err(ExprError::MissingRelational {
            expr: expr.to_string(),
        }),
    }
}
