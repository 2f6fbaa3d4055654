use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use crate::{BinaryOp, Builtin, EvalError, Expr, UnaryOp};

/// A read-only name lookup that formulas are evaluated against.
///
/// This is the only input an expression can observe.
pub trait Scope {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl Scope for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Scope for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

/// The result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

/// The type of a [`Value`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Number => "a number",
            Self::Bool => "a boolean",
        })
    }
}

impl Value {
    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Bool,
        }
    }

    /// Returns the numeric payload.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] if the value is a boolean.
    pub fn into_number(self) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Bool(_) => Err(mismatch(ValueKind::Number, self)),
        }
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] if the value is a number.
    pub fn into_bool(self) -> Result<bool, EvalError> {
        match self {
            Self::Bool(value) => Ok(value),
            Self::Number(_) => Err(mismatch(ValueKind::Bool, self)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

fn mismatch(expected: ValueKind, found: Value) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl Expr {
    /// Evaluates the expression against `scope`.
    ///
    /// Arithmetic requires numbers and logic requires booleans; `==` and `!=`
    /// compare two values of the same kind. `and` and `or` short-circuit.
    ///
    /// # Errors
    ///
    /// - [`EvalError::UnknownName`] if a name is not bound in `scope`.
    /// - [`EvalError::TypeMismatch`] if an operand has the wrong kind.
    /// - [`EvalError::DivisionByZero`] for `x / 0` or `0 ** negative`.
    pub fn evaluate<S: Scope + ?Sized>(&self, scope: &S) -> Result<Value, EvalError> {
        match self {
            Expr::Number(value) => Ok(Value::Number(*value)),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Name(name) => scope
                .lookup(name)
                .map(Value::Number)
                .ok_or_else(|| EvalError::UnknownName { name: name.clone() }),
            Expr::Unary { op, operand } => {
                let value = operand.evaluate(scope)?;
                match op {
                    UnaryOp::Neg => Ok(Value::Number(-value.into_number()?)),
                    UnaryOp::Plus => Ok(Value::Number(value.into_number()?)),
                    UnaryOp::Not => Ok(Value::Bool(!value.into_bool()?)),
                }
            }
            Expr::Binary { op, left, right } => evaluate_binary(*op, left, right, scope),
            Expr::Call { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.evaluate(scope)?.into_number())
                    .collect::<Result<Vec<_>, _>>()?;
                call(*function, &args).map(Value::Number)
            }
        }
    }
}

fn evaluate_binary<S: Scope + ?Sized>(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: &S,
) -> Result<Value, EvalError> {
    let numbers = || -> Result<(f64, f64), EvalError> {
        Ok((
            left.evaluate(scope)?.into_number()?,
            right.evaluate(scope)?.into_number()?,
        ))
    };

    let value = match op {
        BinaryOp::And => {
            Value::Bool(left.evaluate(scope)?.into_bool()? && right.evaluate(scope)?.into_bool()?)
        }
        BinaryOp::Or => {
            Value::Bool(left.evaluate(scope)?.into_bool()? || right.evaluate(scope)?.into_bool()?)
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let lhs = left.evaluate(scope)?;
            let rhs = right.evaluate(scope)?;
            if lhs.kind() != rhs.kind() {
                return Err(mismatch(lhs.kind(), rhs));
            }
            Value::Bool((lhs == rhs) == (op == BinaryOp::Eq))
        }
        BinaryOp::Add => numbers().map(|(lhs, rhs)| Value::Number(lhs + rhs))?,
        BinaryOp::Sub => numbers().map(|(lhs, rhs)| Value::Number(lhs - rhs))?,
        BinaryOp::Mul => numbers().map(|(lhs, rhs)| Value::Number(lhs * rhs))?,
        BinaryOp::Div => numbers().and_then(|(lhs, rhs)| divide(lhs, rhs)).map(Value::Number)?,
        BinaryOp::Pow => numbers().and_then(|(lhs, rhs)| power(lhs, rhs)).map(Value::Number)?,
        BinaryOp::Lt => numbers().map(|(lhs, rhs)| Value::Bool(lhs < rhs))?,
        BinaryOp::Le => numbers().map(|(lhs, rhs)| Value::Bool(lhs <= rhs))?,
        BinaryOp::Gt => numbers().map(|(lhs, rhs)| Value::Bool(lhs > rhs))?,
        BinaryOp::Ge => numbers().map(|(lhs, rhs)| Value::Bool(lhs >= rhs))?,
    };
    Ok(value)
}

fn divide(lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    if rhs == 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(lhs / rhs)
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(base.powf(exponent))
    }
}

fn call(function: Builtin, args: &[f64]) -> Result<f64, EvalError> {
    match (function, args) {
        (Builtin::Abs, [x]) => Ok(x.abs()),
        (Builtin::Pow, [base, exponent]) => power(*base, *exponent),
        (Builtin::Min, [first, rest @ ..]) => Ok(rest.iter().copied().fold(*first, f64::min)),
        (Builtin::Max, [first, rest @ ..]) => Ok(rest.iter().copied().fold(*first, f64::max)),
        _ => Err(EvalError::Arity {
            function: function.name(),
            count: args.len(),
        }),
    }
}
