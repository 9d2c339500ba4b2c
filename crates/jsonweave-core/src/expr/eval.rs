//! Expression evaluator
//!
//! Walks a compiled [`Expr`] against the bindings of one query match.

use serde_json::{Map, Value};

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::builtins::{self, Namespace};
use super::{Bindings, ExpressionError};
use crate::value::{from_number, is_truthy, loose_equals, strict_equals, to_number, to_text, type_of};

type Result<T> = std::result::Result<T, ExpressionError>;

pub(crate) struct Evaluator<'a, 'b> {
    bindings: &'a Bindings<'b>,
}

impl<'a, 'b> Evaluator<'a, 'b> {
    pub fn new(bindings: &'a Bindings<'b>) -> Self {
        Self { bindings }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Ident(name) => self.eval_ident(name),
            Expr::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Expr::Object(props) => {
                let mut map = Map::new();
                for (key, value) in props {
                    map.insert(key.clone(), self.eval(value)?);
                }
                Ok(Value::Object(map))
            }
            Expr::Member { object, property } => self.eval_member(object, property),
            Expr::Index { object, index } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                Ok(builtins::index(&object, &index))
            }
            Expr::Call { callee, args } => self.eval_call(callee, args),
            Expr::Unary { op, operand } => self.eval_unary(*op, operand),
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if is_truthy(&self.eval(test)?) {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }
        }
    }

    fn eval_ident(&self, name: &str) -> Result<Value> {
        match name {
            "$" => Ok(self.bindings.current.clone()),
            "$$" => Ok(self.bindings.root.clone()),
            "$keys" => Ok(self.bindings.keys.cloned().unwrap_or(Value::Null)),
            _ => match Namespace::lookup(name) {
                Some(ns) => Err(ExpressionError::Evaluation(format!(
                    "{} can only be used to call its functions",
                    ns.name()
                ))),
                None => Err(ExpressionError::Evaluation(format!("{} is not defined", name))),
            },
        }
    }

    fn namespace_of(expr: &Expr) -> Option<Namespace> {
        match expr {
            Expr::Ident(name) => Namespace::lookup(name),
            _ => None,
        }
    }

    fn eval_member(&self, object: &Expr, property: &str) -> Result<Value> {
        if let Some(ns) = Self::namespace_of(object) {
            return Ok(ns.constant(property).unwrap_or(Value::Null));
        }
        let object = self.eval(object)?;
        Ok(builtins::property(&object, property))
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr]) -> Result<Value> {
        let Expr::Member { object, property } = callee else {
            return Err(ExpressionError::Evaluation(
                "expression is not a function".to_string(),
            ));
        };

        let args = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>>>()?;

        match Self::namespace_of(object) {
            Some(ns) => ns.call(property, &args),
            None => {
                let receiver = self.eval(object)?;
                builtins::call_method(&receiver, property, &args)
            }
        }
    }

    fn eval_unary(&self, op: UnaryOp, operand: &Expr) -> Result<Value> {
        if op == UnaryOp::TypeOf {
            // typeof never fails on a name
            if let Expr::Ident(name) = operand {
                if Namespace::lookup(name).is_some() {
                    return Ok(Value::String("object".to_string()));
                }
                if !matches!(name.as_str(), "$" | "$$" | "$keys") {
                    return Ok(Value::String("undefined".to_string()));
                }
            }
        }

        let value = self.eval(operand)?;
        Ok(match op {
            UnaryOp::Not => Value::Bool(!is_truthy(&value)),
            UnaryOp::Neg => from_number(-to_number(&value)),
            UnaryOp::Pos => from_number(to_number(&value)),
            UnaryOp::TypeOf => Value::String(type_of(&value).to_string()),
        })
    }

    fn eval_binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Value> {
        let left = self.eval(left)?;

        let value = match op {
            BinaryOp::Add => add(&left, &self.eval(right)?),
            BinaryOp::Sub => numeric(&left, &self.eval(right)?, |a, b| a - b),
            BinaryOp::Mul => numeric(&left, &self.eval(right)?, |a, b| a * b),
            BinaryOp::Div => numeric(&left, &self.eval(right)?, |a, b| a / b),
            BinaryOp::Rem => numeric(&left, &self.eval(right)?, |a, b| a % b),
            BinaryOp::Lt => Value::Bool(compare(&left, &self.eval(right)?, |o| o.is_lt())),
            BinaryOp::Le => Value::Bool(compare(&left, &self.eval(right)?, |o| o.is_le())),
            BinaryOp::Gt => Value::Bool(compare(&left, &self.eval(right)?, |o| o.is_gt())),
            BinaryOp::Ge => Value::Bool(compare(&left, &self.eval(right)?, |o| o.is_ge())),
            BinaryOp::Eq => Value::Bool(loose_equals(&left, &self.eval(right)?)),
            BinaryOp::Ne => Value::Bool(!loose_equals(&left, &self.eval(right)?)),
            BinaryOp::StrictEq => Value::Bool(strict_equals(&left, &self.eval(right)?)),
            BinaryOp::StrictNe => Value::Bool(!strict_equals(&left, &self.eval(right)?)),
            BinaryOp::And => {
                if is_truthy(&left) {
                    self.eval(right)?
                } else {
                    left
                }
            }
            BinaryOp::Or => {
                if is_truthy(&left) {
                    left
                } else {
                    self.eval(right)?
                }
            }
            BinaryOp::Coalesce => {
                if left.is_null() {
                    self.eval(right)?
                } else {
                    left
                }
            }
        };
        Ok(value)
    }
}

/// `+` concatenates as soon as either side is not a number-like primitive
fn add(left: &Value, right: &Value) -> Value {
    let is_textual = |v: &Value| matches!(v, Value::String(_) | Value::Array(_) | Value::Object(_));
    if is_textual(left) || is_textual(right) {
        Value::String(format!("{}{}", to_text(left), to_text(right)))
    } else {
        from_number(to_number(left) + to_number(right))
    }
}

fn numeric(left: &Value, right: &Value, op: fn(f64, f64) -> f64) -> Value {
    from_number(op(to_number(left), to_number(right)))
}

/// Strings compare lexically, everything else numerically; NaN compares false
fn compare(left: &Value, right: &Value, test: fn(std::cmp::Ordering) -> bool) -> bool {
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => to_number(left).partial_cmp(&to_number(right)),
    };
    ordering.map(test).unwrap_or(false)
}
