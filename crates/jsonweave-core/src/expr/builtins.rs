//! Built-in namespaces and methods available to expressions

use serde_json::{Map, Value};

use super::ExpressionError;
use crate::value::{from_number, strict_equals, to_number, to_text};

static NULL: Value = Value::Null;

/// Read-only namespaces bound as identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Namespace {
    Object,
    Array,
    Math,
}

impl Namespace {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        match name {
            "Object" => Some(Namespace::Object),
            "Array" => Some(Namespace::Array),
            "Math" => Some(Namespace::Math),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Namespace::Object => "Object",
            Namespace::Array => "Array",
            Namespace::Math => "Math",
        }
    }

    /// Non-function members (`Math.PI`)
    pub(crate) fn constant(self, member: &str) -> Option<Value> {
        match (self, member) {
            (Namespace::Math, "PI") => Some(from_number(std::f64::consts::PI)),
            (Namespace::Math, "E") => Some(from_number(std::f64::consts::E)),
            _ => None,
        }
    }

    pub(crate) fn call(self, member: &str, args: &[Value]) -> Result<Value, ExpressionError> {
        let result = match self {
            Namespace::Object => object_function(member, args),
            Namespace::Array => array_function(member, args),
            Namespace::Math => math_function(member, args),
        };
        result.ok_or_else(|| {
            ExpressionError::Evaluation(format!("{}.{} is not a function", self.name(), member))
        })
    }
}

fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&NULL)
}

fn object_function(member: &str, args: &[Value]) -> Option<Value> {
    let target = arg(args, 0);
    let value = match member {
        "keys" => Value::Array(entries(target).into_iter().map(|(k, _)| Value::String(k)).collect()),
        "values" => Value::Array(entries(target).into_iter().map(|(_, v)| v).collect()),
        "entries" => Value::Array(
            entries(target)
                .into_iter()
                .map(|(k, v)| Value::Array(vec![Value::String(k), v]))
                .collect(),
        ),
        "assign" => {
            let mut merged = match target {
                Value::Object(map) => map.clone(),
                _ => Map::new(),
            };
            for source in args.iter().skip(1) {
                for (k, v) in entries(source) {
                    merged.insert(k, v);
                }
            }
            Value::Object(merged)
        }
        "fromEntries" => {
            let mut map = Map::new();
            if let Value::Array(pairs) = target {
                for pair in pairs {
                    if let Value::Array(kv) = pair {
                        map.insert(to_text(arg(kv, 0)), arg(kv, 1).clone());
                    }
                }
            }
            Value::Object(map)
        }
        _ => return None,
    };
    Some(value)
}

/// Own enumerable entries: object members, array/string positions
fn entries(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}

fn array_function(member: &str, args: &[Value]) -> Option<Value> {
    let value = match member {
        "isArray" => Value::Bool(arg(args, 0).is_array()),
        "of" => Value::Array(args.to_vec()),
        "from" => Value::Array(match arg(args, 0) {
            Value::Array(items) => items.clone(),
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            _ => Vec::new(),
        }),
        _ => return None,
    };
    Some(value)
}

fn math_function(member: &str, args: &[Value]) -> Option<Value> {
    let x = to_number(arg(args, 0));
    let result = match member {
        "abs" => x.abs(),
        "ceil" => x.ceil(),
        "floor" => x.floor(),
        "round" => (x + 0.5).floor(),
        "trunc" => x.trunc(),
        "sign" => {
            if x.is_nan() || x == 0.0 {
                x
            } else {
                x.signum()
            }
        }
        "sqrt" => x.sqrt(),
        "pow" => x.powf(to_number(arg(args, 1))),
        "log" => x.ln(),
        "exp" => x.exp(),
        "max" => args
            .iter()
            .map(to_number)
            .fold(f64::NEG_INFINITY, |acc, n| if acc.is_nan() || n.is_nan() { f64::NAN } else { acc.max(n) }),
        "min" => args
            .iter()
            .map(to_number)
            .fold(f64::INFINITY, |acc, n| if acc.is_nan() || n.is_nan() { f64::NAN } else { acc.min(n) }),
        _ => return None,
    };
    Some(from_number(result))
}

/// Property read on a value (`value.name`)
pub(crate) fn property(value: &Value, name: &str) -> Value {
    match value {
        Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Null),
        Value::Array(items) if name == "length" => Value::from(items.len()),
        Value::String(s) if name == "length" => Value::from(s.chars().count()),
        Value::Array(items) => name
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Resolve a possibly negative position against a length
fn position(index: f64, len: usize) -> Option<usize> {
    if index.fract() != 0.0 || !index.is_finite() {
        return None;
    }
    let resolved = if index < 0.0 {
        len as f64 + index
    } else {
        index
    };
    (resolved >= 0.0 && resolved < len as f64).then_some(resolved as usize)
}

/// Computed read (`value[index]`); negative positions count from the end
pub(crate) fn index(value: &Value, index: &Value) -> Value {
    match (value, index) {
        (Value::Array(items), Value::Number(n)) => n
            .as_f64()
            .and_then(|f| position(f, items.len()))
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Null),
        (Value::String(s), Value::Number(n)) => {
            let len = s.chars().count();
            n.as_f64()
                .and_then(|f| position(f, len))
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null)
        }
        (Value::Object(map), key) => map.get(&to_text(key)).cloned().unwrap_or(Value::Null),
        (_, Value::String(name)) => property(value, name),
        _ => Value::Null,
    }
}

/// Method call on a receiver (`value.name(args)`)
pub(crate) fn call_method(
    receiver: &Value,
    name: &str,
    args: &[Value],
) -> Result<Value, ExpressionError> {
    let result = match receiver {
        Value::String(s) => string_method(s, name, args),
        Value::Array(items) => array_method(items, name, args),
        Value::Number(_) => number_method(receiver, name, args),
        _ => None,
    };
    result.ok_or_else(|| {
        ExpressionError::Evaluation(format!(
            "{}.{} is not a function",
            crate::value::type_of(receiver),
            name
        ))
    })
}

/// Start/end of a `slice` call, clamped the way scripting languages do
fn slice_bounds(len: usize, start: &Value, end: &Value) -> (usize, usize) {
    let clamp = |value: &Value, default: usize| -> usize {
        if value.is_null() {
            return default;
        }
        let n = to_number(value);
        let n = if n.is_nan() { 0.0 } else { n.trunc() };
        if n < 0.0 {
            (len as f64 + n).max(0.0) as usize
        } else {
            n.min(len as f64) as usize
        }
    };
    let start = clamp(start, 0);
    let end = clamp(end, len);
    (start, end.max(start))
}

fn char_position(haystack: &str, byte_index: usize) -> usize {
    haystack[..byte_index].chars().count()
}

fn string_method(s: &str, name: &str, args: &[Value]) -> Option<Value> {
    let value = match name {
        "toUpperCase" => Value::String(s.to_uppercase()),
        "toLowerCase" => Value::String(s.to_lowercase()),
        "trim" => Value::String(s.trim().to_string()),
        "toString" => Value::String(s.to_string()),
        "split" => Value::Array(match arg(args, 0) {
            Value::Null => vec![Value::String(s.to_string())],
            sep => {
                let sep = to_text(sep);
                if sep.is_empty() {
                    s.chars().map(|c| Value::String(c.to_string())).collect()
                } else {
                    s.split(sep.as_str())
                        .map(|part| Value::String(part.to_string()))
                        .collect()
                }
            }
        }),
        "includes" => Value::Bool(s.contains(to_text(arg(args, 0)).as_str())),
        "startsWith" => Value::Bool(s.starts_with(to_text(arg(args, 0)).as_str())),
        "endsWith" => Value::Bool(s.ends_with(to_text(arg(args, 0)).as_str())),
        "indexOf" => {
            let needle = to_text(arg(args, 0));
            match s.find(needle.as_str()) {
                Some(byte_index) => Value::from(char_position(s, byte_index)),
                None => Value::from(-1),
            }
        }
        "slice" => {
            let chars: Vec<char> = s.chars().collect();
            let (start, end) = slice_bounds(chars.len(), arg(args, 0), arg(args, 1));
            Value::String(chars[start..end].iter().collect())
        }
        "replace" => {
            let pattern = to_text(arg(args, 0));
            let replacement = to_text(arg(args, 1));
            Value::String(s.replacen(pattern.as_str(), &replacement, 1))
        }
        "concat" => {
            let mut out = s.to_string();
            for a in args {
                out.push_str(&to_text(a));
            }
            Value::String(out)
        }
        "charAt" => {
            let i = to_number(arg(args, 0));
            let i = if i.is_nan() { 0.0 } else { i.trunc() };
            let c = if i >= 0.0 { s.chars().nth(i as usize) } else { None };
            Value::String(c.map(String::from).unwrap_or_default())
        }
        _ => return None,
    };
    Some(value)
}

fn array_method(items: &[Value], name: &str, args: &[Value]) -> Option<Value> {
    let value = match name {
        "join" => {
            let sep = match arg(args, 0) {
                Value::Null => ",".to_string(),
                other => to_text(other),
            };
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => to_text(other),
                })
                .collect();
            Value::String(parts.join(&sep))
        }
        "slice" => {
            let (start, end) = slice_bounds(items.len(), arg(args, 0), arg(args, 1));
            Value::Array(items[start..end].to_vec())
        }
        "includes" => Value::Bool(items.iter().any(|item| strict_equals(item, arg(args, 0)))),
        "indexOf" => match items.iter().position(|item| strict_equals(item, arg(args, 0))) {
            Some(i) => Value::from(i),
            None => Value::from(-1),
        },
        "concat" => {
            let mut out = items.to_vec();
            for a in args {
                match a {
                    Value::Array(more) => out.extend(more.iter().cloned()),
                    other => out.push(other.clone()),
                }
            }
            Value::Array(out)
        }
        "reverse" => Value::Array(items.iter().rev().cloned().collect()),
        "toString" => Value::String(to_text(&Value::Array(items.to_vec()))),
        _ => return None,
    };
    Some(value)
}

fn number_method(receiver: &Value, name: &str, args: &[Value]) -> Option<Value> {
    let value = match name {
        "toFixed" => {
            let digits = to_number(arg(args, 0));
            let digits = if digits.is_nan() { 0 } else { digits.clamp(0.0, 100.0) as usize };
            Value::String(format!("{:.*}", digits, to_number(receiver)))
        }
        "toString" => Value::String(to_text(receiver)),
        _ => return None,
    };
    Some(value)
}
