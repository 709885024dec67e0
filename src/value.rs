use anyhow::Result;
use std::fmt;

/// Dynamic value passed between pipeline stages and into command handlers.
///
/// Tokens always enter the binder as [`Value::Str`]; the binder rewrites them
/// through the conversion table when the receiving parameter declares a type.
/// A stage's return value is chained into the next stage unchanged, so a
/// handler can hand an `Int` to a downstream command expecting one without a
/// round trip through text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Borrow the value as an integer, failing on any other variant.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(anyhow::anyhow!("expected int, got '{}'", other)),
        }
    }

    /// The type tag matching this value's runtime variant.
    pub fn kind(&self) -> ParamType {
        match self {
            Value::Str(_) => ParamType::Str,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) => ParamType::Float,
            Value::Bool(_) => ParamType::Bool,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Type tag a parameter may declare.
///
/// Each tag indexes one conversion function in the table below; the binder
/// never invokes anything else to coerce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
}

impl ParamType {
    /// Human-readable tag name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ParamType::Str => "str",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Bool => "bool",
        }
    }

    /// The string-to-value conversion function for this tag.
    pub fn converter(self) -> fn(&str) -> Result<Value> {
        match self {
            ParamType::Str => convert_str,
            ParamType::Int => convert_int,
            ParamType::Float => convert_float,
            ParamType::Bool => convert_bool,
        }
    }
}

fn convert_str(s: &str) -> Result<Value> {
    Ok(Value::Str(s.to_string()))
}

fn convert_int(s: &str) -> Result<Value> {
    let n = s
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("invalid int value '{}'", s))?;
    Ok(Value::Int(n))
}

fn convert_float(s: &str) -> Result<Value> {
    let x = s
        .parse::<f64>()
        .map_err(|_| anyhow::anyhow!("invalid float value '{}'", s))?;
    Ok(Value::Float(x))
}

fn convert_bool(s: &str) -> Result<Value> {
    match s {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(anyhow::anyhow!("invalid bool value '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_token_form() {
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_converters() {
        assert_eq!((ParamType::Int.converter())("42").unwrap(), Value::Int(42));
        assert_eq!(
            (ParamType::Float.converter())("2.5").unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            (ParamType::Bool.converter())("false").unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            (ParamType::Str.converter())("42").unwrap(),
            Value::Str("42".into())
        );
    }

    #[test]
    fn test_conversion_failures_are_errors() {
        assert!((ParamType::Int.converter())("forty-two").is_err());
        assert!((ParamType::Float.converter())("").is_err());
        assert!((ParamType::Bool.converter())("yes").is_err());
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Int(1).kind(), ParamType::Int);
        assert_eq!(Value::Str(String::new()).kind(), ParamType::Str);
    }
}
