//! Reconciles a segment's raw tokens against a command's declared parameters.

use crate::command::ParamSpec;
use crate::value::Value;
use anyhow::Result;

/// Bind raw argument tokens (and the chained input, if any) to `params`.
///
/// Tokens starting with `--` are flag keys consuming the following token as
/// their value; everything else is positional. A chained input from the
/// previous pipeline stage is prepended as the first positional. Positionals
/// fill parameter slots left-to-right, flags fill their slot by name, and
/// remaining slots fall back to declared defaults. Every filled slot is then
/// coerced to the parameter's declared type, when one exists.
///
/// Returns the argument vector in declaration order, ready for the handler.
pub(crate) fn bind_args(
    params: &[ParamSpec],
    tokens: &[String],
    chained: Option<Value>,
) -> Result<Vec<Value>> {
    let (mut positionals, flags) = classify(tokens)?;
    if let Some(value) = chained {
        positionals.insert(0, value);
    }

    if positionals.len() > params.len() {
        anyhow::bail!(
            "too many arguments: expected at most {}, got {}",
            params.len(),
            positionals.len()
        );
    }

    let mut slots: Vec<Option<Value>> = params.iter().map(|_| None).collect();
    for (slot, value) in slots.iter_mut().zip(positionals) {
        *slot = Some(value);
    }

    for (key, value) in flags {
        let index = params
            .iter()
            .position(|p| p.name == key)
            .ok_or_else(|| anyhow::anyhow!("unexpected flag '--{}'", key))?;
        if slots[index].is_some() {
            anyhow::bail!("multiple values for argument '{}'", key);
        }
        slots[index] = Some(value);
    }

    let mut bound = Vec::with_capacity(params.len());
    for (param, slot) in params.iter().zip(slots) {
        let value = match slot.or_else(|| param.default.clone()) {
            Some(value) => value,
            None => anyhow::bail!("missing required argument '{}'", param.name),
        };
        bound.push(coerce(value, param)?);
    }

    Ok(bound)
}

/// Split tokens into positional values and `(key, value)` flag pairs.
fn classify(tokens: &[String]) -> Result<(Vec<Value>, Vec<(String, Value)>)> {
    let mut positionals = Vec::new();
    let mut flags = Vec::new();

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if let Some(key) = token.strip_prefix("--") {
            let value = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("flag '--{}' requires a value", key))?;
            flags.push((key.to_string(), Value::Str(value.clone())));
        } else {
            positionals.push(Value::Str(token.clone()));
        }
    }

    Ok((positionals, flags))
}

/// Convert `value` to the parameter's declared type when the runtime variant
/// does not already match. Untyped parameters pass values through unchanged.
fn coerce(value: Value, param: &ParamSpec) -> Result<Value> {
    match param.ty {
        None => Ok(value),
        Some(ty) if value.kind() == ty => Ok(value),
        Some(ty) => (ty.converter())(&value.to_string()),
    }
}
