//! The reserved `set` command and a small set of stock commands the demo
//! binary installs.

use crate::command::{CommandSpec, ParamSpec};
use crate::interpreter::Shell;
use crate::value::{ParamType, Value};

/// Spec of the reserved variable-assignment command.
///
/// `set name value` stores the pair in the session's variable store and
/// returns the confirmation string `"name = value"`.
pub(crate) fn set_spec() -> CommandSpec {
    CommandSpec::new(
        vec![ParamSpec::new("name"), ParamSpec::new("value")],
        |env, args| {
            let name = args[0].to_string();
            let value = args[1].to_string();
            env.set_var(name.clone(), value.clone());
            Ok(Some(Value::Str(format!("{} = {}", name, value))))
        },
    )
}

/// Install the stock commands into a shell:
///
/// - `echo text` (alias `print`): returns its argument unchanged.
/// - `add a b`: integer sum.
/// - `upper text`: uppercased text.
/// - `repeat text [--count n] [--sep s]`: `text` repeated `count` times,
///   joined by `sep`.
pub fn install(shell: &mut Shell) {
    shell.register("echo", &["print"], vec![ParamSpec::new("text")], |_env, args| {
        Ok(args.into_iter().next())
    });

    shell.register(
        "add",
        &[],
        vec![
            ParamSpec::new("a").typed(ParamType::Int),
            ParamSpec::new("b").typed(ParamType::Int),
        ],
        |_env, args| {
            let a = args[0].as_int()?;
            let b = args[1].as_int()?;
            let sum = a
                .checked_add(b)
                .ok_or_else(|| anyhow::anyhow!("integer overflow"))?;
            Ok(Some(Value::Int(sum)))
        },
    );

    shell.register("upper", &[], vec![ParamSpec::new("text")], |_env, args| {
        Ok(Some(Value::Str(args[0].to_string().to_uppercase())))
    });

    shell.register(
        "repeat",
        &[],
        vec![
            ParamSpec::new("text"),
            ParamSpec::new("count")
                .typed(ParamType::Int)
                .default(Value::Int(2)),
            ParamSpec::new("sep").default(" "),
        ],
        |_env, args| {
            let text = args[0].to_string();
            let count = args[1].as_int()?;
            if count <= 0 {
                anyhow::bail!("count must be positive");
            }
            let sep = args[2].to_string();
            Ok(Some(Value::Str(vec![text; count as usize].join(sep.as_str()))))
        },
    );
}
