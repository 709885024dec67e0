use regex::Regex;
use std::collections::HashMap;

/// Mutable, session-level variable store used by the interpreter.
///
/// Variables are plain `name -> string` pairs set from the shell's reserved
/// `set` command (or programmatically) and substituted back into input lines
/// as `$name` references. The store lives for the lifetime of one shell
/// session and is never persisted.
#[derive(Debug, Clone)]
pub struct Environment {
    vars: HashMap<String, String>,
    var_pattern: Regex,
}

impl Environment {
    /// Create an empty variable store.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            // A reference is a dollar sign followed by word characters.
            var_pattern: Regex::new(r"\$(\w+)").unwrap(),
        }
    }

    /// Get the value of a variable.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Set or override a variable.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Substitute every `$name` reference in `text` with its stored value.
    ///
    /// Unset names are left in place as the literal `$name` token. The scan
    /// is a single pass: substituted values are not re-expanded, so a value
    /// containing `$other` stays verbatim.
    pub fn expand(&self, text: &str) -> String {
        self.var_pattern
            .replace_all(text, |caps: &regex::Captures| {
                match self.vars.get(&caps[1]) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn test_set_and_get_var() {
        let mut env = Environment::new();

        // initially absent
        assert_eq!(env.get_var("KEY"), None);

        env.set_var("KEY", "VALUE");
        assert_eq!(env.get_var("KEY"), Some("VALUE".to_string()));

        // silent overwrite
        env.set_var("KEY", "OTHER");
        assert_eq!(env.get_var("KEY"), Some("OTHER".to_string()));
    }

    #[test]
    fn test_expand_known_and_unknown() {
        let mut env = Environment::new();
        env.set_var("name", "world");

        assert_eq!(env.expand("hello $name"), "hello world");
        assert_eq!(env.expand("$name$name"), "worldworld");
        assert_eq!(env.expand("$missing"), "$missing");
        assert_eq!(env.expand("no references here"), "no references here");
    }

    #[test]
    fn test_expand_is_single_pass() {
        let mut env = Environment::new();
        env.set_var("a", "$b");
        env.set_var("b", "deep");

        // The substituted "$b" must not be expanded again.
        assert_eq!(env.expand("$a"), "$b");
    }
}
