use crate::binder::bind_args;
use crate::builtin;
use crate::command::{CommandSpec, ParamSpec, Registry};
use crate::env::Environment;
use crate::lexer;
use crate::value::Value;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// User-facing strings of one shell session.
///
/// Everything the shell prints or matches against input — the banner, the
/// prompt, the reserved command names, and the dialogs — is supplied here at
/// construction. The core reads no environment variables and no files.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub motd: String,
    pub prompt: String,
    pub help_command: String,
    pub exit_command: String,
    pub set_command: String,
    pub exit_dialog: String,
    pub unknown_cmd_dialog: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            motd: "Welcome to lineshell! Type 'help' for available commands, and 'exit' to quit."
                .to_string(),
            prompt: ">>> ".to_string(),
            help_command: "help".to_string(),
            exit_command: "exit".to_string(),
            set_command: "set".to_string(),
            exit_dialog: "Exiting lineshell...".to_string(),
            unknown_cmd_dialog: "Unknown command.".to_string(),
        }
    }
}

/// One interactive shell session: configuration, variable store, and command
/// registry, plus the line-execution engine that ties them together.
///
/// Sessions are fully independent values; creating two `Shell`s yields two
/// unrelated variable stores and registries.
///
/// Example
/// ```
/// use lineshell::{builtin, Shell};
/// let mut sh = Shell::default();
/// builtin::install(&mut sh);
/// let mut out = Vec::new();
/// sh.execute_line("set greeting hello", &mut out).unwrap();
/// sh.execute_line("echo $greeting | upper", &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().ends_with("HELLO\n"));
/// ```
pub struct Shell {
    config: ShellConfig,
    env: Environment,
    registry: Registry,
}

impl Shell {
    /// Create a session with the given configuration.
    ///
    /// The registry starts with the reserved `set` command bound under the
    /// configured name; the help command is handled by the executor itself
    /// and is not an entry.
    pub fn new(config: ShellConfig) -> Self {
        let mut registry = Registry::new();
        registry.register(&config.set_command, &[], builtin::set_spec());
        Self {
            config,
            env: Environment::new(),
            registry,
        }
    }

    /// Register a command under `name` and every alias.
    ///
    /// `params` declares the handler's signature in binding order; later
    /// registrations under an existing name silently replace it.
    pub fn register<F>(&mut self, name: &str, aliases: &[&str], params: Vec<ParamSpec>, handler: F)
    where
        F: Fn(&mut Environment, Vec<Value>) -> Result<Option<Value>> + 'static,
    {
        self.registry
            .register(name, aliases, CommandSpec::new(params, handler));
    }

    /// The session's variable store.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the variable store, for seeding variables
    /// programmatically.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Execute one input line against `out`.
    ///
    /// The line is variable-expanded once, split on `|` into segments, and
    /// each segment is tokenized, resolved, bound, and invoked in order,
    /// with every stage's result chained into the next stage's leading
    /// positional argument. A trailing `Some` result is printed; `None` is
    /// silent. The help command and an unknown command print their dialog
    /// and stop further segments without yielding an error; lexing, binding,
    /// and handler failures abort the line as an error for the caller to
    /// report.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        let line = self.env.expand(line);
        let mut chained: Option<Value> = None;

        for segment in line.split('|') {
            let tokens = lexer::split_into_tokens(segment)?;
            let (name, args) = match tokens.split_first() {
                Some(split) => split,
                None => continue,
            };

            if *name == self.config.help_command {
                writeln!(out, "Available commands:")?;
                for registered in self.registry.names() {
                    writeln!(out, " - {}", registered)?;
                }
                break;
            }

            let spec = match self.registry.lookup(name) {
                Some(spec) => spec,
                None => {
                    writeln!(out, "{}", self.config.unknown_cmd_dialog)?;
                    break;
                }
            };

            let bound = bind_args(&spec.params, args, chained.take())?;
            chained = spec.call(&mut self.env, bound)?;
        }

        if let Some(result) = chained {
            writeln!(out, "{}", result)?;
        }
        Ok(())
    }

    /// Interactive read-eval-print loop on the process's standard streams.
    ///
    /// Prints the motd, then reads lines until the exit command or end of
    /// input. Line errors are reported and the loop continues; an interrupt
    /// during the prompt prints a hint instead of aborting the session.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        println!("{}", self.config.motd);

        loop {
            match rl.readline(&self.config.prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line)?;
                    if line == self.config.exit_command {
                        println!("{}", self.config.exit_dialog);
                        break;
                    }
                    if let Err(err) = self.execute_line(line, &mut std::io::stdout()) {
                        println!("Error: {}", err);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("To exit the program, run '{}'.", self.config.exit_command);
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Execute a script file line by line against `out`.
    ///
    /// Blank lines and lines starting with `#` are skipped; every executed
    /// line is first echoed with the prompt prefix. A missing file gets its
    /// own dialog and aborts the run; a failing line is reported and the
    /// runner continues with the next one.
    pub fn run_script(&mut self, path: impl AsRef<Path>, out: &mut dyn Write) -> Result<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                writeln!(out, "Script file not found: {}", path.display())?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            writeln!(out, "{}{}", self.config.prompt, line)?;
            if let Err(err) = self.execute_line(line, out) {
                writeln!(out, "Error: {}", err)?;
            }
        }
        Ok(())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
