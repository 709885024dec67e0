//! A tiny, embeddable interactive shell framework.
//!
//! This crate provides the building blocks of a line-oriented command shell:
//! a variable store with `$name` expansion, a command registry with aliases,
//! an argument binder that reconciles raw tokens against declared parameter
//! descriptors (positional/flag disambiguation, type coercion, defaults),
//! and a pipeline executor that chains each stage's result into the next
//! stage's leading argument.
//!
//! The main entry point is [`Shell`], which owns one session's configuration,
//! variables, and registered commands and exposes `execute_line`, an
//! interactive `repl`, and a script runner. The public modules [`command`],
//! [`env`], and [`value`] expose the types needed to register your own
//! commands; [`builtin`] ships a handful of stock ones.

mod binder;
pub mod builtin;
pub mod command;
pub mod env;
mod interpreter;
mod lexer;
pub mod value;

pub use interpreter::{Shell, ShellConfig};
