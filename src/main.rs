use argh::FromArgs;
use lineshell::{builtin, Shell};

#[derive(FromArgs)]
/// A tiny interactive shell with variables, pipelines, and typed arguments.
struct Args {
    /// script file to execute instead of starting the interactive prompt
    #[argh(positional)]
    script: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let mut shell = Shell::default();
    builtin::install(&mut shell);

    match args.script {
        Some(path) => shell.run_script(path, &mut std::io::stdout()),
        None => shell.repl(),
    }
}
