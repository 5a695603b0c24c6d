use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use dynacalc::{error::Error, interpreter::session::Session};

/// dynacalc is a calculator language with user-defined functions whose
/// parameters are dynamically scoped.
///
/// Without CONTENTS, statements are read interactively from standard input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells dynacalc to treat CONTENTS as the path of a script file.
    #[arg(short, long)]
    file: bool,

    /// Quiet mode only shows the output of `print` and errors, without the
    /// value of every statement or the interactive prompt.
    #[arg(short, long)]
    quiet: bool,

    /// The script to run, or its path with `--file`.
    contents: Option<String>,
}

/// Installs a stderr log subscriber filtered by `RUST_LOG`, if it is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

/// Why the process exits with a failure status.
#[derive(Debug, thiserror::Error)]
enum Failure {
    /// The session stopped on a fatal error.
    #[error(transparent)]
    Session(#[from] Error),
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] io::Error),
}

/// Prints the recoverable errors of a run and turns a fatal one into the
/// exit status.
fn report(result: Result<Vec<Error>, Error>) -> Result<(), Error> {
    for error in result? {
        eprintln!("{error}");
    }
    Ok(())
}

fn repl<R: BufRead, W: Write>(session: &mut Session<W>, input: R, prompt: bool) -> Result<(), Failure> {
    let mut lines = input.lines();
    let mut pending = String::new();

    loop {
        if prompt {
            print!("{}", if pending.is_empty() { "> " } else { "  " });
            let _ = io::stdout().flush();
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => return Err(Failure::Stdin(e)),
            None => break,
        };
        pending.push_str(&line);
        pending.push('\n');

        if !line.ends_with('\\') {
            report(session.run(&pending))?;
            pending.clear();
        }
    }

    if !pending.is_empty() {
        report(session.run(&pending))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let mut session = Session::new().echo(!args.quiet);

    let result: Result<(), Failure> = match args.contents {
        Some(path) if args.file => match fs::read_to_string(&path) {
            Ok(script) => report(session.run(&script)).map_err(Failure::from),
            Err(e) => {
                eprintln!("Failed to read the input file '{path}': {e}");
                return ExitCode::FAILURE;
            },
        },
        Some(script) => report(session.run(&script)).map_err(Failure::from),
        None => repl(&mut session, io::stdin().lock(), !args.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
