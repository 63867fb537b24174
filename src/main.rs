use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use wingcalc::Engine;

/// wingcalc evaluates expressions with variables, macros, lambdas and
/// pointer-addressed arrays.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates every non-empty line of a file instead of an expression.
    #[arg(short, long)]
    file: Option<String>,

    /// The expression to evaluate. Without one, lines are read from standard
    /// input until it closes.
    expression: Option<String>,
}

fn main() {
    let args = Args::parse();

    // WINGCALC_LOG controls the level; warnings only by default.
    let filter = EnvFilter::try_from_env("WINGCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();

    let engine = Engine::new();

    if let Some(path) = args.file {
        let script = fs::read_to_string(&path).unwrap_or_else(|_| {
                                                  eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                                                  std::process::exit(1);
                                              });
        for line in script.lines().filter(|line| !line.trim().is_empty()) {
            report(&engine, line);
        }
    } else if let Some(expression) = args.expression {
        match engine.solve(&expression) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            },
        }
    } else {
        repl(&engine);
    }
}

fn repl(engine: &Engine) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if !line.trim().is_empty() {
            report(engine, &line);
        }
        let _ = io::stdout().flush();
    }
}

fn report(engine: &Engine, line: &str) {
    match engine.solve(line) {
        Ok(value) => println!("> {value}"),
        Err(e) => eprintln!("{e}"),
    }
}
