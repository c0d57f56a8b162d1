use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use slope_cli::{lex_source, parse_source, read_source, run_source, RunOptions, SlopeError};
use slope_eval::StdConsole;
use slope_types::SourceFile;

/// SlopeScript, the ski-themed scripting language. Runs one program file.
#[derive(Parser, Debug)]
#[command(name = "slopescript", version, about, long_about = None)]
struct Args {
    /// Program to run.
    file: PathBuf,

    /// Stop with an error after this many evaluation steps.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Report failures as a JSON diagnostic on stderr.
    #[arg(long)]
    json: bool,

    /// Print the token stream and exit without running.
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Print the syntax tree and exit without running.
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let name = args.file.display().to_string();

    let source = match read_source(&args.file) {
        Ok(source) => source,
        Err(e) => {
            report(&e, &SourceFile::new(name, ""), args.json);
            return ExitCode::FAILURE;
        }
    };
    let file = SourceFile::new(name, source);

    let outcome = if args.tokens {
        lex_source(&file.source).map(|tokens| {
            for token in &tokens {
                println!("{}\t{}\t{}", token.span, token.kind, token.to_source());
            }
        })
    } else if args.ast {
        parse_source(&file.source).map(|program| println!("{program:#?}"))
    } else {
        let options = RunOptions {
            max_steps: args.max_steps,
        };
        run_source(&file.source, &mut StdConsole::new(), &options)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &file, args.json);
            ExitCode::FAILURE
        }
    }
}

fn report(error: &SlopeError, file: &SourceFile, json: bool) {
    if json {
        let diagnostic = error.diagnostic(file);
        match serde_json::to_string(&diagnostic) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("❌ Error: {diagnostic}"),
        }
        return;
    }
    match error {
        SlopeError::FileNotFound(_) => eprintln!("❌ {error}"),
        _ => eprintln!("❌ Error: {}", error.diagnostic(file)),
    }
}
