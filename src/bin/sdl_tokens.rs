//! Token-stream inspector for sdl schema files.
//!
//! A thin consumer of the public lexer stream, for debugging grammar and
//! layout issues: prints one token per line, or the whole stream as JSON.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use sdl_lexer::sdl::lexing::{lex, Token};

#[derive(Parser)]
#[command(name = "sdl-tokens")]
#[command(about = "Print the token stream of an sdl schema file")]
struct Args {
    /// Path to the sdl file to tokenize
    file: PathBuf,

    /// Emit the stream as JSON instead of one token per line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let content = match fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("{}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let source_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let mut tokens: Vec<Token> = Vec::new();
    for result in lex(&content, source_name) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&tokens) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("failed to serialize tokens: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for token in &tokens {
            println!("{token}");
        }
    }
    ExitCode::SUCCESS
}
