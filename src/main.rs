use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use mkscribe::ast::printer::Printer;
use mkscribe::{ScribeError, build, lexer};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut dump_tokens = false;
    let mut input_path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tokens" | "-t" => dump_tokens = true,
            _ => {
                input_path = Some(arg);
                if args.next().is_some() {
                    bail!("Only one input file is supported");
                }
                break;
            }
        }
    }

    let source = if let Some(path) = input_path {
        fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        buffer
    };

    if dump_tokens {
        let (tokens, errors) = lexer::tokenize(&source);
        for token in &tokens {
            println!("{token:?}");
        }

        let count = errors.len();
        for error in errors {
            eprintln!("{}", ScribeError::Lexical(error));
        }
        if count > 0 {
            bail!("{count} diagnostic(s) emitted");
        }
        return Ok(());
    }

    let (statements, diagnostics) = build(&source);
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    println!("{}", Printer::new().print_program(&statements));

    if !diagnostics.is_empty() {
        bail!("{} diagnostic(s) emitted", diagnostics.len());
    }

    Ok(())
}
