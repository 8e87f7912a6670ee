use std::path::Path;

use anyhow::{Context, Result, ensure};

use mkscribe::ast::printer::Printer;
use mkscribe::fixtures::{CaseClass, load_cases};
use mkscribe::token::TokenKind;
use mkscribe::{build, lexer};

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

#[test]
fn runs_fixture_scripts() -> Result<()> {
    let cases = load_cases(Path::new("tests/scripts"))?;

    for case in cases {
        let source = case.read_script()?;
        let (statements, diagnostics) = build(&source);

        ensure!(
            statements.len() == case.spec.expected.statements,
            "{}: expected {} statements, got {}",
            case.name,
            case.spec.expected.statements,
            statements.len()
        );

        match case.spec.class {
            CaseClass::Clean => {
                ensure!(
                    diagnostics.is_empty(),
                    "{}: unexpected diagnostics: {:?}",
                    case.name,
                    diagnostics
                );

                if let Some(tree_file) = &case.spec.expected.tree_file {
                    let expected = normalize(
                        &case
                            .read_text(tree_file)
                            .with_context(|| format!("{}: golden tree", case.name))?,
                    );
                    let printed = normalize(&Printer::new().print_program(&statements));
                    ensure!(
                        printed == expected,
                        "{}: tree mismatch\n--- expected ---\n{}\n--- got ---\n{}",
                        case.name,
                        expected,
                        printed
                    );
                }
            }
            CaseClass::Diagnostics => {
                ensure!(
                    diagnostics.len() == case.spec.expected.diagnostics.len(),
                    "{}: expected {} diagnostics, got {:?}",
                    case.name,
                    case.spec.expected.diagnostics.len(),
                    diagnostics
                );

                for (diagnostic, fragment) in
                    diagnostics.iter().zip(&case.spec.expected.diagnostics)
                {
                    let rendered = diagnostic.to_string();
                    ensure!(
                        rendered.contains(fragment.as_str()),
                        "{}: diagnostic '{}' does not contain '{}'",
                        case.name,
                        rendered,
                        fragment
                    );
                }
            }
        }
    }

    Ok(())
}

#[test]
fn every_script_scan_ends_with_the_eof_sentinel() -> Result<()> {
    let cases = load_cases(Path::new("tests/scripts"))?;

    for case in cases {
        let source = case.read_script()?;
        let (tokens, _) = lexer::tokenize(&source);
        let last = tokens.last().context("token stream was empty")?;

        ensure!(
            last.kind == TokenKind::Eof,
            "{}: last token was {:?}",
            case.name,
            last.kind
        );
        ensure!(
            last.span.start == source.len() && last.span.end == source.len(),
            "{}: sentinel span {:?} does not cover the final offset {}",
            case.name,
            last.span,
            source.len()
        );
    }

    Ok(())
}
