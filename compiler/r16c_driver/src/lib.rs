use std::fs::{read_to_string, write};
use std::io::Write;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser as ClapParser};
use log::{debug, info, LevelFilter};
use thiserror::Error;

use codegen::{gen_assm, Options};
use emission::{output, render};
use lexer::{Lexer, Token, TokenKind};
use lir::Program;
use parser::{format_rpn, to_rpn, Parser};

#[derive(ClapParser, Debug)]
#[command(
    version,
    about,
    long_about = "Compiles an arithmetic expression to rust16vm assembly"
)]
struct CLI {
    /// Path to a source file holding one expression
    #[arg(required_unless_present = "expr")]
    path: Option<String>,

    /// Compile the given expression instead of reading a file
    #[arg(short = 'e', long, conflicts_with = "path")]
    expr: Option<String>,

    /// Write output here instead of stdout
    #[arg(short = 'o')]
    output: Option<String>,

    /// Emit ADDR for subtraction, as older releases did
    #[arg(long)]
    legacy_sub: bool,

    /// Sets the level of verbosity, repeat for more
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// "Specifies a point in compilation process to stop, only one(1) option can be specified at a time"
    #[command(flatten)]
    stage_options: StageOptions,
}

/// Stop early and print an intermediate form
#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
struct StageOptions {
    /// Stop after lexer, printing tokens
    #[arg(long)]
    lex: bool,

    /// Stop after parser, printing the expression tree
    #[arg(long)]
    parse: bool,

    /// Stop after reordering tokens, printing postfix notation
    #[arg(long)]
    rpn: bool,

    /// Stop after assembly generation, printing the instruction tree
    #[arg(long)]
    codegen: bool,
}

/// Which stage the compiler should stop at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopStage {
    Lexer,
    Parser,
    Rpn,
    CodeGen,
}

impl StopStage {
    fn from_args(options: &StageOptions) -> Option<StopStage> {
        if options.lex {
            Some(StopStage::Lexer)
        } else if options.parse {
            Some(StopStage::Parser)
        } else if options.rpn {
            Some(StopStage::Rpn)
        } else if options.codegen {
            Some(StopStage::CodeGen)
        } else {
            None
        }
    }
}

/// Result of a compiler run, either final assembly or a printed intermediate form
#[derive(Debug)]
pub enum Compiled {
    Assembly(Program),
    Text(String),
}

impl Compiled {
    pub fn render(&self) -> String {
        match self {
            Compiled::Assembly(prog) => render(prog),
            Compiled::Text(text) => text.clone(),
        }
    }
}

pub fn main() -> Result<()> {
    let args = CLI::parse();

    initialize_logging(args.verbose);

    run(&args)
}

fn run(args: &CLI) -> Result<()> {
    let stop_stage = StopStage::from_args(&args.stage_options);
    let options = Options {
        sub_as_add: args.legacy_sub,
    };

    let (name, source) = match (&args.path, &args.expr) {
        (_, Some(expr)) => ("<expr>".to_string(), expr.clone()),
        (Some(path), None) => (
            path.clone(),
            read_to_string(path).with_context(|| format!("Unable to read source file: {}", path))?,
        ),
        (None, None) => unreachable!("clap requires a path or an expression"),
    };

    debug!(
        "Source: {}, Stop stage: {:?}, Output: {:?}, Legacy sub: {}",
        name, stop_stage, args.output, options.sub_as_add
    );

    let compiled = compile(&name, &source, stop_stage, &options)?;

    write_output(args.output.as_deref(), &compiled)
}

fn write_output(path: Option<&str>, compiled: &Compiled) -> Result<()> {
    match (path, compiled) {
        (Some(path), Compiled::Assembly(prog)) => {
            output(path, prog).with_context(|| format!("Unable to write {}", path))?;
            info!("Wrote assembly to {}", path);
        }
        (Some(path), Compiled::Text(text)) => {
            write(path, text).with_context(|| format!("Unable to write {}", path))?;
        }
        (None, compiled) => std::io::stdout()
            .lock()
            .write_all(compiled.render().as_bytes())?,
    }

    Ok(())
}

/// Run the compiler stages over `source`: Lexer, Parser, Codegen.
/// `name` only labels diagnostics.
pub fn compile(
    name: &str,
    source: &str,
    stop_stage: Option<StopStage>,
    options: &Options,
) -> Result<Compiled> {
    let mut lexer = Lexer::new(source);

    let (tokens, errors): (Vec<_>, Vec<_>) = lexer
        .tokenize()
        .partition(|t| t.kind != TokenKind::Illegal);

    if !errors.is_empty() {
        let error_msgs = errors
            .iter()
            .map(|err| lex_error_message(name, err))
            .collect();

        return Err(CompileErr::Lexer(error_msgs).into());
    }

    info!("Lexed {} tokens", tokens.len());

    match stop_stage {
        Some(StopStage::Lexer) => {
            let text = tokens.iter().map(|t| format!("{}\n", t)).collect();
            return Ok(Compiled::Text(text));
        }
        Some(StopStage::Rpn) => {
            let rpn = to_rpn(tokens).map_err(|err| CompileErr::Parser(vec![err.to_string()]))?;
            return Ok(Compiled::Text(format!("{}\n", format_rpn(&rpn))));
        }
        _ => {}
    }

    let ast = Parser::new(tokens)
        .parse()
        .map_err(|err| CompileErr::Parser(vec![err.to_string()]))?;

    if let Some(StopStage::Parser) = stop_stage {
        let text = ast.iter().map(|stmt| format!("{}\n", stmt)).collect();
        return Ok(Compiled::Text(text));
    }

    let (assm, errors) = gen_assm(&ast, options);

    if !errors.is_empty() {
        return Err(CompileErr::CodeGen(errors.iter().map(|e| e.to_string()).collect()).into());
    }

    info!("Generated {} instructions", assm.instructions.len());

    if let Some(StopStage::CodeGen) = stop_stage {
        return Ok(Compiled::Text(format!("{:#?}\n", assm)));
    }

    Ok(Compiled::Assembly(assm))
}

fn lex_error_message(name: &str, token: &Token) -> String {
    let what = token
        .error()
        .map(|err| err.to_string())
        .unwrap_or_else(|| format!("{:?}", token.kind));

    format!("{} at {}:{}:{}", what, name, token.line, token.col)
}

fn initialize_logging(verbosity: u8) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply()
        .ok();
}

#[derive(Error, Debug)]
pub enum CompileErr {
    #[error("Lexer encountered an error(s): {:#?}", .0)]
    Lexer(Vec<String>),
    #[error("Parser encountered an error: {:#?}", .0)]
    Parser(Vec<String>),
    #[error("Codegen encountered an error(s): {:#?}", .0)]
    CodeGen(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_src(src: &str, stage: Option<StopStage>) -> Result<String> {
        compile("test", src, stage, &Options::default()).map(|c| c.render())
    }

    fn compile_err(src: &str) -> CompileErr {
        compile_src(src, None)
            .unwrap_err()
            .downcast::<CompileErr>()
            .unwrap()
    }

    #[test]
    fn file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("expr.txt");
        let out = dir.path().join("expr.s");
        write(&src, "(3 + 4) * 2\n").unwrap();

        let args = CLI::try_parse_from([
            "r16c",
            src.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(&args).unwrap();

        assert_eq!(
            read_to_string(&out).unwrap(),
            "MOV A, #3\nMOV B, #4\nADDR C, A, B\nMOV B, #2\nMULR C, C, B\n"
        );
    }

    #[test]
    fn expr_stage_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("expr.rpn");

        let args =
            CLI::try_parse_from(["r16c", "-e", "1 - 2 * 3", "--rpn", "-o", out.to_str().unwrap()])
                .unwrap();
        run(&args).unwrap();

        assert_eq!(read_to_string(&out).unwrap(), "1 2 3 * -\n");
    }

    #[test]
    fn missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("missing.txt");

        let args = CLI::try_parse_from(["r16c", src.to_str().unwrap()]).unwrap();
        let err = run(&args).unwrap_err();

        assert!(err.to_string().starts_with("Unable to read source file"));
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(
            compile_src("3 + 4", None).unwrap(),
            "MOV A, #3\nMOV B, #4\nADDR C, A, B\n"
        );
    }

    #[test]
    fn full_pipeline_with_parens() {
        assert_eq!(
            compile_src("(3 + 4) * 2", None).unwrap(),
            "MOV A, #3\nMOV B, #4\nADDR C, A, B\nMOV B, #2\nMULR C, C, B\n"
        );
    }

    #[test]
    fn legacy_sub() {
        let options = Options { sub_as_add: true };
        let out = compile("test", "5 - 1", None, &options).unwrap().render();

        assert_eq!(out, "MOV A, #5\nMOV B, #1\nADDR C, A, B\n");
    }

    #[test]
    fn illegal_characters_reported_together() {
        match compile_err("1 @ 2 # 3") {
            CompileErr::Lexer(msgs) => assert_eq!(
                msgs,
                vec![
                    "unexpected character '@' at test:1:3".to_string(),
                    "unexpected character '#' at test:1:7".to_string(),
                ]
            ),
            err => panic!("expected lexer error, got {:?}", err),
        }
    }

    #[test]
    fn unbalanced_parens() {
        match compile_err("(3 + 4") {
            CompileErr::Parser(msgs) => assert!(msgs[0].contains("unbalanced parenthesis")),
            err => panic!("expected parser error, got {:?}", err),
        }
    }

    #[test]
    fn consecutive_literals() {
        match compile_err("3 4 +") {
            CompileErr::Parser(msgs) => {
                assert_eq!(msgs, vec!["expected an operator, found '4' at 1:3".to_string()])
            }
            err => panic!("expected parser error, got {:?}", err),
        }
    }

    #[test]
    fn out_of_range_immediate() {
        match compile_err("600 + 1") {
            CompileErr::CodeGen(msgs) => assert_eq!(
                msgs,
                vec!["value 600 exceeds 9-bit immediate range, max 511".to_string()]
            ),
            err => panic!("expected codegen error, got {:?}", err),
        }
    }

    #[test]
    fn lex_stage() {
        let out = compile_src("1+2", Some(StopStage::Lexer)).unwrap();

        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("Number '1' at 1:1"));
    }

    #[test]
    fn parse_stage() {
        assert_eq!(
            compile_src("3 + 4 * 2", Some(StopStage::Parser)).unwrap(),
            "(3 + (4 * 2))\n"
        );
    }

    #[test]
    fn rpn_stage() {
        assert_eq!(
            compile_src("3 + 4 * 2", Some(StopStage::Rpn)).unwrap(),
            "3 4 2 * +\n"
        );
    }

    #[test]
    fn codegen_stage() {
        let out = compile_src("1 + 2", Some(StopStage::CodeGen)).unwrap();

        assert!(out.contains("AddR"));
    }
}
