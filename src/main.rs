//! Purpose: `gqlrest` CLI entry point.
//! Role: Binary crate root; parses args, translates execution results, writes JSON on stdout.
//! Invariants: stdout only ever carries the translated response body.
//! Invariants: CLI errors are emitted as JSON on stderr; diagnostics go through tracing.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueHint};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use gqlrest::api::{
    Error, ErrorKind, ExecutionResult, ResponseMode, Translator, TracingPrinter, to_exit_code,
};

#[derive(Parser, Debug)]
#[command(
    name = "gqlrest",
    version,
    about = "Translate GraphQL execution results into GraphQL or REST JSON responses",
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Emit a flattened REST envelope {code, message, data} instead of the GraphQL shape"
    )]
    rest: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Translate an execution result read from a file or stdin")]
    Translate {
        #[arg(
            long,
            help = "Execution result JSON file (default: stdin)",
            value_hint = ValueHint::FilePath
        )]
        input: Option<PathBuf>,
    },
    #[command(about = "Emit a response carrying a single error")]
    Error {
        #[arg(long, allow_negative_numbers = true, help = "Error code stored in extensions.code")]
        code: i64,
        #[arg(help = "Error message")]
        message: String,
    },
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            return err.print().map_err(|io_err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write help")
                    .with_source(io_err)
            });
        }
        Err(err) => {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(clap_error_summary(&err))
                .with_hint("Run `gqlrest --help` for usage."));
        }
    };

    init_tracing();

    let translator = Translator::new().with_printer(Arc::new(TracingPrinter));
    let mode = ResponseMode::from_restful(cli.rest);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Translate { input } => {
            let result = read_result(input)?;
            translator.write_json(&mut out, &result, mode)?;
        }
        Command::Error { code, message } => {
            translator.write_json_error(&mut out, code, mode, &message)?;
        }
    }

    writeln!(out).and_then(|()| out.flush()).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write stdout")
            .with_source(err)
    })
}

fn read_result(input: Option<PathBuf>) -> Result<ExecutionResult, Error> {
    match input {
        Some(path) => {
            let file = File::open(&path).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!("failed to open {}", path.display()))
                    .with_hint("Check that the --input path exists and is readable.")
                    .with_source(err)
            })?;
            ExecutionResult::from_reader(BufReader::new(file))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            ExecutionResult::from_reader(buf.as_slice())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or("invalid arguments")
        .trim_start_matches("error: ")
        .to_string()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert(
        "message".to_string(),
        json!(err.message().unwrap_or("error")),
    );
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    let mut causes = Vec::new();
    let mut current = std::error::Error::source(err);
    while let Some(source) = current {
        causes.push(Value::String(source.to_string()));
        current = source.source();
    }
    if !causes.is_empty() {
        inner.insert("causes".to_string(), Value::Array(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn emit_error(err: &Error) {
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}
