use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use lox_tokenizer::{printer, scanner::Scanner};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_LEXICAL_ERROR: u8 = 65;
const EXIT_USAGE_OR_IO: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lexical analysis for Lox source files", long_about = None)]
struct Cli {
    /// Log scanner activity to stderr
    #[arg(short, long, global = true, env = "LOX_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every token in a source file, one per line
    Tokenize {
        /// Path to the source file, or `-` to read stdin
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are reported through the same path
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE_OR_IO)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_LEXICAL_ERROR),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_USAGE_OR_IO)
        }
    }
}

/// Returns whether a lexical error was reported.
fn run(cli: Cli) -> anyhow::Result<bool> {
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Tokenize { file } => {
            let source = read_source(&file)?;
            debug!(path = %file.display(), bytes = source.len(), "read source");

            let stdout = io::stdout();
            let stderr = io::stderr();
            let had_error = Lox::new(stdout.lock(), stderr.lock()).tokenize(&source)?;
            Ok(had_error)
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
}

impl<Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    fn new(out: Out, err_out: ErrOut) -> Self {
        Self { out, err_out }
    }

    /// Tokens go to `out` and diagnostics to `err_out`, both in source order.
    fn tokenize(&mut self, source: &str) -> io::Result<bool> {
        let mut had_error = false;
        for result in Scanner::new(source) {
            match result {
                Ok(token) => writeln!(self.out, "{}", printer::print(&token))?,
                Err(e) => {
                    had_error = true;
                    writeln!(self.err_out, "{}", e)?;
                }
            }
        }
        self.out.flush()?;
        self.err_out.flush()?;
        Ok(had_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> (String, String, bool) {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let had_error = Lox::new(&mut out, &mut err_out).tokenize(source).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err_out).unwrap(),
            had_error,
        )
    }

    #[test]
    fn clean_source() {
        let (out, err_out, had_error) = tokenize("var a = 1;");
        assert_eq!(
            "VAR var null\nIDENTIFIER a null\nEQUAL = null\nNUMBER 1 1.0\nSEMICOLON ; null\nEOF  null\n",
            out
        );
        assert!(err_out.is_empty());
        assert!(!had_error);
    }

    #[test]
    fn errors_go_to_the_error_stream() {
        let (out, err_out, had_error) = tokenize(",\n$\n\"open");
        assert_eq!("COMMA , null\nEOF  null\n", out);
        assert_eq!(
            "[line 2] Error: Unexpected character: $\n[line 3] Error: Unterminated string.\n",
            err_out
        );
        assert!(had_error);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
