//! Command-line frontend: `encode`/`decode`/`validate` over stdin/stdout.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toon::{Delimiter, EncodeOptions, DecodeOptions, Value};

#[derive(Parser, Debug)]
#[command(name = "toon")]
#[command(version, about = "Encode and decode TOON (Token-Oriented Object Notation)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read JSON from stdin, write TOON to stdout.
    Encode {
        /// Delimiter used for array headers and row fields.
        #[arg(long, value_enum, default_value = "comma")]
        delimiter: DelimiterArg,

        /// Number of spaces per indentation level.
        #[arg(long, default_value = "2")]
        indent: usize,
    },
    /// Read TOON from stdin, write JSON to stdout.
    Decode {
        /// Accept lenient shape deviations (ragged rows, odd indentation) instead of the
        /// strict validation `DecodeOptions::default()` uses.
        #[arg(long)]
        lenient: bool,
    },
    /// Read TOON from stdin and report whether it is well-formed, in strict mode.
    /// Prints nothing on success.
    Validate,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DelimiterArg {
    Comma,
    Tab,
    Pipe,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Pipe => Delimiter::Pipe,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode { delimiter, indent } => encode_cmd(delimiter.into(), indent),
        Command::Decode { lenient } => decode_cmd(!lenient),
        Command::Validate => validate_cmd(),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;
    Ok(input)
}

fn encode_cmd(delimiter: Delimiter, indent: usize) -> Result<()> {
    let input = read_stdin()?;
    let json: serde_json::Value =
        serde_json::from_str(&input).context("parsing JSON from stdin")?;
    let value: Value = toon::to_value(&json).context("converting JSON to TOON value tree")?;

    let options = EncodeOptions::new().with_delimiter(delimiter).with_indent(indent);
    let encoded = toon::encode(&value, &options).context("encoding TOON")?;

    let mut stdout = io::stdout();
    stdout.write_all(encoded.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn decode_cmd(strict: bool) -> Result<()> {
    let input = read_stdin()?;
    let options = DecodeOptions::new().with_strict(strict);
    let value = toon::decode(&input, &options).context("decoding TOON")?;
    let json: serde_json::Value = toon::from_value(value).context("converting TOON value tree to JSON")?;

    let rendered = serde_json::to_string_pretty(&json).context("rendering JSON")?;
    let mut stdout = io::stdout();
    stdout.write_all(rendered.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn validate_cmd() -> Result<()> {
    let input = read_stdin()?;
    let options = DecodeOptions::new().with_strict(true);
    toon::decode(&input, &options).context("validating TOON")?;
    Ok(())
}
