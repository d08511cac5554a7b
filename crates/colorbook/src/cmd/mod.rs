use clap::{Args, Subcommand};
use colorbook_codec::ColorSpace;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod generate;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an ACB file and print the book.
    Decode(DecodeArgs),
    /// Validate a JSON book and encode it as ACB.
    Encode(EncodeArgs),
    /// Validate a JSON book without encoding it.
    Validate(ValidateArgs),
    /// Write component test books that sweep every byte value.
    Generate(GenerateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Validate(args) => validate::run(args, format),
        Command::Generate(args) => generate::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// ACB file to read (`-` for stdin).
    pub path: PathBuf,
    /// Read buffer size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = colorbook_codec::DEFAULT_READ_CHUNK_SIZE)]
    pub chunk_size: usize,
    /// Longest accepted string, in UTF-16 code units.
    #[arg(long, value_name = "UNITS", default_value_t = decode::DEFAULT_MAX_STRING_LEN)]
    pub max_string_len: u32,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON book to encode (`-` for stdin).
    pub input: PathBuf,
    /// Output file. Default: stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Reject properties not named in the book schema.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON book to validate (`-` for stdin).
    pub input: PathBuf,
    /// Reject properties not named in the book schema.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory the books are written to (created if missing).
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,
    /// Color spaces to generate (comma-separated). Default: all.
    #[arg(long, value_delimiter = ',', value_parser = parse_color_space)]
    pub space: Option<Vec<ColorSpace>>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_color_space(input: &str) -> Result<ColorSpace, String> {
    input.parse().map_err(|err: colorbook_codec::ValidationError| err.to_string())
}

/// `-` selects stdin/stdout.
pub(crate) fn is_stdio(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole input file, or stdin for `-`.
pub(crate) fn read_input(path: &std::path::Path) -> CliResult<Vec<u8>> {
    use std::io::Read;

    if is_stdio(path) {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|err| crate::exit::io_error("failed reading stdin", err))?;
        return Ok(buf);
    }

    std::fs::read(path)
        .map_err(|err| crate::exit::io_error(&format!("failed reading {}", path.display()), err))
}
