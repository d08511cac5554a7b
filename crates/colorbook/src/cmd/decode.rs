use std::fs::File;
use std::io::Read;

use colorbook_codec::{AcbReader, CodecConfig};

use crate::cmd::{is_stdio, DecodeArgs};
use crate::exit::{decode_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_book, OutputFormat};

/// String cap for files read from disk or stdin: 1 Mi UTF-16 code units.
pub const DEFAULT_MAX_STRING_LEN: u32 = 1024 * 1024;

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = decode_config(&args)?;

    let source: Box<dyn Read> = if is_stdio(&args.path) {
        Box::new(std::io::stdin().lock())
    } else {
        let file = File::open(&args.path)
            .map_err(|err| io_error(&format!("failed opening {}", args.path.display()), err))?;
        Box::new(file)
    };

    let book = AcbReader::with_config(source, config)
        .read_book()
        .map_err(|err| decode_error(&format!("failed decoding {}", args.path.display()), err))?;

    tracing::info!(
        id = book.id,
        title = %book.title,
        colors = book.colors.len(),
        "decoded color book"
    );
    print_book(&book, format);
    Ok(SUCCESS)
}

fn decode_config(args: &DecodeArgs) -> CliResult<CodecConfig> {
    if args.chunk_size == 0 {
        return Err(CliError::new(USAGE, "--chunk-size must be greater than zero"));
    }
    if args.max_string_len == 0 {
        return Err(CliError::new(
            USAGE,
            "--max-string-len must be greater than zero",
        ));
    }

    Ok(CodecConfig {
        max_string_len: args.max_string_len,
        read_chunk_size: args.chunk_size,
    })
}
