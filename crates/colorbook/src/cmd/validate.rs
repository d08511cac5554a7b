use colorbook_codec::ColorBook;
use colorbook_schema::{BookValidator, ValidatorConfig};

use crate::cmd::{is_stdio, read_input, ValidateArgs};
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_summaries, BookSummary, OutputFormat};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let book = load_book(&args.input, args.strict)?;

    let mut summary = BookSummary::of(&book);
    if !is_stdio(&args.input) {
        summary.path = Some(args.input.display().to_string());
    }
    print_summaries(&[summary], format);
    Ok(SUCCESS)
}

/// Read and validate a JSON book.
pub(crate) fn load_book(path: &std::path::Path, strict: bool) -> CliResult<ColorBook> {
    let document = read_input(path)?;
    let validator = BookValidator::with_config(ValidatorConfig {
        strict_mode: strict,
        ..ValidatorConfig::default()
    })
    .map_err(|err| schema_error("failed loading book schema", err))?;

    validator
        .validate_json(&document)
        .map_err(|err| schema_error(&format!("invalid book {}", path.display()), err))
}
