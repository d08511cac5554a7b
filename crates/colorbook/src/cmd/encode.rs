use std::fs::File;
use std::io::{BufWriter, Write};

use colorbook_codec::AcbWriter;

use crate::cmd::validate::load_book;
use crate::cmd::EncodeArgs;
use crate::exit::{encode_error, io_error, CliResult, SUCCESS};
use crate::output::{print_summaries, BookSummary, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let book = load_book(&args.input, args.strict)?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = AcbWriter::new(sink);
    writer
        .write_book(&book)
        .map_err(|err| encode_error("failed encoding book", err))?;
    drop(writer);

    tracing::info!(id = book.id, colors = book.colors.len(), "encoded color book");

    // Binary output owns stdout; summaries are only printed for file output.
    if let Some(path) = &args.output {
        let mut summary = BookSummary::of(&book);
        summary.path = Some(path.display().to_string());
        summary.bytes = std::fs::metadata(path)
            .ok()
            .and_then(|meta| usize::try_from(meta.len()).ok());
        print_summaries(&[summary], format);
    }

    Ok(SUCCESS)
}
