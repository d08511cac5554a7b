use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use colorbook_codec::{to_components, AcbWriter, Color, ColorBook, ColorSpace, CODE_LEN};

use crate::cmd::GenerateArgs;
use crate::exit::{encode_error, io_error, CliResult, SUCCESS};
use crate::output::{print_summaries, BookSummary, OutputFormat};

const DESCRIPTION: &str = "Example color book to verify component conversion";
const PAGE_SIZE: u16 = 9;
const PAGE_MID_POINT: u16 = 5;

pub fn run(args: GenerateArgs, format: OutputFormat) -> CliResult<i32> {
    let spaces = args.space.unwrap_or_else(|| ColorSpace::ALL.to_vec());

    std::fs::create_dir_all(&args.out_dir).map_err(|err| {
        io_error(&format!("failed creating {}", args.out_dir.display()), err)
    })?;

    let mut summaries = Vec::with_capacity(spaces.len());
    for space in spaces {
        let book = component_book(space);
        let path = args.out_dir.join(file_name(&book));
        let bytes = write_book(&path, &book)?;

        tracing::info!(path = %path.display(), colors = book.colors.len(), "wrote component book");
        let mut summary = BookSummary::of(&book);
        summary.path = Some(path.display().to_string());
        summary.bytes = Some(bytes);
        summaries.push(summary);
    }

    print_summaries(&summaries, format);
    Ok(SUCCESS)
}

/// A book whose colors sweep every on-disk byte value of `space`.
pub fn component_book(space: ColorSpace) -> ColorBook {
    ColorBook {
        title: format!("{space} Components"),
        color_name_prefix: format!("{space} "),
        color_name_suffix: String::new(),
        description: DESCRIPTION.to_string(),
        page_size: PAGE_SIZE,
        page_mid_point: PAGE_MID_POINT,
        colors: sweep(space),
        is_spot: false,
        ..ColorBook::new(book_id(space), space)
    }
}

fn book_id(space: ColorSpace) -> u16 {
    match space {
        ColorSpace::Rgb => 43,
        ColorSpace::Cmyk => 44,
        ColorSpace::Lab => 45,
    }
}

fn sweep(space: ColorSpace) -> Vec<Color> {
    match space {
        ColorSpace::Rgb | ColorSpace::Cmyk => (0..=255u8)
            .map(|byte| {
                let components = to_components(space, &vec![byte; space.component_count()]);
                Color::new(
                    format!("{byte} ({})", components[0]),
                    code(space.name(), byte),
                    components,
                )
            })
            .collect(),
        ColorSpace::Lab => {
            let lightness = (0..=255u8).map(|l| {
                let components = to_components(space, &[l, 0, 0]);
                Color::new(
                    format!("L {l} ({})", components[0]),
                    code("L", l),
                    components,
                )
            });
            let chroma = (0..=255u8).map(|ab| {
                let components = to_components(space, &[0, ab, ab]);
                Color::new(
                    format!("ab {ab} ({})", components[1]),
                    code("ab", ab),
                    components,
                )
            });
            lightness.chain(chroma).collect()
        }
    }
}

/// `<tag><hex>`, space-padded to the fixed code width.
fn code(tag: &str, byte: u8) -> String {
    format!("{:<width$}", format!("{tag}{byte:x}"), width = CODE_LEN)
}

fn file_name(book: &ColorBook) -> String {
    format!("{}.acb", book.title)
}

fn write_book(path: &Path, book: &ColorBook) -> CliResult<usize> {
    let file = File::create(path)
        .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
    let mut writer = AcbWriter::new(BufWriter::new(file));
    writer
        .write_book(book)
        .map_err(|err| encode_error(&format!("failed writing {}", path.display()), err))?;

    let written = writer
        .get_ref()
        .get_ref()
        .metadata()
        .map_err(|err| io_error(&format!("failed inspecting {}", path.display()), err))?;
    Ok(usize::try_from(written.len()).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use colorbook_codec::{component_range, encode_to_vec};

    use super::*;

    #[test]
    fn books_follow_the_naming_scheme() {
        let book = component_book(ColorSpace::Cmyk);
        assert_eq!(book.id, 44);
        assert_eq!(file_name(&book), "CMYK Components.acb");
        assert_eq!(book.color_name_prefix, "CMYK ");
        assert_eq!((book.page_size, book.page_mid_point), (9, 5));
        assert!(!book.is_spot);
        assert!(!component_book(ColorSpace::Lab).is_spot);
    }

    #[test]
    fn codes_are_padded_to_six_bytes() {
        assert_eq!(code("RGB", 0), "RGB0  ");
        assert_eq!(code("CMYK", 255), "CMYKff");
        assert_eq!(code("L", 10), "La    ");
        assert_eq!(code("ab", 128), "ab80  ");
    }

    #[test]
    fn sweeps_cover_every_byte() {
        let rgb = component_book(ColorSpace::Rgb);
        assert_eq!(rgb.colors.len(), 256);
        assert_eq!(rgb.colors[200].components, vec![200, 200, 200]);
        assert_eq!(rgb.colors[200].name, "200 (200)");

        let cmyk = component_book(ColorSpace::Cmyk);
        assert_eq!(cmyk.colors[0].components, vec![100; 4]);
        assert_eq!(cmyk.colors[255].components, vec![0; 4]);

        let lab = component_book(ColorSpace::Lab);
        assert_eq!(lab.colors.len(), 512);
        assert_eq!(lab.colors[255].components, vec![100, -128, -128]);
        assert_eq!(lab.colors[256].name, "ab 0 (-128)");
        assert_eq!(lab.colors[511].components, vec![0, 127, 127]);
    }

    #[test]
    fn generated_books_are_encodable() {
        for space in ColorSpace::ALL {
            let book = component_book(space);
            for color in &book.colors {
                for (index, value) in color.components.iter().enumerate() {
                    assert!(component_range(space, index).contains(value));
                }
            }
            assert!(encode_to_vec(&book).is_ok(), "{space}");
        }
    }
}
