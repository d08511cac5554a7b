use std::io::IsTerminal;

use clap::ValueEnum;
use colorbook_codec::{ColorBook, ColorSpace};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One-line description of a book, shared by `validate`, `encode` and `generate`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub id: u16,
    pub title: String,
    pub color_space: ColorSpace,
    pub colors: usize,
    pub is_spot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
}

impl BookSummary {
    pub fn of(book: &ColorBook) -> Self {
        Self {
            path: None,
            id: book.id,
            title: book.title.clone(),
            color_space: book.color_space,
            colors: book.colors.len(),
            is_spot: book.is_spot,
            bytes: None,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_book(book: &ColorBook, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(book),
        OutputFormat::Table => {
            let mut header = Table::new();
            header
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in header_rows(book) {
                header.add_row(vec![field.to_string(), value]);
            }
            println!("{header}");

            let mut colors = Table::new();
            colors
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "NAME", "CODE", book.color_space.name()]);
            for (index, color) in book.colors.iter().enumerate() {
                colors.add_row(vec![
                    index.to_string(),
                    color.name.clone(),
                    color.code.clone(),
                    join_components(&color.components),
                ]);
            }
            println!("{colors}");
        }
        OutputFormat::Pretty => {
            println!("Color Book:");
            for (field, value) in header_rows(book) {
                println!("  {:<18}{value}", format!("{field}:"));
            }
            for color in &book.colors {
                println!(
                    "  {} [{}] {}",
                    color.code,
                    join_components(&color.components),
                    color.name
                );
            }
        }
    }
}

pub fn print_summaries(summaries: &[BookSummary], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for summary in summaries {
                print_json(summary);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PATH", "ID", "TITLE", "SPACE", "COLORS", "SPOT", "BYTES"]);
            for summary in summaries {
                table.add_row(vec![
                    summary.path.clone().unwrap_or_else(|| "-".to_string()),
                    summary.id.to_string(),
                    summary.title.clone(),
                    summary.color_space.to_string(),
                    summary.colors.to_string(),
                    summary.is_spot.to_string(),
                    summary
                        .bytes
                        .map_or_else(|| "-".to_string(), |bytes| bytes.to_string()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for summary in summaries {
                let location = summary.path.as_deref().unwrap_or("<stdin>");
                println!(
                    "{location}: id={} title={:?} space={} colors={} spot={}",
                    summary.id, summary.title, summary.color_space, summary.colors, summary.is_spot
                );
            }
        }
    }
}

fn header_rows(book: &ColorBook) -> Vec<(&'static str, String)> {
    vec![
        ("Id", book.id.to_string()),
        ("Title", book.title.clone()),
        ("Name prefix", format!("{:?}", book.color_name_prefix)),
        ("Name suffix", format!("{:?}", book.color_name_suffix)),
        ("Description", book.description.clone()),
        ("Color space", book.color_space.to_string()),
        ("Colors", book.colors.len().to_string()),
        (
            "Page",
            format!("size {} mid {}", book.page_size, book.page_mid_point),
        ),
        ("Spot", book.is_spot.to_string()),
    ]
}

fn join_components(components: &[i16]) -> String {
    components
        .iter()
        .map(i16::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
