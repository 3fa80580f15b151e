//! Output formatters for lookup results

use anyhow::Result;
use colored::*;
use sheetfind_core::model::{CellValue, Dataset, Record};
use sheetfind_core::{LoadEvent, SearchOutcome, Session};
use std::io::Write;

/// Draw the load progress as a single updating line on stderr
pub fn draw_progress(event: LoadEvent) {
    match event {
        LoadEvent::Started => eprint!("Loading... 0%"),
        LoadEvent::Progress { percent } => eprint!("\rLoading... {}%", percent),
        LoadEvent::Completed => eprintln!("\rLoading... done"),
    }
    let _ = std::io::stderr().flush();
}

/// Print the search result in human-readable form, optionally followed by
/// the full table
pub fn print_human(session: &Session, show_table: bool) {
    match session.outcome {
        SearchOutcome::Found(_) => {
            if let Some(record) = session.found_record() {
                println!(
                    "{} sheet row {}",
                    "✓ Found:".green().bold(),
                    record.display_row().to_string().bold()
                );
                print_record_card(&session.dataset, record);
            }
        }
        SearchOutcome::NotFound => println!(
            "{} no record matches {}",
            "✗ Not found:".red().bold(),
            session.query.trim().bold()
        ),
        SearchOutcome::InvalidKey => println!(
            "{} {} fails the national-ID check",
            "✗ Invalid ID:".red().bold(),
            session.query.trim().bold()
        ),
        SearchOutcome::EmptyQuery => {
            println!("{}", "Enter a national ID to search for.".yellow())
        }
        SearchOutcome::Idle => {}
    }

    if show_table && !session.dataset.is_empty() {
        println!();
        print_table(&session.dataset);
    }
}

fn print_record_card(dataset: &Dataset, record: &Record) {
    let width = dataset
        .columns
        .iter()
        .map(|column| column.chars().count())
        .max()
        .unwrap_or(0);
    for (i, column) in dataset.columns.iter().enumerate() {
        let value = record.get(i).map(CellValue::to_text).unwrap_or_default();
        println!("  {}  {}", pad(column, width).cyan(), value);
    }
}

fn print_table(dataset: &Dataset) {
    let mut widths: Vec<usize> = dataset
        .columns
        .iter()
        .map(|column| column.chars().count())
        .collect();
    for record in &dataset.records {
        for (i, width) in widths.iter_mut().enumerate() {
            let len = record
                .get(i)
                .map(|value| value.to_text().chars().count())
                .unwrap_or(0);
            *width = (*width).max(len);
        }
    }

    let header: Vec<String> = dataset
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column, *width))
        .collect();
    println!("{}", header.join("  ").bold());

    for record in &dataset.records {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let value = record.get(i).map(CellValue::to_text).unwrap_or_default();
                pad(&value, *width)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

// colored wraps strings in escape codes, so format-width padding would
// count those; pad by character count instead
fn pad(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    for _ in text.chars().count()..width {
        out.push(' ');
    }
    out
}

/// Print the search result as JSON
pub fn print_json(session: &Session) -> Result<()> {
    let status = match session.outcome {
        SearchOutcome::Idle => "idle",
        SearchOutcome::EmptyQuery => "empty_query",
        SearchOutcome::InvalidKey => "invalid_id",
        SearchOutcome::NotFound => "not_found",
        SearchOutcome::Found(_) => "found",
    };

    let record = match session.found_record() {
        Some(record) => Some(record_json(&session.dataset, record)?),
        None => None,
    };
    let output = serde_json::json!({
        "status": status,
        "query": session.query.trim(),
        "row": session.found_record().map(Record::display_row),
        "record": record,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn record_json(dataset: &Dataset, record: &Record) -> Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    for (i, column) in dataset.columns.iter().enumerate() {
        let value = record.get(i).unwrap_or(&CellValue::Empty);
        map.insert(column.clone(), serde_json::to_value(value)?);
    }
    Ok(serde_json::Value::Object(map))
}
