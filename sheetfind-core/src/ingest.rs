//! Spreadsheet ingestion using calamine

use crate::error::{Error, Result};
use crate::model::{CellValue, Dataset, Record, column_letter};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Parse spreadsheet bytes into a dataset.
///
/// The format (xlsx, xlsm, xlsb, xls, ods) is detected from the content.
/// `sheet` selects a worksheet by name; when `None` the first sheet is
/// used, matching what a plain upload of the file would show. Field names
/// come from the first populated row; an empty sheet (or a workbook with
/// no sheets) yields an empty dataset.
pub fn parse_workbook_bytes(bytes: Vec<u8>, sheet: Option<&str>) -> Result<Dataset> {
    let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_names = workbook.sheet_names();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| Error::SheetNotFound(wanted.to_string()))?,
        None => match sheet_names.first() {
            Some(first) => first.clone(),
            None => return Ok(Dataset::default()),
        },
    };

    let range = workbook.worksheet_range(&name)?;
    let dataset = dataset_from_range(&range);
    debug!(
        sheet = %name,
        columns = dataset.columns.len(),
        records = dataset.records.len(),
        "worksheet parsed"
    );
    Ok(dataset)
}

/// Read a spreadsheet file into a dataset, without progress reporting
pub fn read_dataset<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Dataset> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_workbook_bytes(bytes, sheet)
}

fn dataset_from_range(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Dataset::default();
    };
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let columns = header_names(header, start_col);

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            // blank rows carry no record; provenance is kept on `row`
            continue;
        }
        records.push(Record {
            row: start_row + 1 + offset as u32,
            values: row.iter().map(cell_value).collect(),
        });
    }

    Dataset { columns, records }
}

/// Header names, trimmed; blank header cells take their Excel column
/// letter and duplicates get `_1`-style suffixes
fn header_names(header: &[Data], start_col: u32) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (i, cell) in header.iter().enumerate() {
        let text = cell_value(cell).to_text();
        let trimmed = text.trim();
        let mut name = if trimmed.is_empty() {
            column_letter(start_col + i as u32)
        } else {
            trimmed.to_string()
        };
        if names.contains(&name) {
            let mut n = 1;
            while names.contains(&format!("{}_{}", name, n)) {
                n += 1;
            }
            name = format!("{}_{}", name, n);
        }
        names.push(name);
    }
    names
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: &[Vec<Data>]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    #[test]
    fn test_header_and_records() {
        let range = range_from(&[
            vec![
                Data::String("نام".to_string()),
                Data::String("کد ملی".to_string()),
            ],
            vec![
                Data::String("علی".to_string()),
                Data::String("0499370899".to_string()),
            ],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(dataset.columns, vec!["نام", "کد ملی"]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].row, 1);
        assert_eq!(
            dataset.records[0].get(1),
            Some(&CellValue::Text("0499370899".to_string()))
        );
    }

    #[test]
    fn test_blank_rows_skipped_with_provenance() {
        let range = range_from(&[
            vec![Data::String("code".to_string())],
            vec![Data::String("1".to_string())],
            vec![Data::Empty],
            vec![Data::String("2".to_string())],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].row, 1);
        // row 2 was blank; the next record still knows it came from row 3
        assert_eq!(dataset.records[1].row, 3);
    }

    #[test]
    fn test_blank_header_cells_use_column_letters() {
        let range = range_from(&[
            vec![
                Data::String("name".to_string()),
                Data::Empty,
                Data::String("  ".to_string()),
            ],
            vec![
                Data::String("x".to_string()),
                Data::String("y".to_string()),
                Data::String("z".to_string()),
            ],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(dataset.columns, vec!["name", "B", "C"]);
    }

    #[test]
    fn test_duplicate_headers_get_suffixes() {
        let range = range_from(&[
            vec![
                Data::String("code".to_string()),
                Data::String("code".to_string()),
                Data::String("code".to_string()),
            ],
            vec![
                Data::String("a".to_string()),
                Data::String("b".to_string()),
                Data::String("c".to_string()),
            ],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(dataset.columns, vec!["code", "code_1", "code_2"]);
    }

    #[test]
    fn test_header_names_trimmed() {
        let range = range_from(&[
            vec![Data::String("  کد ملی  ".to_string())],
            vec![Data::String("0499370899".to_string())],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(dataset.columns, vec!["کد ملی"]);
    }

    #[test]
    fn test_empty_range_is_empty_dataset() {
        let range: Range<Data> = Range::empty();
        let dataset = dataset_from_range(&range);
        assert!(dataset.is_empty());
        assert!(dataset.columns.is_empty());
    }

    #[test]
    fn test_mixed_value_kinds() {
        let range = range_from(&[
            vec![
                Data::String("code".to_string()),
                Data::String("active".to_string()),
            ],
            vec![Data::Float(499370899.0), Data::Bool(true)],
        ]);
        let dataset = dataset_from_range(&range);
        assert_eq!(
            dataset.records[0].get(0),
            Some(&CellValue::Number(499370899.0))
        );
        assert_eq!(dataset.records[0].get(1), Some(&CellValue::Boolean(true)));
    }
}
