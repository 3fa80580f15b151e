//! Dataset structures produced by spreadsheet ingestion

use serde::Serialize;

/// A single field value as delivered by the spreadsheet parser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl CellValue {
    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Coerce the value to the text form used for matching and display.
    ///
    /// Integral numbers print without a decimal part, so a cell Excel
    /// coerced to the number `499370899` still matches the query text
    /// `"499370899"`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 0-based row in the source sheet (header rows and skipped blank rows
    /// keep this truthful)
    pub row: u32,
    /// Values aligned index-for-index with [`Dataset::columns`]
    pub values: Vec<CellValue>,
}

impl Record {
    /// Get the value in the given column position
    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// 1-based row number as spreadsheet UIs display it
    pub fn display_row(&self) -> u32 {
        self.row + 1
    }
}

/// Ordered sequence of records sharing one header.
///
/// Every record's values line up with `columns`, which makes "all records
/// use the header's field set" a structural property instead of a runtime
/// check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    /// Field names taken from the first populated row, trimmed
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a column name to its index; the name is trimmed before
    /// comparison so a configured `" code "` still finds `code`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        self.columns.iter().position(|column| column == needle)
    }
}

/// Convert a 0-based column number to its Excel-style letter
/// (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_letter(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}
