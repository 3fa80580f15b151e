//! Key-column auditing
//!
//! Sweeps every record's key cell through the national-ID check and
//! collects the rows that would never be reachable by a lookup. Rows are
//! checked in parallel; findings come back in dataset order.

use crate::error::{Error, Result};
use crate::model::Dataset;
use crate::validate::{check_national_id, IdDefect};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

/// Why a key cell failed the audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditProblem {
    MissingValue,
    NotTenDigits,
    RepeatedDigits,
    WrongCheckDigit,
}

impl From<IdDefect> for AuditProblem {
    fn from(defect: IdDefect) -> Self {
        match defect {
            IdDefect::NotTenDigits => AuditProblem::NotTenDigits,
            IdDefect::RepeatedDigits => AuditProblem::RepeatedDigits,
            IdDefect::WrongCheckDigit => AuditProblem::WrongCheckDigit,
        }
    }
}

impl fmt::Display for AuditProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AuditProblem::MissingValue => "no value",
            AuditProblem::NotTenDigits => "not exactly 10 digits",
            AuditProblem::RepeatedDigits => "all digits identical",
            AuditProblem::WrongCheckDigit => "check digit mismatch",
        };
        write!(f, "{}", text)
    }
}

/// One flagged key cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFinding {
    /// 1-based sheet row the value came from
    pub row: u32,
    /// Trimmed cell text as it was checked
    pub value: String,
    pub problem: AuditProblem,
}

/// Outcome of auditing one key column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Resolved header name of the audited column
    pub column: String,
    /// Number of records checked
    pub checked: usize,
    /// Records whose key passed
    pub valid: usize,
    /// Flagged records, in dataset order
    pub findings: Vec<AuditFinding>,
}

/// Check every value in `column` and report the rows that fail.
pub fn audit_key_column(dataset: &Dataset, column: &str) -> Result<AuditReport> {
    let col = dataset
        .column_index(column)
        .ok_or_else(|| Error::ColumnNotFound(column.trim().to_string()))?;

    let findings: Vec<AuditFinding> = dataset
        .records
        .par_iter()
        .filter_map(|record| {
            let text = record
                .get(col)
                .map(|value| value.to_text())
                .unwrap_or_default();
            let text = text.trim();
            let problem = if text.is_empty() {
                AuditProblem::MissingValue
            } else {
                match check_national_id(text) {
                    Ok(()) => return None,
                    Err(defect) => defect.into(),
                }
            };
            Some(AuditFinding {
                row: record.display_row(),
                value: text.to_string(),
                problem,
            })
        })
        .collect();

    let checked = dataset.len();
    Ok(AuditReport {
        column: dataset.columns[col].clone(),
        checked,
        valid: checked - findings.len(),
        findings,
    })
}
