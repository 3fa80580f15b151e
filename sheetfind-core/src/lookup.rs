//! Record lookup by key column

use crate::model::{Dataset, Record};
use tracing::debug;

/// Find the first record whose `column` value equals `key`.
///
/// Both the stored value (coerced to text) and the key are trimmed before
/// the comparison. The key is not re-validated here; a key that never
/// passed validation simply matches nothing. An unknown column name is
/// tolerated the same way.
pub fn find_record<'a>(dataset: &'a Dataset, key: &str, column: &str) -> Option<&'a Record> {
    find_record_row(dataset, key, column).map(|index| &dataset.records[index])
}

/// Like [`find_record`], but returns the index of the matching record
pub fn find_record_row(dataset: &Dataset, key: &str, column: &str) -> Option<usize> {
    let Some(col) = dataset.column_index(column) else {
        debug!(column, "key column not in header, lookup misses");
        return None;
    };
    let needle = key.trim();
    let hit = dataset
        .records
        .iter()
        .position(|record| match record.get(col) {
            Some(value) => value.to_text().trim() == needle,
            None => false,
        });
    debug!(column, hit = ?hit, "record lookup");
    hit
}
