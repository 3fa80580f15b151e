//! Whole-file loading with progress reporting
//!
//! Reads a spreadsheet file fully into memory before parsing, reporting
//! percentages to an observer as chunks arrive. Two guarantees hold for
//! every read: percentages never decrease, and the completion event fires
//! exactly once — even when the source yields no progress at all, and even
//! when the read fails partway through.

use crate::error::Result;
use crate::ingest;
use crate::model::Dataset;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Events reported while a file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// Reading began; always the first event
    Started,
    /// A chunk arrived; `percent` is clamped to 0..=100 and never
    /// decreases across the events of one read
    Progress { percent: u8 },
    /// Reading finished, successfully or not; fires exactly once
    Completed,
}

/// Keeps emitted percentages monotone and completion single-shot
struct ProgressGate<F: FnMut(LoadEvent)> {
    observe: F,
    last_percent: u8,
    completed: bool,
}

impl<F: FnMut(LoadEvent)> ProgressGate<F> {
    fn new(mut observe: F) -> Self {
        observe(LoadEvent::Started);
        Self {
            observe,
            last_percent: 0,
            completed: false,
        }
    }

    fn progress(&mut self, loaded: u64, total: u64) {
        if total == 0 {
            return;
        }
        let percent = ((loaded as f64 / total as f64) * 100.0).round().min(100.0) as u8;
        if percent < self.last_percent {
            return;
        }
        self.last_percent = percent;
        (self.observe)(LoadEvent::Progress { percent });
    }

    fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        (self.observe)(LoadEvent::Completed);
    }
}

/// Read `reader` to the end, reporting progress against `total` when it is
/// known. With an unknown (or zero) `total` no progress events are emitted,
/// but [`LoadEvent::Completed`] still fires.
pub fn read_with_progress<R, F>(
    mut reader: R,
    total: Option<u64>,
    observe: F,
) -> std::io::Result<Vec<u8>>
where
    R: Read,
    F: FnMut(LoadEvent),
{
    let mut gate = ProgressGate::new(observe);
    let mut data = Vec::with_capacity(total.unwrap_or(0) as usize);
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                data.extend_from_slice(&chunk[..n]);
                if let Some(total) = total {
                    gate.progress(data.len() as u64, total);
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                // completion fires on failure too, like the load-end
                // signal this models
                gate.complete();
                return Err(e);
            }
        }
    }

    gate.complete();
    Ok(data)
}

/// Load a spreadsheet file into a dataset, reporting read progress.
///
/// Composes [`read_with_progress`] with [`ingest::parse_workbook_bytes`].
pub fn load_dataset<P, F>(path: P, sheet: Option<&str>, observe: F) -> Result<Dataset>
where
    P: AsRef<Path>,
    F: FnMut(LoadEvent),
{
    let path = path.as_ref();
    let file = File::open(path)?;
    let total = file.metadata().ok().map(|m| m.len());
    let bytes = read_with_progress(file, total, observe)?;
    debug!(path = %path.display(), bytes = bytes.len(), "file read");
    ingest::parse_workbook_bytes(bytes, sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect_events<R: Read>(reader: R, total: Option<u64>) -> (std::io::Result<Vec<u8>>, Vec<LoadEvent>) {
        let mut events = Vec::new();
        let result = read_with_progress(reader, total, |event| events.push(event));
        (result, events)
    }

    fn percents(events: &[LoadEvent]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match e {
                LoadEvent::Progress { percent } => Some(*percent),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_progress_is_monotone_and_completes() {
        let data = vec![7u8; 150 * 1024];
        let (result, events) = collect_events(Cursor::new(data.clone()), Some(data.len() as u64));

        assert_eq!(result.unwrap(), data);
        assert_eq!(events.first(), Some(&LoadEvent::Started));
        assert_eq!(events.last(), Some(&LoadEvent::Completed));

        let percents = percents(&events);
        assert!(!percents.is_empty());
        assert!(percents.windows(2).all(|w| w[0] <= w[1]), "percentages must not decrease: {:?}", percents);
        assert_eq!(percents.last(), Some(&100));
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let data = vec![1u8; 10];
        let (_, events) = collect_events(Cursor::new(data.clone()), Some(10));
        let completions = events.iter().filter(|e| matches!(e, LoadEvent::Completed)).count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_unknown_total_still_completes() {
        let data = vec![1u8; 200 * 1024];
        let (result, events) = collect_events(Cursor::new(data.clone()), None);
        assert_eq!(result.unwrap().len(), data.len());
        assert!(percents(&events).is_empty());
        assert_eq!(
            events,
            vec![LoadEvent::Started, LoadEvent::Completed]
        );
    }

    #[test]
    fn test_empty_source_emits_no_progress() {
        let (result, events) = collect_events(Cursor::new(Vec::new()), Some(0));
        assert!(result.unwrap().is_empty());
        assert_eq!(events, vec![LoadEvent::Started, LoadEvent::Completed]);
    }

    #[test]
    fn test_percent_clamped_when_total_understates() {
        // more bytes arrive than the advertised total
        let data = vec![2u8; 100 * 1024];
        let (result, events) = collect_events(Cursor::new(data), Some(1024));
        assert!(result.is_ok());
        let percents = percents(&events);
        assert!(percents.iter().all(|&p| p <= 100), "clamped: {:?}", percents);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    struct FailAfter {
        remaining: usize,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::other("backing store went away"));
            }
            let n = self.remaining.min(buf.len());
            buf[..n].fill(9);
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_failed_read_still_completes_once() {
        let reader = FailAfter { remaining: 80 * 1024 };
        let (result, events) = collect_events(reader, Some(200 * 1024));

        assert!(result.is_err());
        let completions = events.iter().filter(|e| matches!(e, LoadEvent::Completed)).count();
        assert_eq!(completions, 1);
        assert_eq!(events.last(), Some(&LoadEvent::Completed));
        // the partial progress that did happen stayed monotone
        let percents = percents(&events);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }
}
