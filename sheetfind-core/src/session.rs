//! Search session state
//!
//! All state for one lookup session lives in [`Session`], and every change
//! goes through [`update`], a pure function from a session and an event to
//! the next session. Callers own the session value; nothing here touches
//! I/O or globals, so the same event sequence always produces the same
//! state.

use crate::lookup::find_record_row;
use crate::model::{Dataset, Record};
use crate::validate::is_valid_national_id;

/// Result of the most recent search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search has run against the current dataset
    #[default]
    Idle,
    /// The query was blank after trimming
    EmptyQuery,
    /// The query is not a well-formed national ID
    InvalidKey,
    /// The query is well formed but matches no record
    NotFound,
    /// A record matched; holds its index into the dataset
    Found(usize),
}

/// Events that drive a session forward
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new dataset was loaded, replacing whatever was held before
    DatasetReplaced(Dataset),
    /// The query text changed
    QueryChanged(String),
    /// The current query should be searched in the current dataset
    SearchRequested,
}

/// Complete state of one lookup session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub key_column: String,
    pub dataset: Dataset,
    pub query: String,
    pub outcome: SearchOutcome,
}

impl Session {
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            ..Self::default()
        }
    }

    /// The matched record, when the last search found one
    pub fn found_record(&self) -> Option<&Record> {
        match self.outcome {
            SearchOutcome::Found(index) => self.dataset.records.get(index),
            _ => None,
        }
    }
}

/// Advance a session by one event
pub fn update(session: Session, event: SessionEvent) -> Session {
    match event {
        SessionEvent::DatasetReplaced(dataset) => Session {
            dataset,
            // a retained index would point into the discarded dataset
            outcome: SearchOutcome::Idle,
            ..session
        },
        SessionEvent::QueryChanged(query) => Session { query, ..session },
        SessionEvent::SearchRequested => {
            let outcome = search_outcome(&session);
            Session { outcome, ..session }
        }
    }
}

fn search_outcome(session: &Session) -> SearchOutcome {
    let query = session.query.trim();
    if query.is_empty() {
        return SearchOutcome::EmptyQuery;
    }
    if !is_valid_national_id(query) {
        return SearchOutcome::InvalidKey;
    }
    match find_record_row(&session.dataset, query, &session.key_column) {
        Some(index) => SearchOutcome::Found(index),
        None => SearchOutcome::NotFound,
    }
}
