//! sheetfind-core: Record lookup in spreadsheet files keyed by national ID
//!
//! This library reads a spreadsheet into an in-memory dataset, validates
//! Iranian national IDs with their checksum, and finds the first record
//! whose key column matches a queried ID. Session state is a plain value
//! advanced by a pure update function, so hosts can drive it from any
//! interface.

pub mod audit;
pub mod config;
pub mod error;
pub mod ingest;
pub mod load;
pub mod lookup;
pub mod model;
pub mod session;
pub mod validate;

use std::path::Path;

pub use audit::AuditReport;
pub use config::LookupConfig;
pub use error::{Error, Result};
pub use load::LoadEvent;
pub use model::{CellValue, Dataset, Record};
pub use session::{SearchOutcome, Session, SessionEvent};
pub use validate::{is_valid_national_id, IdDefect};

/// Main lookup interface
pub struct Finder {
    config: LookupConfig,
}

impl Finder {
    /// Create a new finder with default configuration
    pub fn new() -> Self {
        Self::with_config(LookupConfig::default())
    }

    /// Create a new finder with custom configuration
    pub fn with_config(config: LookupConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Load a spreadsheet file and start a session holding its records.
    ///
    /// `observe` receives [`LoadEvent`]s while the file is read.
    pub fn open_session<P, F>(&self, path: P, observe: F) -> Result<Session>
    where
        P: AsRef<Path>,
        F: FnMut(LoadEvent),
    {
        let dataset = load::load_dataset(path, self.config.sheet.as_deref(), observe)?;
        let session = Session::new(&self.config.key_column);
        Ok(session::update(session, SessionEvent::DatasetReplaced(dataset)))
    }

    /// Set the query and run the search in one step
    pub fn search(&self, session: Session, query: &str) -> Session {
        let session = session::update(session, SessionEvent::QueryChanged(query.to_string()));
        session::update(session, SessionEvent::SearchRequested)
    }

    /// Audit the configured key column of a dataset
    pub fn audit(&self, dataset: &Dataset) -> Result<AuditReport> {
        audit::audit_key_column(dataset, &self.config.key_column)
    }
}

impl Default for Finder {
    fn default() -> Self {
        Self::new()
    }
}
