// CSV ingestion: parses a listings export and rebuilds the SQLite store.
// The dashboard reads whatever schema the most recent load produced.

pub mod csv_source;
pub mod loader;
