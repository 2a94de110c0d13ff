//! Synchronous CSV reader with iterator interface
//!
//! Streams ledger commands from a CSV file one row at a time. Format concerns
//! live in the csv_format module.
//!
//! ```no_run
//! use wallet_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("commands.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Applying command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Row-level parse and conversion errors are yielded as `Err` items
//! - Error messages carry the 1-based file line (the header is line 1)

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::LedgerCommand;
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Memory usage is constant in the file size.
pub struct SyncReader {
    records: DeserializeRecordsIntoIter<File, CsvRecord>,
    line_num: usize,
}

impl SyncReader {
    /// Open a CSV file for streaming
    ///
    /// The reader trims whitespace from every field and accepts rows with a
    /// missing trailing amount.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(String)` if it could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let records = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file)
            .into_deserialize();

        Ok(Self {
            records,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerCommand, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.records.next()?;
        self.line_num += 1;

        Some(match row {
            Ok(csv_record) => convert_csv_record(csv_record)
                .map_err(|e| format!("Line {}: {}", self.line_num, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", self.line_num, e)),
        })
    }
}

impl std::fmt::Debug for SyncReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncReader")
            .field("line_num", &self.line_num)
            .finish_non_exhaustive()
    }
}
