//! CSV export and import of the ledger tables

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use shared::{PurchaseRecord, RoastBatchRecord, RoastedInventoryRecord};

use crate::config::ExportConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// A record type exported as one CSV table
pub trait CsvTable: Serialize + DeserializeOwned {
    /// Table name used in file names and error messages
    const TABLE: &'static str;

    fn columns() -> &'static [&'static str];
}

impl CsvTable for PurchaseRecord {
    const TABLE: &'static str = "green_beans";

    fn columns() -> &'static [&'static str] {
        &Self::COLUMNS
    }
}

impl CsvTable for RoastedInventoryRecord {
    const TABLE: &'static str = "roasted_beans";

    fn columns() -> &'static [&'static str] {
        &Self::COLUMNS
    }
}

impl CsvTable for RoastBatchRecord {
    const TABLE: &'static str = "roasting_log";

    fn columns() -> &'static [&'static str] {
        &Self::COLUMNS
    }
}

/// Write a table with its header row, even when there are no records
pub fn write_table<T: CsvTable, W: io::Write>(writer: W, records: &[T]) -> LedgerResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(T::columns())?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Read a table, rejecting files whose header differs from the expected columns
pub fn read_table<T: CsvTable, R: io::Read>(reader: R) -> LedgerResult<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?;
    if !headers.iter().eq(T::columns().iter().copied()) {
        return Err(LedgerError::UnexpectedColumns {
            table: T::TABLE,
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    rdr.deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(LedgerError::from)
}

/// Render a table to an in-memory CSV string
pub fn table_to_string<T: CsvTable>(records: &[T]) -> LedgerResult<String> {
    let mut buf = Vec::new();
    write_table(&mut buf, records)?;

    String::from_utf8(buf).map_err(|e| LedgerError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Paths written by [`CsvExporter::export`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub green_beans: PathBuf,
    pub roasted_beans: PathBuf,
    pub roasting_log: PathBuf,
}

/// Writes the three ledger tables to `{directory}/{prefix}_{table}.csv`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    directory: PathBuf,
    prefix: String,
}

impl CsvExporter {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.directory, config.prefix.as_str())
    }

    /// Path of the file a table is written to
    pub fn path_for<T: CsvTable>(&self) -> PathBuf {
        self.directory
            .join(format!("{}_{}.csv", self.prefix, T::TABLE))
    }

    /// Export purchases, roasted inventory and the roasting log
    pub fn export(&self, ledger: &Ledger) -> LedgerResult<ExportedFiles> {
        std::fs::create_dir_all(&self.directory)?;

        let files = ExportedFiles {
            green_beans: self.write_file(ledger.green_beans().purchases())?,
            roasted_beans: self.write_file(ledger.roasted_inventory())?,
            roasting_log: self.write_file(ledger.roast_log())?,
        };

        tracing::info!(
            directory = %self.directory.display(),
            prefix = %self.prefix,
            purchases = ledger.green_beans().purchases().len(),
            batches = ledger.batch_count(),
            "Exported ledger to CSV"
        );

        Ok(files)
    }

    fn write_file<T: CsvTable>(&self, records: &[T]) -> LedgerResult<PathBuf> {
        let path = self.path_for::<T>();
        write_table(File::create(&path)?, records)?;
        Ok(path)
    }
}

/// Read one exported table back from disk
pub fn read_file<T: CsvTable>(path: impl AsRef<Path>) -> LedgerResult<Vec<T>> {
    read_table(File::open(path)?)
}
