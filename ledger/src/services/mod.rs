//! Ledger services for the Roastery Ledger

pub mod export;
pub mod green_beans;
pub mod reporting;
pub mod roasting;

pub use export::{read_file, read_table, table_to_string, write_table, CsvExporter, CsvTable, ExportedFiles};
pub use green_beans::{GreenBeanLedger, RecordPurchaseInput};
pub use reporting::CostReporter;
pub use roasting::{RoastEngine, RoastInput};
