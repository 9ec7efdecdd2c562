// Error types
pub mod error;

// Tabular source abstraction (public API)
pub mod traits;

// Source implementations
pub mod memory;
pub mod xlsx;

// Workbook discovery
pub mod discovery;

// Sheet classification and row parsing
pub mod ingest;

// Traits
pub use traits::{CellValue, Sheet, TabularSource};

// Sources
pub use memory::MemorySource;
pub use xlsx::XlsxSource;

// Discovery
pub use discovery::{DEFAULT_FILE_NAME_PATTERN, discover_workbook, resolve_workbook};

// Ingestion
pub use ingest::{DEFAULT_ENTRY_SHEET_PATTERN, IngestOptions, IngestReport, Ingested, ingest};

// Error types
pub use error::{Error, Result};
