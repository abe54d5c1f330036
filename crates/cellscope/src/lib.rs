//! Extract cell values, formulas and presentation attributes from a
//! workbook and render them as compact JSON or tab-separated text.
//!
//! The pipeline for one call is: open the workbook, resolve the scan range
//! per selected sheet, walk cells row-major, normalize each one, project the
//! requested fields, and encode. [`read_workbook`] runs the whole thing for a
//! path; [`tool`] wraps it as an agent-callable tool.

pub mod cell;
pub mod config;
pub mod encode;
pub mod error;
pub mod extract;
pub mod fields;
pub mod range;
pub mod read;
pub mod tool;

pub use cell::NormalizedCell;
pub use config::{DEFAULT_FMT, DEFAULT_OUT, ReadOptions, SheetSelection};
pub use encode::{OutputDocument, OutputFormat, SheetCells, escape, unescape};
pub use error::ReadError;
pub use extract::extract_cells;
pub use fields::{Field, FieldSet};
pub use range::{RangeSpec, ResolvedRange};
pub use read::{collect_document, read_from, read_workbook};

// Re-export for convenience
pub use cellscope_io::{AnyWorkbook, CellData, IoError, SpreadsheetReader};
