//! Read-only workbook access for cellscope.
//!
//! A backend implements [`SpreadsheetReader`] and hands out raw
//! [`CellData`] (stored value, formula text, font and fill) per
//! coordinate. [`AnyWorkbook`] picks the backend from the file
//! extension.

#[cfg(not(any(feature = "umya", feature = "calamine")))]
compile_error!("enable at least one workbook backend: `umya` or `calamine`");

pub mod backends;
pub mod dates;
pub mod error;
pub mod loader;
pub mod traits;

#[cfg(feature = "calamine")]
pub use backends::CalamineAdapter;
#[cfg(feature = "umya")]
pub use backends::UmyaAdapter;
pub use error::IoError;
pub use loader::{AnyWorkbook, BackendKind};
pub use traits::{
    CellData, CellStyle, CellValue, FillStyle, FontStyle, IntoCellValue, SheetBounds,
    SpreadsheetReader, normalize_formula,
};
