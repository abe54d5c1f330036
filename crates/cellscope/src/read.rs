use crate::config::ReadOptions;
use crate::encode::{OutputDocument, SheetCells};
use crate::error::ReadError;
use crate::extract::extract_cells;
use cellscope_io::{AnyWorkbook, SpreadsheetReader};
use std::path::Path;

/// Scan the selected sheets of an open workbook.
///
/// A sheet whose resolved range is inverted is left out of the document. A
/// valid range that sparse mode emptied still yields the sheet with no cells.
pub fn collect_document<R: SpreadsheetReader>(
    reader: &mut R,
    opts: &ReadOptions,
) -> Result<OutputDocument, R::Error> {
    let available = reader.sheet_names()?;
    let mut doc = OutputDocument::default();
    for name in opts.sheets.resolve(&available) {
        let bounds = reader.sheet_bounds(&name)?;
        let range = opts.range.resolve(bounds);
        if range.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(sheet = %name, ?range, "resolved range is empty; skipping sheet");
            continue;
        }
        let cells = extract_cells(reader, &name, range, opts.sparse)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(sheet = %name, ?range, cells = cells.len(), "extracted sheet");
        doc.sheets.push(SheetCells { name, cells });
    }
    Ok(doc)
}

/// Run the pipeline over an already opened workbook. The reader is dropped
/// before encoding, and on any error.
pub fn read_from<R>(mut reader: R, opts: &ReadOptions) -> Result<String, ReadError>
where
    R: SpreadsheetReader,
    ReadError: From<R::Error>,
{
    let doc = collect_document(&mut reader, opts)?;
    drop(reader);
    doc.encode(opts.format, opts.fields)
        .map_err(ReadError::Encode)
}

/// Open `path` with the backend matching its extension and extract.
pub fn read_workbook(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<String, ReadError> {
    let reader = AnyWorkbook::open_path(path)?;
    read_from(reader, opts)
}
