use crate::cell::{NormalizedCell, is_blank, raw_value};
use crate::range::ResolvedRange;
use cellscope_io::SpreadsheetReader;

/// Walk `range` row by row and normalize each cell. With `sparse`, cells
/// whose raw value is missing or whitespace-only text are left out.
pub fn extract_cells<R: SpreadsheetReader>(
    reader: &mut R,
    sheet: &str,
    range: ResolvedRange,
    sparse: bool,
) -> Result<Vec<NormalizedCell>, R::Error> {
    let mut cells = Vec::new();
    for (row, col) in range.coords() {
        let data = reader.read_cell(sheet, row, col)?;
        if sparse && is_blank(data.as_ref().and_then(raw_value)) {
            continue;
        }
        cells.push(NormalizedCell::from_data(row, col, data.as_ref()));
    }
    Ok(cells)
}
