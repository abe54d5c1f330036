#![cfg(feature = "calamine")]

use crate::dates::{format_datetime, normalize_iso};
use crate::traits::{CellData, CellValue, SheetBounds, SpreadsheetReader, normalize_formula};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

struct LoadedSheet {
    values: Range<Data>,
    formulas: Option<Range<String>>,
}

/// Values-and-formulas reader for the legacy and non-OOXML formats
/// (xls, xlsb, ods). Calamine exposes no font or fill data, so every
/// cell comes back without a style.
pub struct CalamineAdapter {
    workbook: Sheets<BufReader<File>>,
    loaded: HashMap<String, LoadedSheet>,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    path: PathBuf,
}

impl CalamineAdapter {
    fn convert_value(data: &Data) -> Option<CellValue> {
        match data {
            Data::Empty => None,
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Int(i) => Some(CellValue::Int(*i)),
            Data::Bool(b) => Some(CellValue::Boolean(*b)),
            Data::Error(e) => Some(CellValue::Error(e.to_string())),
            Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
                Some(ts) => Some(CellValue::DateTime(format_datetime(&ts))),
                None => Some(CellValue::Number(dt.as_f64())),
            },
            // Elapsed-time formats stay as day counts
            Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
            Data::DateTimeIso(s) => Some(CellValue::DateTime(normalize_iso(s))),
            Data::DurationIso(s) => Some(CellValue::DateTime(s.clone())),
        }
    }

    fn load(&mut self, sheet: &str) -> Result<&LoadedSheet, calamine::Error> {
        if !self.loaded.contains_key(sheet) {
            let values = self.workbook.worksheet_range(sheet)?;
            let formulas = match self.workbook.worksheet_formula(sheet) {
                Ok(f) => Some(f),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(sheet, error = %_e, "formulas unavailable; reading values only");
                    None
                }
            };
            self.loaded
                .insert(sheet.to_string(), LoadedSheet { values, formulas });
        }
        Ok(&self.loaded[sheet])
    }
}

/// Calamine positions are 0-based; convert the range corners to 1-based.
fn range_bounds<T>(range: &Range<T>) -> Option<SheetBounds>
where
    T: calamine::CellType,
{
    let (sr, sc) = range.start()?;
    let (er, ec) = range.end()?;
    Some(SheetBounds {
        min_row: sr + 1,
        max_row: er + 1,
        min_col: sc + 1,
        max_col: ec + 1,
    })
}

impl SpreadsheetReader for CalamineAdapter {
    type Error = calamine::Error;

    fn backend_name(&self) -> &'static str {
        "calamine"
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.workbook.sheet_names().to_vec())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let workbook = open_workbook_auto(path.as_ref())?;
        Ok(Self {
            workbook,
            loaded: HashMap::new(),
            path: path.as_ref().to_path_buf(),
        })
    }

    fn sheet_bounds(&mut self, sheet: &str) -> Result<Option<SheetBounds>, Self::Error> {
        let loaded = self.load(sheet)?;
        let values = range_bounds(&loaded.values);
        let formulas = loaded.formulas.as_ref().and_then(range_bounds);
        Ok(match (values, formulas) {
            (Some(mut v), Some(f)) => {
                v.include(f.min_row, f.min_col);
                v.include(f.max_row, f.max_col);
                Some(v)
            }
            (v, f) => v.or(f),
        })
    }

    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error> {
        if row == 0 || col == 0 {
            return Ok(None);
        }
        let loaded = self.load(sheet)?;
        let pos = (row - 1, col - 1);
        let value = loaded.values.get_value(pos).and_then(Self::convert_value);
        let formula = loaded
            .formulas
            .as_ref()
            .and_then(|f| f.get_value(pos))
            .filter(|f| !f.is_empty())
            .map(|f| normalize_formula(f.clone()));
        if value.is_none() && formula.is_none() {
            return Ok(None);
        }
        Ok(Some(CellData {
            value,
            formula,
            style: None,
        }))
    }
}

impl Drop for CalamineAdapter {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %self.path.display(), "closed calamine workbook");
    }
}
