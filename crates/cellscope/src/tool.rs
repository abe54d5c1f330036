//! Agent-facing `read_excel` tool: definition, argument parsing, and the
//! soft missing-file result.

use crate::config::{DEFAULT_FMT, DEFAULT_OUT, ReadOptions};
use crate::error::ReadError;
use crate::range::RangeSpec;
use crate::read::read_workbook;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

pub const TOOL_NAME: &str = "read_excel";

const DESCRIPTION: &str = "\
Read cells from a workbook (.xlsx, .xlsm, .xls, .xlsb, .ods) with selectable fields and output format.

Use this to get table contents, formulas, or cell styling (bold, font, colors).

fmt=j (default) returns JSON: {\"SheetName\": {\"cells\": [{\"row\", \"col\", \"value\", \"formula\"?, \"bold\", ...}]}}. \
\"formula\": true appears only on formula cells.
fmt=t returns text: a \">SheetName\" line per sheet, then one \"c<TAB>row<TAB>col<TAB>fields...\" line per cell. \
Backslash, tab, CR and LF inside values are written as \\\\, \\t, \\r, \\n.

out picks fields by letter, in any order: v=value b=bold f=formula n=font_name z=font_size c=font_color g=fill_color. \
Fields are always emitted in that order.

row_start/row_end/col_start/col_end are 1-based and inclusive; 0 means the sheet's used range on that side.
sparse=true (default) skips blank cells; false returns every cell in the range.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: DESCRIPTION.to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "filepath": {
                    "type": "string",
                    "description": "Path to the workbook"
                },
                "out": {
                    "type": "string",
                    "default": DEFAULT_OUT,
                    "description": "Field letters: v=value b=bold f=formula n=font_name z=font_size c=font_color g=fill_color"
                },
                "fmt": {
                    "type": "string",
                    "default": DEFAULT_FMT,
                    "description": "j=JSON, t=tab-separated text"
                },
                "sheets": {
                    "type": "string",
                    "default": "",
                    "description": "Comma-separated sheet names; empty for all sheets"
                },
                "row_start": { "type": "integer", "default": 0, "description": "First row (1-based); 0 = used range" },
                "row_end": { "type": "integer", "default": 0, "description": "Last row (inclusive); 0 = used range" },
                "col_start": { "type": "integer", "default": 0, "description": "First column (1-based); 0 = used range" },
                "col_end": { "type": "integer", "default": 0, "description": "Last column (inclusive); 0 = used range" },
                "sparse": {
                    "type": "boolean",
                    "default": true,
                    "description": "Only non-blank cells"
                }
            },
            "required": ["filepath"]
        }),
    }
}

fn default_out() -> String {
    DEFAULT_OUT.to_string()
}

fn default_fmt() -> String {
    DEFAULT_FMT.to_string()
}

fn default_sparse() -> bool {
    true
}

/// Arguments as the tool receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadExcelArgs {
    pub filepath: String,
    #[serde(default = "default_out")]
    pub out: String,
    #[serde(default = "default_fmt")]
    pub fmt: String,
    #[serde(default)]
    pub sheets: String,
    #[serde(default)]
    pub row_start: i64,
    #[serde(default)]
    pub row_end: i64,
    #[serde(default)]
    pub col_start: i64,
    #[serde(default)]
    pub col_end: i64,
    #[serde(default = "default_sparse")]
    pub sparse: bool,
}

impl ReadExcelArgs {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            out: default_out(),
            fmt: default_fmt(),
            sheets: String::new(),
            row_start: 0,
            row_end: 0,
            col_start: 0,
            col_end: 0,
            sparse: true,
        }
    }

    pub fn options(&self) -> ReadOptions {
        ReadOptions::from_strings(&self.out, &self.fmt, &self.sheets)
            .with_range(RangeSpec::from_sentinels(
                self.row_start,
                self.row_end,
                self.col_start,
                self.col_end,
            ))
            .with_sparse(self.sparse)
    }
}

/// Run the tool. A missing file is reported as an `error: ...` string so the
/// agent can show it inline; every other failure is returned as `Err`.
pub fn read_excel(args: &ReadExcelArgs) -> Result<String, ReadError> {
    if !Path::new(&args.filepath).exists() {
        #[cfg(feature = "tracing")]
        tracing::warn!(path = %args.filepath, "read_excel: file not found");
        return Ok(format!("error: file not found: {}", args.filepath));
    }
    read_workbook(&args.filepath, &args.options())
}

/// Entry point for a JSON `arguments` object.
pub fn execute(input: &serde_json::Value) -> Result<String, ReadError> {
    let args = ReadExcelArgs::deserialize(input).map_err(ReadError::InvalidArguments)?;
    read_excel(&args)
}
