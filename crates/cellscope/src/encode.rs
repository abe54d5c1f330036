use crate::cell::NormalizedCell;
use crate::fields::{FieldSet, ProjectedCell, text_tokens};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"Sheet": {"cells": [...]}}`
    #[default]
    Json,
    /// `>Sheet` header lines followed by tab-separated `c` lines
    Text,
}

impl OutputFormat {
    /// Only the first character counts: `t`/`T` selects text, anything else
    /// (including unknown letters) selects JSON.
    pub fn parse(fmt: &str) -> Self {
        match fmt.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('t') => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

/// Cells extracted from one sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetCells {
    pub name: String,
    pub cells: Vec<NormalizedCell>,
}

/// Sheets that produced output, in selection order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputDocument {
    pub sheets: Vec<SheetCells>,
}

impl OutputDocument {
    pub fn encode(
        &self,
        format: OutputFormat,
        fields: FieldSet,
    ) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => self.to_json(fields),
            OutputFormat::Text => Ok(self.to_text(fields)),
        }
    }

    pub fn to_json(&self, fields: FieldSet) -> Result<String, serde_json::Error> {
        serde_json::to_string(&JsonDocument { doc: self, fields })
    }

    pub fn to_text(&self, fields: FieldSet) -> String {
        let mut lines = Vec::new();
        for sheet in &self.sheets {
            lines.push(format!(">{}", escape(&sheet.name)));
            for cell in &sheet.cells {
                let mut parts = vec!["c".to_string(), cell.row.to_string(), cell.col.to_string()];
                parts.extend(text_tokens(cell, fields));
                lines.push(parts.join("\t"));
            }
        }
        lines.join("\n")
    }
}

struct JsonDocument<'a> {
    doc: &'a OutputDocument,
    fields: FieldSet,
}

struct JsonSheet<'a> {
    cells: &'a [NormalizedCell],
    fields: FieldSet,
}

struct JsonCells<'a> {
    cells: &'a [NormalizedCell],
    fields: FieldSet,
}

impl Serialize for JsonDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.doc.sheets.len()))?;
        for sheet in &self.doc.sheets {
            map.serialize_entry(
                &sheet.name,
                &JsonSheet {
                    cells: &sheet.cells,
                    fields: self.fields,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for JsonSheet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            "cells",
            &JsonCells {
                cells: self.cells,
                fields: self.fields,
            },
        )?;
        map.end()
    }
}

impl Serialize for JsonCells<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.cells.len()))?;
        for cell in self.cells {
            seq.serialize_element(&ProjectedCell {
                cell,
                fields: self.fields,
            })?;
        }
        seq.end()
    }
}

/// Escape a text field for the tab-separated encoding.
///
/// Backslash becomes `\\`, then tab, CR and LF become `\t`, `\r`, `\n`.
/// A single left-to-right pass is equivalent to replacing the backslash
/// first, so escapes never double up.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\t', '\r', '\n']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape`]. Unknown escape pairs and a trailing lone
/// backslash pass through unchanged.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cell(row: u32, col: u32, value: &str, bold: bool) -> NormalizedCell {
        NormalizedCell {
            row,
            col,
            value: value.to_string(),
            is_formula: false,
            bold,
            font_name: "Calibri".into(),
            font_size: Some(11.0),
            font_color: String::new(),
            fill_color: String::new(),
        }
    }

    fn people() -> OutputDocument {
        OutputDocument {
            sheets: vec![SheetCells {
                name: "Sheet1".into(),
                cells: vec![
                    cell(1, 1, "Name", true),
                    cell(1, 2, "Age", false),
                    cell(2, 1, "Amy", false),
                    cell(2, 2, "30", false),
                ],
            }],
        }
    }

    #[test]
    fn format_parse_falls_back_to_json() {
        assert_eq!(OutputFormat::parse("t"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("TEXT"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("j"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse(""), OutputFormat::Json);
    }

    #[test]
    fn json_document_keeps_sheet_order() {
        let doc = OutputDocument {
            sheets: vec![
                SheetCells {
                    name: "Zeta".into(),
                    cells: vec![],
                },
                SheetCells {
                    name: "Alpha".into(),
                    cells: vec![cell(1, 1, "x", false)],
                },
            ],
        };
        assert_eq!(
            doc.to_json(FieldSet::VALUE).unwrap(),
            r#"{"Zeta":{"cells":[]},"Alpha":{"cells":[{"row":1,"col":1,"value":"x"}]}}"#
        );
    }

    #[test]
    fn json_end_to_end_shape() {
        assert_eq!(
            people().encode(OutputFormat::Json, FieldSet::parse("vb")).unwrap(),
            concat!(
                r#"{"Sheet1":{"cells":["#,
                r#"{"row":1,"col":1,"value":"Name","bold":true},"#,
                r#"{"row":1,"col":2,"value":"Age","bold":false},"#,
                r#"{"row":2,"col":1,"value":"Amy","bold":false},"#,
                r#"{"row":2,"col":2,"value":"30","bold":false}]}}"#
            )
        );
    }

    #[test]
    fn text_end_to_end_shape() {
        assert_eq!(
            people().encode(OutputFormat::Text, FieldSet::parse("vb")).unwrap(),
            ">Sheet1\nc\t1\t1\tName\t1\nc\t1\t2\tAge\t0\nc\t2\t1\tAmy\t0\nc\t2\t2\t30\t0"
        );
    }

    #[test]
    fn text_without_fields_is_bare_coordinates() {
        assert_eq!(
            people().to_text(FieldSet::empty()),
            ">Sheet1\nc\t1\t1\nc\t1\t2\nc\t2\t1\nc\t2\t2"
        );
    }

    #[test]
    fn text_escapes_sheet_names_and_values() {
        let doc = OutputDocument {
            sheets: vec![SheetCells {
                name: "a\tb".into(),
                cells: vec![cell(1, 1, "line1\nline2\\x", false)],
            }],
        };
        assert_eq!(
            doc.to_text(FieldSet::VALUE),
            ">a\\tb\nc\t1\t1\tline1\\nline2\\\\x"
        );
    }

    #[test]
    fn empty_document_encodes_empty() {
        let doc = OutputDocument::default();
        assert_eq!(doc.to_json(FieldSet::all()).unwrap(), "{}");
        assert_eq!(doc.to_text(FieldSet::all()), "");
    }

    #[test]
    fn escape_examples() {
        assert_eq!(escape(""), "");
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
        assert_eq!(escape("a\\tb"), "a\\\\tb");
        assert_eq!(escape("\t\r\n\\"), "\\t\\r\\n\\\\");
        assert_eq!(unescape("\\q and \\"), "\\q and \\");
    }

    proptest! {
        #[test]
        fn escape_leaves_no_control_chars_and_round_trips(s in "[a-z\\\\\t\r\n ]{0,24}") {
            let escaped = escape(&s);
            prop_assert!(!escaped.contains(['\t', '\r', '\n']));
            prop_assert_eq!(unescape(&escaped), s);
        }

        #[test]
        fn escape_round_trips_any_text(s in any::<String>()) {
            prop_assert_eq!(unescape(&escape(&s)), s);
        }
    }
}
