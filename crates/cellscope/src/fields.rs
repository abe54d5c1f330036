//! Field projection shared by both encoders.
//!
//! Both encodings emit fields in the canonical order of [`Field::CANONICAL`]
//! (after `row` and `col`), so a JSON object and its text line always list
//! the same attributes in the same sequence.

use crate::cell::NormalizedCell;
use crate::encode::escape;
use bitflags::bitflags;
use serde::ser::{Serialize, SerializeMap, Serializer};

bitflags! {
    /// Requested output attributes, parsed from letters `v b f n z c g`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u8 {
        const VALUE = 1 << 0;
        const FORMULA = 1 << 1;
        const BOLD = 1 << 2;
        const FONT_NAME = 1 << 3;
        const FONT_SIZE = 1 << 4;
        const FONT_COLOR = 1 << 5;
        const FILL_COLOR = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Value,
    Formula,
    Bold,
    FontName,
    FontSize,
    FontColor,
    FillColor,
}

impl Field {
    /// Emission order for both encodings.
    pub const CANONICAL: [Field; 7] = [
        Field::Value,
        Field::Formula,
        Field::Bold,
        Field::FontName,
        Field::FontSize,
        Field::FontColor,
        Field::FillColor,
    ];

    pub fn from_tag(tag: char) -> Option<Field> {
        match tag.to_ascii_lowercase() {
            'v' => Some(Field::Value),
            'f' => Some(Field::Formula),
            'b' => Some(Field::Bold),
            'n' => Some(Field::FontName),
            'z' => Some(Field::FontSize),
            'c' => Some(Field::FontColor),
            'g' => Some(Field::FillColor),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Field::Value => 'v',
            Field::Formula => 'f',
            Field::Bold => 'b',
            Field::FontName => 'n',
            Field::FontSize => 'z',
            Field::FontColor => 'c',
            Field::FillColor => 'g',
        }
    }

    /// Key used in the JSON encoding.
    pub fn key(self) -> &'static str {
        match self {
            Field::Value => "value",
            Field::Formula => "formula",
            Field::Bold => "bold",
            Field::FontName => "font_name",
            Field::FontSize => "font_size",
            Field::FontColor => "font_color",
            Field::FillColor => "fill_color",
        }
    }

    pub fn flag(self) -> FieldSet {
        match self {
            Field::Value => FieldSet::VALUE,
            Field::Formula => FieldSet::FORMULA,
            Field::Bold => FieldSet::BOLD,
            Field::FontName => FieldSet::FONT_NAME,
            Field::FontSize => FieldSet::FONT_SIZE,
            Field::FontColor => FieldSet::FONT_COLOR,
            Field::FillColor => FieldSet::FILL_COLOR,
        }
    }
}

impl FieldSet {
    /// Membership parse: order-independent, case-insensitive; repeated and
    /// unknown letters are ignored.
    pub fn parse(letters: &str) -> Self {
        letters
            .chars()
            .filter_map(Field::from_tag)
            .fold(FieldSet::empty(), |acc, f| acc | f.flag())
    }

    pub fn has(self, field: Field) -> bool {
        self.contains(field.flag())
    }

    /// Selected fields in canonical order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::CANONICAL.into_iter().filter(move |f| self.has(*f))
    }
}

/// A cell viewed through a [`FieldSet`]; serializes to the JSON cell object.
#[derive(Clone, Copy, Debug)]
pub struct ProjectedCell<'a> {
    pub cell: &'a NormalizedCell,
    pub fields: FieldSet,
}

impl Serialize for ProjectedCell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cell = self.cell;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("row", &cell.row)?;
        map.serialize_entry("col", &cell.col)?;
        for field in self.fields.fields() {
            match field {
                Field::Value => map.serialize_entry(field.key(), &cell.value)?,
                // Only ever `true`; non-formula cells omit the key
                Field::Formula if cell.is_formula => map.serialize_entry(field.key(), &true)?,
                Field::Formula => {}
                Field::Bold => map.serialize_entry(field.key(), &cell.bold)?,
                Field::FontName => map.serialize_entry(field.key(), &cell.font_name)?,
                Field::FontSize => map.serialize_entry(field.key(), &cell.font_size)?,
                Field::FontColor => map.serialize_entry(field.key(), &cell.font_color)?,
                Field::FillColor => map.serialize_entry(field.key(), &cell.fill_color)?,
            }
        }
        map.end()
    }
}

fn flag(b: bool) -> String {
    String::from(if b { "1" } else { "0" })
}

/// Same digits as the JSON number (`11.0`); non-finite sizes are null there
/// and empty here.
fn font_size_token(size: Option<f64>) -> String {
    size.and_then(serde_json::Number::from_f64)
        .map(|n| n.to_string())
        .unwrap_or_default()
}

/// Text tokens after `c, row, col`, in canonical order, already escaped.
pub fn text_tokens(cell: &NormalizedCell, fields: FieldSet) -> Vec<String> {
    fields
        .fields()
        .map(|field| match field {
            Field::Value => escape(&cell.value).into_owned(),
            Field::Formula => flag(cell.is_formula),
            Field::Bold => flag(cell.bold),
            Field::FontName => escape(&cell.font_name).into_owned(),
            Field::FontSize => font_size_token(cell.font_size),
            Field::FontColor => escape(&cell.font_color).into_owned(),
            Field::FillColor => escape(&cell.fill_color).into_owned(),
        })
        .collect()
}
