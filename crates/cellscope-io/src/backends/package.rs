#![cfg(feature = "umya")]

//! Workbook-wide settings read straight from the OOXML package: the
//! stylesheet's default font (`fonts[0]`, applied to cells saved without a
//! style index) and the `date1904` epoch flag.

use crate::traits::FontStyle;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Zip(#[from] ZipError),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Attr(#[from] quick_xml::events::attributes::AttrError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WorkbookDefaults {
    pub font: Option<FontStyle>,
    pub date1904: bool,
}

impl WorkbookDefaults {
    pub(crate) fn read(path: &Path) -> Result<Self, PackageError> {
        let mut zip = zip::ZipArchive::new(BufReader::new(File::open(path)?))?;
        let font = match zip.by_name("xl/styles.xml") {
            Ok(part) => first_font(BufReader::new(part))?,
            Err(ZipError::FileNotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let date1904 = match zip.by_name("xl/workbook.xml") {
            Ok(part) => uses_1904(BufReader::new(part))?,
            Err(ZipError::FileNotFound) => false,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { font, date1904 })
    }
}

fn attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, PackageError> {
    Ok(match e.try_get_attribute(name)? {
        Some(a) => Some(a.unescape_value()?.into_owned()),
        None => None,
    })
}

fn apply_font_child(font: &mut FontStyle, e: &BytesStart<'_>) -> Result<(), PackageError> {
    match e.local_name().as_ref() {
        // <b/> means bold; <b val="0"/> turns it off
        b"b" => font.bold = !matches!(attr(e, b"val")?.as_deref(), Some("0" | "false")),
        b"sz" => font.size = attr(e, b"val")?.and_then(|v| v.parse().ok()),
        b"name" => font.name = attr(e, b"val")?.unwrap_or_default(),
        b"color" => font.color = attr(e, b"rgb")?.filter(|c| !c.is_empty()),
        _ => {}
    }
    Ok(())
}

/// The first `<font>` inside `<fonts>`, or `None` when the list is empty.
fn first_font<R: BufRead>(source: R) -> Result<Option<FontStyle>, PackageError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut in_fonts = false;
    let mut font: Option<FontStyle> = None;
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"fonts" => in_fonts = true,
                b"font" if in_fonts => font = Some(FontStyle::default()),
                _ => {
                    if let Some(f) = font.as_mut() {
                        apply_font_child(f, &e)?;
                    }
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"font" if in_fonts => return Ok(Some(FontStyle::default())),
                _ => {
                    if let Some(f) = font.as_mut() {
                        apply_font_child(f, &e)?;
                    }
                }
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"font" if font.is_some() => return Ok(font),
                b"fonts" => return Ok(None),
                _ => {}
            },
            Event::Eof => return Ok(font),
            _ => {}
        }
    }
}

fn uses_1904<R: BufRead>(source: R) -> Result<bool, PackageError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"workbookPr" => {
                return Ok(matches!(
                    attr(&e, b"date1904")?.as_deref(),
                    Some("1" | "true")
                ));
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}
