//! Excel serial dates and date number formats.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Whether a number format code displays a date or time.
///
/// Quoted literals, escaped characters and `[...]` sections (colors,
/// locales) are ignored. Elapsed-time formats such as `[h]:mm` are
/// durations, not dates.
pub fn is_date_format(code: &str) -> bool {
    let mut letters = String::new();
    let mut chars = code.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                for c in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                }
            }
            '[' => {
                let section: String = chars.by_ref().take_while(|c| *c != ']').collect();
                let lower = section.to_ascii_lowercase();
                if !lower.is_empty() && lower.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    return false;
                }
            }
            '\\' | '_' | '*' => {
                chars.next();
            }
            c => letters.push(c.to_ascii_lowercase()),
        }
    }
    let letters = letters.replace("general", "");
    letters.contains(['y', 'm', 'd', 'h', 's'])
}

/// Date formats with no day or year part (`h:mm`, `hh:mm:ss AM/PM`).
fn is_time_only(code: &str) -> bool {
    let lower = code.to_ascii_lowercase();
    !lower.contains(['y', 'd'])
}

/// Convert a serial day number to a timestamp.
///
/// The 1900 system counts the non-existent 1900-02-29 as day 60, so serials
/// below it are shifted by one day.
pub fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let (epoch, days) = if is_1904 {
        (NaiveDate::from_ymd_opt(1904, 1, 1)?, serial)
    } else if serial < 60.0 {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, serial + 1.0)
    } else {
        (NaiveDate::from_ymd_opt(1899, 12, 30)?, serial)
    };
    let ms = (days * MS_PER_DAY).round() as i64;
    epoch
        .and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::try_milliseconds(ms)?)
}

/// `2024-01-15 00:00:00`, with microseconds only when non-zero.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

pub fn format_time(t: &NaiveTime) -> String {
    if t.nanosecond() == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        t.format("%H:%M:%S%.6f").to_string()
    }
}

/// Render a serial under `code`; `None` when the value is out of range.
/// Time-only formats on a fraction of a day give just the time of day.
pub fn render_serial(serial: f64, code: &str, is_1904: bool) -> Option<String> {
    let dt = serial_to_datetime(serial, is_1904)?;
    if is_time_only(code) && (0.0..1.0).contains(&serial) {
        Some(format_time(&dt.time()))
    } else {
        Some(format_datetime(&dt))
    }
}

/// Normalize ISO 8601 text (`2024-01-15`, `2024-01-15T08:30:00`) to the
/// same rendering as serial dates. Unparseable text is returned unchanged.
pub fn normalize_iso(text: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return format_datetime(&dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return format_datetime(&d.and_time(NaiveTime::MIN));
    }
    text.to_string()
}
