//! Spreadsheet-friendly CSV export.
//!
//! Every data field is quoted with embedded quotes doubled; the header row is
//! written bare. Files start with a UTF-8 byte-order mark so spreadsheet
//! applications detect the encoding of Korean text.

use std::io::{self, Write};

use barscan_core::PlaceRecord;
use chrono::NaiveDate;

pub const CSV_HEADERS: [&str; 10] = [
    "index",
    "name",
    "category",
    "legacy address",
    "road address",
    "phone",
    "longitude",
    "latitude",
    "url",
    "distance",
];

pub const UTF8_BOM: &str = "\u{FEFF}";

/// Export rows in fixed column order with a 1-based index column.
#[must_use]
pub fn csv_rows<'a, I>(records: I) -> Vec<[String; 10]>
where
    I: IntoIterator<Item = &'a PlaceRecord>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                r.name.clone(),
                r.category_path.clone(),
                r.address_legacy.clone(),
                r.address_road.clone(),
                r.phone.clone(),
                r.longitude.clone(),
                r.latitude.clone(),
                r.detail_url.clone(),
                r.distance_meters.clone(),
            ]
        })
        .collect()
}

/// Wraps `field` in double quotes, doubling any embedded quote.
#[must_use]
pub fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Header plus quoted rows, joined by `\n`, without the byte-order mark.
#[must_use]
pub fn render_csv(rows: &[[String; 10]]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(rows.iter().map(|row| {
        row.iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

/// Writes the byte-order mark followed by [`render_csv`] output.
///
/// # Errors
///
/// Propagates any I/O error from `writer`.
pub fn write_csv<W: Write>(mut writer: W, rows: &[[String; 10]]) -> io::Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;
    writer.write_all(render_csv(rows).as_bytes())?;
    writer.flush()
}

/// `bar_search_results_<YYYY-MM-DD>.csv`
#[must_use]
pub fn default_file_name(date: NaiveDate) -> String {
    format!("bar_search_results_{}.csv", date.format("%Y-%m-%d"))
}
