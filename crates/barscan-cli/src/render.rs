//! Plain-text results table.
//!
//! Columns are padded by display width, so Hangul (two cells per character)
//! lines up with ASCII. Over-wide values are truncated with `…`.

use std::fmt::Write as _;

use barscan_core::PlaceRecord;
use console::{pad_str, Alignment};

const NAME_WIDTH: usize = 28;
const CATEGORY_WIDTH: usize = 30;
const PHONE_WIDTH: usize = 14;
const DISTANCE_WIDTH: usize = 8;

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn cell(value: &str, width: usize, align: Alignment) -> String {
    pad_str(or_dash(value), width, align, Some("…")).into_owned()
}

/// The road address, or the legacy address when the place has none.
fn display_address(place: &PlaceRecord) -> &str {
    if place.address_road.is_empty() {
        &place.address_legacy
    } else {
        &place.address_road
    }
}

/// Formats `view` as a table, numbering rows from 1. Missing values print as
/// `-`. When `limit` is set only the first `limit` rows are shown.
pub(crate) fn format_table(view: &[&PlaceRecord], limit: Option<usize>) -> String {
    let shown = limit.map_or(view.len(), |n| n.min(view.len()));
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>4}  {} {} {} {}  address",
        "#",
        cell("name", NAME_WIDTH, Alignment::Left),
        cell("category", CATEGORY_WIDTH, Alignment::Left),
        cell("phone", PHONE_WIDTH, Alignment::Left),
        cell("dist(m)", DISTANCE_WIDTH, Alignment::Right),
    );

    for (i, place) in view.iter().take(shown).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {} {} {} {}  {}",
            i + 1,
            cell(&place.name, NAME_WIDTH, Alignment::Left),
            cell(&place.category_path, CATEGORY_WIDTH, Alignment::Left),
            cell(&place.phone, PHONE_WIDTH, Alignment::Left),
            cell(&place.distance_meters, DISTANCE_WIDTH, Alignment::Right),
            or_dash(display_address(place)),
        );
    }

    if shown < view.len() {
        let _ = writeln!(out, "  ... {} more", view.len() - shown);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, phone: &str) -> PlaceRecord {
        PlaceRecord {
            id: name.to_owned(),
            name: name.to_owned(),
            category_path: "음식점 > 술집".to_owned(),
            address_legacy: "서울 중구".to_owned(),
            address_road: String::new(),
            phone: phone.to_owned(),
            longitude: String::new(),
            latitude: String::new(),
            detail_url: String::new(),
            distance_meters: "12".to_owned(),
        }
    }

    #[test]
    fn missing_values_render_as_dash() {
        let a = record("Joe's Bar", "");
        let table = format_table(&[&a], None);
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with("   1  Joe's Bar"));
        assert!(row.contains(" - "));
    }

    #[test]
    fn address_column_falls_back_to_legacy_address() {
        let mut a = record("a", "1");
        let legacy_only = format_table(&[&a], None);
        assert!(legacy_only.lines().nth(1).unwrap().ends_with("  서울 중구"));

        a.address_road = "서울 중구 을지로13길 19".to_owned();
        let with_road = format_table(&[&a], None);
        assert!(with_road.lines().nth(1).unwrap().ends_with("  서울 중구 을지로13길 19"));

        a.address_road.clear();
        a.address_legacy.clear();
        let neither = format_table(&[&a], None);
        assert!(neither.lines().nth(1).unwrap().ends_with("  -"));
    }

    #[test]
    fn hangul_names_align_with_ascii_names() {
        let ascii = record("Joe's Bar", "1");
        let hangul = record("을지로 노가리골목", "2");
        let table = format_table(&[&ascii, &hangul], None);

        let category_offset = |line: &str| {
            let byte = line.find(" > 술집").unwrap();
            console::measure_text_width(&line[..byte])
        };
        let rows: Vec<&str> = table.lines().skip(1).collect();
        assert_eq!(category_offset(rows[0]), category_offset(rows[1]));
    }

    #[test]
    fn over_wide_values_are_truncated() {
        let long = record(&"가".repeat(40), "1");
        let table = format_table(&[&long], None);
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains('…'));
        assert!(!row.contains(&"가".repeat(20)));
    }

    #[test]
    fn limit_truncates_and_reports_remainder() {
        let a = record("a", "1");
        let b = record("b", "2");
        let c = record("c", "3");
        let table = format_table(&[&a, &b, &c], Some(1));
        assert_eq!(table.lines().count(), 3);
        assert!(table.ends_with("  ... 2 more\n"));
    }
}
