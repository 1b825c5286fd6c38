//! In-memory result set with filter and sort views.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use barscan_core::{parse_numeric, PlaceRecord};

use crate::export::csv_rows;

/// Sortable result columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Discovery order. Every key compares equal, so sorting is a no-op.
    Index,
    Name,
    Category,
    Address,
    RoadAddress,
    Phone,
    Longitude,
    Latitude,
    Url,
    Distance,
}

impl SortField {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Longitude | Self::Latitude | Self::Distance)
    }

    fn key(self, record: &PlaceRecord) -> &str {
        match self {
            Self::Index => "",
            Self::Name => &record.name,
            Self::Category => &record.category_path,
            Self::Address => &record.address_legacy,
            Self::RoadAddress => &record.address_road,
            Self::Phone => &record.phone,
            Self::Longitude => &record.longitude,
            Self::Latitude => &record.latitude,
            Self::Url => &record.detail_url,
            Self::Distance => &record.distance_meters,
        }
    }

    /// Ascending comparison of two records on this column.
    ///
    /// Numeric columns compare as parsed floats (unparseable as `0`); the rest
    /// compare as lower-cased strings.
    #[must_use]
    pub fn compare(self, a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
        if self == Self::Index {
            return Ordering::Equal;
        }
        let (ka, kb) = (self.key(a), self.key(b));
        if self.is_numeric() {
            parse_numeric(ka)
                .partial_cmp(&parse_numeric(kb))
                .unwrap_or(Ordering::Equal)
        } else {
            ka.to_lowercase().cmp(&kb.to_lowercase())
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Index => "index",
            Self::Name => "name",
            Self::Category => "category",
            Self::Address => "address",
            Self::RoadAddress => "road_address",
            Self::Phone => "phone",
            Self::Longitude => "longitude",
            Self::Latitude => "latitude",
            Self::Url => "url",
            Self::Distance => "distance",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort column \"{0}\"")]
pub struct ParseSortFieldError(pub String);

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(Self::Index),
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "address" => Ok(Self::Address),
            "road_address" | "road-address" => Ok(Self::RoadAddress),
            "phone" => Ok(Self::Phone),
            "x" | "longitude" | "lng" => Ok(Self::Longitude),
            "y" | "latitude" | "lat" => Ok(Self::Latitude),
            "url" => Ok(Self::Url),
            "distance" => Ok(Self::Distance),
            _ => Err(ParseSortFieldError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Stable sort of `records` by `spec`; equal keys keep their relative order
/// in both directions.
pub fn sort_records(records: &mut [&PlaceRecord], spec: SortSpec) {
    match spec.direction {
        SortDirection::Ascending => records.sort_by(|a, b| spec.field.compare(a, b)),
        SortDirection::Descending => records.sort_by(|a, b| spec.field.compare(b, a)),
    }
}

/// Case-insensitive substring match against every field of `record`.
#[must_use]
pub fn matches_term(record: &PlaceRecord, term: &str) -> bool {
    let needle = term.to_lowercase();
    record
        .field_values()
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// The deduplicated records of one search plus the active sort.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<PlaceRecord>,
    sort: Option<SortSpec>,
}

impl ResultStore {
    #[must_use]
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self {
            records,
            sort: None,
        }
    }

    /// Records in discovery order.
    #[must_use]
    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Records matching `term` in discovery order. An empty term matches all.
    #[must_use]
    pub fn filter(&self, term: &str) -> Vec<&PlaceRecord> {
        if term.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| matches_term(r, term))
            .collect()
    }

    /// A sorted view; the stored order is left untouched.
    #[must_use]
    pub fn sorted(&self, field: SortField, direction: SortDirection) -> Vec<&PlaceRecord> {
        let mut view: Vec<&PlaceRecord> = self.records.iter().collect();
        sort_records(&mut view, SortSpec { field, direction });
        view
    }

    /// Makes `field` the active sort column.
    ///
    /// Selecting the active column again flips its direction; a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) -> SortSpec {
        let direction = match self.sort {
            Some(current) if current.field == field => current.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        let spec = SortSpec { field, direction };
        self.sort = Some(spec);
        spec
    }

    /// [`Self::toggle_sort`] followed by [`Self::sorted`] on the new spec.
    pub fn sort_by(&mut self, field: SortField) -> Vec<&PlaceRecord> {
        let spec = self.toggle_sort(field);
        self.sorted(spec.field, spec.direction)
    }

    /// Filtered by `term`, then ordered by the active sort (if any).
    #[must_use]
    pub fn view(&self, term: &str) -> Vec<&PlaceRecord> {
        let mut view = self.filter(term);
        if let Some(spec) = self.sort {
            sort_records(&mut view, spec);
        }
        view
    }

    /// Export rows for every record in discovery order.
    #[must_use]
    pub fn to_csv_rows(&self) -> Vec<[String; 10]> {
        csv_rows(&self.records)
    }
}
