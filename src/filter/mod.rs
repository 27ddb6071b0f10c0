//! Normalized course filters.
//!
//! Every listing request is reduced to a single [`FilterSet`] value, which is
//! then compiled to a SQL condition ([`sql::to_condition`]) for the database
//! path and to an in-memory predicate ([`crate::catalog`]) for the client-side
//! catalog view. Both paths share this one definition, so filter semantics
//! cannot drift between them.

pub mod params;
pub mod sql;

use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Sort columns accepted by the listing endpoint. Anything else falls back
/// to [`SortField::CreatedAt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Judul,
    Harga,
    Rating,
    Durasi,
}

impl SortField {
    /// Parse a raw `sort_by` parameter. Unknown values fall back to
    /// `created_at` rather than erroring, so the raw value never reaches
    /// the ORDER BY clause.
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "created_at" => SortField::CreatedAt,
            "updated_at" => SortField::UpdatedAt,
            "judul" => SortField::Judul,
            "harga" => SortField::Harga,
            "rating" => SortField::Rating,
            "durasi" => SortField::Durasi,
            _ => SortField::CreatedAt,
        }
    }

    pub const ALL: &[&str] = &[
        "created_at",
        "updated_at",
        "judul",
        "harga",
        "rating",
        "durasi",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a raw `sort_order` parameter, case-insensitive. Anything that is
    /// not ASC or DESC falls back to DESC.
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub const ALL: &[&str] = &["ASC", "DESC"];
}

/// Duration buckets offered by the filter UI, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    /// Less than 4 hours.
    Short,
    /// 4 to 8 hours inclusive.
    Medium,
    /// More than 8 hours.
    Long,
}

impl DurationBucket {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "0-4" => Some(DurationBucket::Short),
            "4-8" => Some(DurationBucket::Medium),
            "8+" => Some(DurationBucket::Long),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            DurationBucket::Short => "0-4",
            DurationBucket::Medium => "4-8",
            DurationBucket::Long => "8+",
        }
    }

    pub fn contains(&self, hours: f64) -> bool {
        match self {
            DurationBucket::Short => hours < 4.0,
            DurationBucket::Medium => (4.0..=8.0).contains(&hours),
            DurationBucket::Long => hours > 8.0,
        }
    }
}

impl Serialize for DurationBucket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// The normalized filter set for one listing request.
///
/// Only fields the caller actually specified are populated; the predicate
/// builders skip `None` fields entirely. Serialized into the response's
/// `filters.applied` block so clients can see what was honored.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationBucket>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet {
            categories: Vec::new(),
            search: None,
            level: None,
            instructor: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            duration: None,
            sort_by: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}
