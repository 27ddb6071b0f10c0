//! In-memory catalog view.
//!
//! The course cards shown in the catalog carry display-formatted values, and
//! the UI re-filters and re-sorts them locally without another round-trip.
//! The predicates here are compiled from the same [`FilterSet`] the SQL path
//! uses, so both sides honor one filter definition.

pub mod debounce;
pub mod parse;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterSet, SortField, SortOrder};

/// A course as rendered on a catalog card. Numeric fields are already
/// formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCard {
    pub id: i32,
    pub judul: String,
    pub deskripsi: String,
    /// Display price, e.g. `Rp 300K`.
    pub harga: String,
    /// Composite rating, e.g. `4.2 (124)`. Empty when unrated.
    pub rating: String,
    /// Display duration, e.g. `6 jam`.
    pub durasi: String,
    pub level: String,
    pub kategori_id: Option<i32>,
    pub nama_kategori: Option<String>,
    pub nama_tutor: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Whether a card passes every clause of the filter set.
///
/// Unparseable display values fail the clause that needs them: a card whose
/// price cannot be read is excluded by a price filter, not let through.
pub fn matches(card: &CourseCard, filter: &FilterSet) -> bool {
    if !filter.categories.is_empty() {
        match card.kategori_id {
            Some(id) if filter.categories.contains(&id) => {}
            _ => return false,
        }
    }

    if let Some(ref term) = filter.search {
        let term = term.to_lowercase();
        let hit = card.judul.to_lowercase().contains(&term)
            || card.deskripsi.to_lowercase().contains(&term)
            || card
                .nama_tutor
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }

    if let Some(ref level) = filter.level
        && !card.level.eq_ignore_ascii_case(level)
    {
        return false;
    }

    if let Some(ref instructor) = filter.instructor {
        let wanted = instructor.to_lowercase();
        let hit = card
            .nama_tutor
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&wanted));
        if !hit {
            return false;
        }
    }

    if filter.min_price.is_some() || filter.max_price.is_some() {
        let Some(price) = parse::parse_price(&card.harga) else {
            return false;
        };
        if filter.min_price.is_some_and(|min| price < min)
            || filter.max_price.is_some_and(|max| price > max)
        {
            return false;
        }
    }

    if let Some(min) = filter.min_rating {
        match parse::parse_rating(&card.rating) {
            Some(rating) if rating >= min => {}
            _ => return false,
        }
    }

    if let Some(bucket) = filter.duration {
        match parse::parse_duration(&card.durasi) {
            Some(hours) if bucket.contains(hours) => {}
            _ => return false,
        }
    }

    true
}

/// Comparator for the catalog's sort menu, built from the shared sort fields.
///
/// Title comparison is case-insensitive. Unrated cards sort after rated ones
/// regardless of direction.
pub fn compare(a: &CourseCard, b: &CourseCard, field: SortField, order: SortOrder) -> Ordering {
    let ord = match field {
        SortField::Judul => a.judul.to_lowercase().cmp(&b.judul.to_lowercase()),
        SortField::Harga => cmp_parsed(parse::parse_price(&a.harga), parse::parse_price(&b.harga)),
        SortField::Rating => {
            return match order {
                SortOrder::Asc => cmp_opt_f64(
                    parse::parse_rating(&a.rating),
                    parse::parse_rating(&b.rating),
                ),
                SortOrder::Desc => cmp_opt_f64(
                    parse::parse_rating(&b.rating),
                    parse::parse_rating(&a.rating),
                ),
            };
        }
        SortField::Durasi => cmp_parsed(
            parse::parse_duration(&a.durasi),
            parse::parse_duration(&b.durasi),
        ),
        SortField::CreatedAt | SortField::UpdatedAt => a.created_at.cmp(&b.created_at),
    };

    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

fn cmp_parsed(a: Option<f64>, b: Option<f64>) -> Ordering {
    cmp_opt_f64(a, b)
}

fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The filtered and sorted slice of the catalog currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub cards: Vec<CourseCard>,
    pub total: usize,
}

impl CatalogView {
    /// Re-derive the view from the full fetched card list. Called on every
    /// filter-state change.
    pub fn derive(all: &[CourseCard], filter: &FilterSet) -> Self {
        let mut cards: Vec<CourseCard> = all
            .iter()
            .filter(|card| matches(card, filter))
            .cloned()
            .collect();
        cards.sort_by(|a, b| compare(a, b, filter.sort_by, filter.sort_order));
        let total = cards.len();
        CatalogView { cards, total }
    }
}
