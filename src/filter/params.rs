use serde::Deserialize;
use utoipa::IntoParams;

use super::{DEFAULT_LIMIT, DurationBucket, FilterSet, MAX_LIMIT, SortField, SortOrder};

/// Raw query parameters for `GET /api/kelas`.
///
/// Everything is an optional string so a malformed value never rejects the
/// request; normalization drops what it cannot parse. Camel-cased aliases are
/// accepted for compatibility with older clients.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KelasListQuery {
    /// Category id, or a comma-separated list of ids.
    pub category: Option<String>,
    /// Free-text search over title, description and instructor name.
    pub search: Option<String>,
    /// Course level: beginner, intermediate or advanced.
    pub level: Option<String>,
    /// Instructor name, substring match.
    pub instructor: Option<String>,
    /// Minimum price, inclusive.
    #[serde(alias = "minPrice")]
    pub min_price: Option<String>,
    /// Maximum price, inclusive.
    #[serde(alias = "maxPrice")]
    pub max_price: Option<String>,
    /// Price bucket token, e.g. `200000-300000`. Ignored when an explicit
    /// min/max price is given.
    #[serde(alias = "priceRange")]
    pub price_range: Option<String>,
    /// Minimum rating, inclusive.
    #[serde(alias = "minRating")]
    pub min_rating: Option<String>,
    /// Duration bucket: `0-4`, `4-8` or `8+` (hours).
    pub duration: Option<String>,
    /// Sort column: created_at, updated_at, judul, harga, rating or durasi.
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    /// Sort direction: ASC or DESC.
    #[serde(alias = "sortOrder")]
    pub sort_order: Option<String>,
    /// Page number, starting at 1.
    pub page: Option<String>,
    /// Page size, 1 to 100.
    pub limit: Option<String>,
}

/// Treat empty and whitespace-only parameters as absent.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_f64(raw: Option<String>) -> Option<f64> {
    non_blank(raw).and_then(|s| s.parse().ok()).filter(|v: &f64| v.is_finite())
}

/// Parse a price bucket token like `200000-300000` into its bounds.
/// `400000-999999` is taken literally as min 400000, max 999999.
fn parse_price_bucket(token: &str) -> Option<(f64, f64)> {
    let (min, max) = token.split_once('-')?;
    Some((min.trim().parse().ok()?, max.trim().parse().ok()?))
}

impl KelasListQuery {
    /// Normalize raw parameters into a [`FilterSet`].
    ///
    /// Unparseable values are dropped rather than rejected, matching the
    /// lenient contract of the listing endpoint. Page falls back to 1,
    /// limit to 10, and limit is clamped to 100.
    pub fn into_filter_set(self) -> FilterSet {
        let categories = non_blank(self.category)
            .map(|raw| {
                raw.split(',')
                    .filter_map(|part| part.trim().parse::<i32>().ok())
                    .collect()
            })
            .unwrap_or_default();

        let mut min_price = parse_f64(self.min_price);
        let mut max_price = parse_f64(self.max_price);
        if min_price.is_none()
            && max_price.is_none()
            && let Some(token) = non_blank(self.price_range)
            && let Some((lo, hi)) = parse_price_bucket(&token)
        {
            min_price = Some(lo);
            max_price = Some(hi);
        }

        let page = non_blank(self.page)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1);
        let limit = non_blank(self.limit)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&l| l >= 1)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        FilterSet {
            categories,
            search: non_blank(self.search),
            level: non_blank(self.level),
            instructor: non_blank(self.instructor),
            min_price,
            max_price,
            min_rating: parse_f64(self.min_rating),
            duration: non_blank(self.duration).and_then(|s| DurationBucket::from_param(&s)),
            sort_by: non_blank(self.sort_by)
                .map(|s| SortField::from_param(&s))
                .unwrap_or(SortField::CreatedAt),
            sort_order: non_blank(self.sort_order)
                .map(|s| SortOrder::from_param(&s))
                .unwrap_or(SortOrder::Desc),
            page,
            limit,
        }
    }
}
