//! Compiles a [`FilterSet`] into a SeaORM condition and sort column.
//!
//! All filter values are bound parameters. Sort columns are resolved through
//! [`order_column`]'s fixed mapping, so raw `sort_by` input never reaches the
//! ORDER BY clause.

use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Order};
use sea_orm::sea_query::ExprTrait;

use super::{DurationBucket, FilterSet, SortField, SortOrder};
use crate::entity::{kelas, tutor};

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case-insensitive substring match on a column.
fn contains(col: Expr, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(col))
        .like(LikeExpr::new(format!("%{}%", escape_like(term).to_lowercase())).escape('\\'))
}

/// Build the WHERE condition for a filter set. Used both for the count query
/// and the page fetch, which must stay on identical predicates.
pub fn to_condition(filter: &FilterSet) -> Condition {
    let mut cond = Condition::all();

    if !filter.categories.is_empty() {
        cond = cond.add(kelas::Column::KategoriId.is_in(filter.categories.iter().copied()));
    }

    if let Some(ref search) = filter.search {
        cond = cond.add(
            Condition::any()
                .add(contains(Expr::col(kelas::Column::Judul), search))
                .add(contains(Expr::col(kelas::Column::Deskripsi), search))
                .add(contains(
                    Expr::col((tutor::Entity, tutor::Column::NamaTutor)),
                    search,
                )),
        );
    }

    if let Some(ref level) = filter.level {
        cond = cond.add(kelas::Column::Level.eq(level.to_lowercase()));
    }

    if let Some(ref instructor) = filter.instructor {
        cond = cond.add(contains(
            Expr::col((tutor::Entity, tutor::Column::NamaTutor)),
            instructor,
        ));
    }

    if let Some(min) = filter.min_price {
        cond = cond.add(kelas::Column::Harga.gte(min));
    }
    if let Some(max) = filter.max_price {
        cond = cond.add(kelas::Column::Harga.lte(max));
    }

    if let Some(min) = filter.min_rating {
        cond = cond.add(kelas::Column::Rating.gte(min));
    }

    if let Some(bucket) = filter.duration {
        cond = cond.add(match bucket {
            DurationBucket::Short => kelas::Column::Durasi.lt(4.0),
            DurationBucket::Medium => kelas::Column::Durasi.between(4.0, 8.0),
            DurationBucket::Long => kelas::Column::Durasi.gt(8.0),
        });
    }

    cond
}

/// Map a validated sort field to its column.
pub fn order_column(field: SortField) -> kelas::Column {
    match field {
        SortField::CreatedAt => kelas::Column::CreatedAt,
        SortField::UpdatedAt => kelas::Column::UpdatedAt,
        SortField::Judul => kelas::Column::Judul,
        SortField::Harga => kelas::Column::Harga,
        SortField::Rating => kelas::Column::Rating,
        SortField::Durasi => kelas::Column::Durasi,
    }
}

pub fn order_direction(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}
