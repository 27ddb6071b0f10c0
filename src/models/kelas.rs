use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::filter::{FilterSet, SortField, SortOrder};

pub use super::shared::Pagination;
use super::shared::double_option;

pub const LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
pub const DEFAULT_LEVEL: &str = "beginner";

/// Request body for course creation.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateKelasRequest {
    /// Course title, unique across the catalog.
    #[schema(example = "UI/UX Design untuk Pemula")]
    pub judul: String,
    /// Course description.
    #[schema(example = "Belajar desain antarmuka dari nol bersama praktisi.")]
    pub deskripsi: String,
    /// Price in rupiah, must be > 0.
    #[schema(example = 250000.0)]
    pub harga: f64,
    /// Duration in hours.
    #[schema(example = 6.5)]
    pub durasi: f64,
    /// Average rating in [0, 5].
    pub rating: Option<f64>,
    /// One of: beginner, intermediate, advanced. Defaults to beginner.
    #[schema(example = "beginner")]
    pub level: Option<String>,
    pub kategori_id: i32,
    pub tutor_id: i32,
}

fn validate_judul(judul: &str) -> Result<(), AppError> {
    let judul = judul.trim();
    if judul.is_empty() || judul.chars().count() > 256 {
        return Err(AppError::Validation("Judul must be 1-256 characters".into()));
    }
    Ok(())
}

fn validate_harga(harga: f64) -> Result<(), AppError> {
    if !harga.is_finite() || harga <= 0.0 {
        return Err(AppError::Validation(
            "Harga must be a positive number".into(),
        ));
    }
    Ok(())
}

fn validate_durasi(durasi: f64) -> Result<(), AppError> {
    if !durasi.is_finite() || durasi <= 0.0 {
        return Err(AppError::Validation(
            "Durasi must be a positive number of hours".into(),
        ));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), AppError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(AppError::Validation(
            "Rating must be between 0 and 5".into(),
        ));
    }
    Ok(())
}

fn validate_level(level: &str) -> Result<(), AppError> {
    if !LEVELS.contains(&level) {
        return Err(AppError::Validation(
            "Level must be one of: beginner, intermediate, advanced".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_kelas(payload: &CreateKelasRequest) -> Result<(), AppError> {
    validate_judul(&payload.judul)?;
    if payload.deskripsi.trim().is_empty() {
        return Err(AppError::Validation("Deskripsi must not be empty".into()));
    }
    validate_harga(payload.harga)?;
    validate_durasi(payload.durasi)?;
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }
    if let Some(ref level) = payload.level {
        validate_level(&level.to_lowercase())?;
    }
    if payload.kategori_id < 1 {
        return Err(AppError::Validation("kategori_id must be a valid id".into()));
    }
    if payload.tutor_id < 1 {
        return Err(AppError::Validation("tutor_id must be a valid id".into()));
    }
    Ok(())
}

/// Request body for course updates (PUT and PATCH). Only supplied fields are
/// validated and written.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateKelasRequest {
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub harga: Option<f64>,
    pub durasi: Option<f64>,
    /// Pass `null` to clear the rating.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    pub level: Option<String>,
    pub kategori_id: Option<i32>,
    pub tutor_id: Option<i32>,
}

pub fn validate_update_kelas(payload: &UpdateKelasRequest) -> Result<(), AppError> {
    if *payload == UpdateKelasRequest::default() {
        return Err(AppError::Validation("No fields to update".into()));
    }
    if let Some(ref judul) = payload.judul {
        validate_judul(judul)?;
    }
    if let Some(ref deskripsi) = payload.deskripsi
        && deskripsi.trim().is_empty()
    {
        return Err(AppError::Validation("Deskripsi must not be empty".into()));
    }
    if let Some(harga) = payload.harga {
        validate_harga(harga)?;
    }
    if let Some(durasi) = payload.durasi {
        validate_durasi(durasi)?;
    }
    if let Some(Some(rating)) = payload.rating {
        validate_rating(rating)?;
    }
    if let Some(ref level) = payload.level {
        validate_level(&level.to_lowercase())?;
    }
    if payload.kategori_id.is_some_and(|id| id < 1) {
        return Err(AppError::Validation("kategori_id must be a valid id".into()));
    }
    if payload.tutor_id.is_some_and(|id| id < 1) {
        return Err(AppError::Validation("tutor_id must be a valid id".into()));
    }
    Ok(())
}

/// A course joined with its category and instructor. Joins are left-outer,
/// so a dangling reference yields null fields instead of an error.
#[derive(Debug, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct KelasJoined {
    pub id: i32,
    pub judul: String,
    pub deskripsi: String,
    pub harga: f64,
    pub durasi: f64,
    pub rating: Option<f64>,
    pub level: String,
    pub kategori_id: i32,
    pub tutor_id: i32,
    pub nama_kategori: Option<String>,
    pub nama_tutor: Option<String>,
    pub tutor_bio: Option<String>,
    pub tutor_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The filter block echoed back on list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FiltersBlock {
    /// The normalized filters actually applied to this request.
    #[schema(value_type = Object)]
    pub applied: FilterSet,
    #[schema(value_type = Vec<String>)]
    pub available_sorts: &'static [&'static str],
    #[schema(value_type = Vec<String>)]
    pub available_orders: &'static [&'static str],
}

impl From<&FilterSet> for FiltersBlock {
    fn from(filter: &FilterSet) -> Self {
        FiltersBlock {
            applied: filter.clone(),
            available_sorts: SortField::ALL,
            available_orders: SortOrder::ALL,
        }
    }
}

/// Unified list response. Every listing request returns this shape, including
/// single-parameter queries.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListKelasResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<KelasJoined>,
    pub pagination: Pagination,
    pub filters: FiltersBlock,
}

/// A single course, as returned by create/update.
#[derive(Serialize, utoipa::ToSchema)]
pub struct KelasResponse {
    pub id: i32,
    pub judul: String,
    pub deskripsi: String,
    pub harga: f64,
    pub durasi: f64,
    pub rating: Option<f64>,
    pub level: String,
    pub kategori_id: i32,
    pub tutor_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::kelas::Model> for KelasResponse {
    fn from(model: crate::entity::kelas::Model) -> Self {
        KelasResponse {
            id: model.id,
            judul: model.judul,
            deskripsi: model.deskripsi,
            harga: model.harga,
            durasi: model.durasi,
            rating: model.rating,
            level: model.level,
            kategori_id: model.kategori_id,
            tutor_id: model.tutor_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct KelasMutationResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Kelas created")]
    pub message: String,
    pub data: KelasResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct KelasDetailResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: KelasJoined,
}

/// Delete returns the removed record so callers can show what was deleted.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteKelasResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Deleted: UI/UX Design untuk Pemula")]
    pub message: String,
    pub data: KelasJoined,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct KategoriOption {
    pub id: i32,
    pub nama_kategori: String,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct TutorOption {
    pub id: i32,
    pub nama_tutor: String,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Distinct values and observed ranges for populating filter controls.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FilterOptions {
    pub categories: Vec<KategoriOption>,
    #[schema(value_type = Vec<String>)]
    pub levels: &'static [&'static str],
    pub instructors: Vec<TutorOption>,
    pub price: NumericRange,
    pub rating: NumericRange,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FilterOptionsResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: FilterOptions,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct CategoryCount {
    pub kategori_id: i32,
    pub nama_kategori: Option<String>,
    pub count: i64,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct LevelCount {
    pub level: String,
    pub count: i64,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct PriceStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

/// Catalog aggregates for the stats endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct KelasStats {
    pub total_kelas: u64,
    pub by_category: Vec<CategoryCount>,
    pub by_level: Vec<LevelCount>,
    pub avg_rating: Option<f64>,
    pub price: PriceStats,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct KelasStatsResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: KelasStats,
}
