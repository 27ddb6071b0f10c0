use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Func;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{kategori, kelas, tutor};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::filter::params::KelasListQuery;
use crate::filter::sql::{order_column, order_direction, to_condition};
use crate::models::kelas::*;
use crate::state::AppState;

/// Base select for joined course rows. Both the count and the page fetch
/// build on this, so they always share one predicate.
fn joined_select() -> Select<kelas::Entity> {
    kelas::Entity::find()
        .left_join(kategori::Entity)
        .left_join(tutor::Entity)
}

fn joined_columns(select: Select<kelas::Entity>) -> Select<kelas::Entity> {
    select
        .select_only()
        .column(kelas::Column::Id)
        .column(kelas::Column::Judul)
        .column(kelas::Column::Deskripsi)
        .column(kelas::Column::Harga)
        .column(kelas::Column::Durasi)
        .column(kelas::Column::Rating)
        .column(kelas::Column::Level)
        .column(kelas::Column::KategoriId)
        .column(kelas::Column::TutorId)
        .column(kelas::Column::CreatedAt)
        .column(kelas::Column::UpdatedAt)
        .column_as(kategori::Column::NamaKategori, "nama_kategori")
        .column_as(tutor::Column::NamaTutor, "nama_tutor")
        .column_as(tutor::Column::Bio, "tutor_bio")
        .column_as(tutor::Column::Avatar, "tutor_avatar")
}

async fn find_kelas_joined<C: ConnectionTrait>(db: &C, id: i32) -> Result<KelasJoined, AppError> {
    joined_columns(joined_select().filter(kelas::Column::Id.eq(id)))
        .into_model::<KelasJoined>()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Kelas not found".into()))
}

/// Translate constraint violations from a kelas write into API errors.
fn map_kelas_write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A kelas with this judul already exists".into())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            if detail.contains("tutor") {
                AppError::Validation("tutor_id does not reference an existing tutor".into())
            } else {
                AppError::Validation("kategori_id does not reference an existing kategori".into())
            }
        }
        _ => AppError::from(err),
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Kelas",
    operation_id = "listKelas",
    summary = "List courses with filtering, sorting and pagination",
    description = "Returns a page of courses joined with category and instructor. All filter parameters may be combined; every request, including single-parameter ones, returns the same paginated envelope. Unknown sort fields fall back to `created_at`, unknown sort orders to `DESC`.",
    params(KelasListQuery),
    responses(
        (status = 200, description = "Page of courses", body = ListKelasResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_kelas(
    State(state): State<AppState>,
    Query(query): Query<KelasListQuery>,
) -> Result<Json<ListKelasResponse>, AppError> {
    let filter = query.into_filter_set();
    let condition = to_condition(&filter);

    let base = joined_select().filter(condition);

    let total = base.clone().count(&state.db).await?;

    let data = joined_columns(base)
        .order_by(order_column(filter.sort_by), order_direction(filter.sort_order))
        .offset(Some((filter.page - 1) * filter.limit))
        .limit(Some(filter.limit))
        .into_model::<KelasJoined>()
        .all(&state.db)
        .await?;

    Ok(Json(ListKelasResponse {
        success: true,
        data,
        pagination: Pagination::new(filter.page, filter.limit, total),
        filters: (&filter).into(),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Kelas",
    operation_id = "createKelas",
    summary = "Create a new course",
    request_body = CreateKelasRequest,
    responses(
        (status = 201, description = "Kelas created", body = KelasMutationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Duplicate judul (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(judul = %payload.judul))]
pub async fn create_kelas(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateKelasRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_kelas(&payload)?;

    let now = chrono::Utc::now();
    let new_kelas = kelas::ActiveModel {
        judul: Set(payload.judul.trim().to_string()),
        deskripsi: Set(payload.deskripsi),
        harga: Set(payload.harga),
        durasi: Set(payload.durasi),
        rating: Set(payload.rating),
        level: Set(payload
            .level
            .map(|l| l.to_lowercase())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())),
        kategori_id: Set(payload.kategori_id),
        tutor_id: Set(payload.tutor_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_kelas
        .insert(&state.db)
        .await
        .map_err(map_kelas_write_err)?;

    Ok((
        StatusCode::CREATED,
        Json(KelasMutationResponse {
            success: true,
            message: "Kelas created".into(),
            data: model.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Kelas",
    operation_id = "getKelas",
    summary = "Get a course by ID",
    params(("id" = i32, Path, description = "Kelas ID")),
    responses(
        (status = 200, description = "Course details", body = KelasDetailResponse),
        (status = 404, description = "Kelas not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_kelas(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<KelasDetailResponse>, AppError> {
    let data = find_kelas_joined(&state.db, id).await?;
    Ok(Json(KelasDetailResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    method(put, patch),
    path = "/{id}",
    tag = "Kelas",
    operation_id = "updateKelas",
    summary = "Update an existing course",
    description = "Partially updates a course. Only provided fields are modified, and `updated_at` is always refreshed. PUT and PATCH are equivalent.",
    params(("id" = i32, Path, description = "Kelas ID")),
    request_body = UpdateKelasRequest,
    responses(
        (status = 200, description = "Kelas updated", body = KelasMutationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Kelas not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Duplicate judul (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id))]
pub async fn update_kelas(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateKelasRequest>,
) -> Result<Json<KelasMutationResponse>, AppError> {
    validate_update_kelas(&payload)?;

    let txn = state.db.begin().await?;

    let existing = kelas::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Kelas not found".into()))?;
    let mut active: kelas::ActiveModel = existing.into();

    if let Some(ref judul) = payload.judul {
        active.judul = Set(judul.trim().to_string());
    }
    if let Some(deskripsi) = payload.deskripsi {
        active.deskripsi = Set(deskripsi);
    }
    if let Some(harga) = payload.harga {
        active.harga = Set(harga);
    }
    if let Some(durasi) = payload.durasi {
        active.durasi = Set(durasi);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(level) = payload.level {
        active.level = Set(level.to_lowercase());
    }
    if let Some(kategori_id) = payload.kategori_id {
        active.kategori_id = Set(kategori_id);
    }
    if let Some(tutor_id) = payload.tutor_id {
        active.tutor_id = Set(tutor_id);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(map_kelas_write_err)?;
    txn.commit().await?;

    Ok(Json(KelasMutationResponse {
        success: true,
        message: "Kelas updated".into(),
        data: model.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Kelas",
    operation_id = "deleteKelas",
    summary = "Delete a course by ID",
    description = "Deletes a course and returns the removed record, joined with its category and instructor, so callers can show what was deleted.",
    params(("id" = i32, Path, description = "Kelas ID")),
    responses(
        (status = 200, description = "Kelas deleted", body = DeleteKelasResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Kelas not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn delete_kelas(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteKelasResponse>, AppError> {
    let txn = state.db.begin().await?;

    let data = find_kelas_joined(&txn, id).await?;
    let result = kelas::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Kelas not found".into()));
    }

    txn.commit().await?;

    Ok(Json(DeleteKelasResponse {
        success: true,
        message: format!("Deleted: {}", data.judul),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/filters",
    tag = "Kelas",
    operation_id = "kelasFilterOptions",
    summary = "Filter options for the catalog UI",
    description = "Returns the distinct categories, levels and instructors plus the observed price and rating ranges, for populating filter controls.",
    responses(
        (status = 200, description = "Available filter options", body = FilterOptionsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, AppError> {
    let categories = kategori::Entity::find()
        .select_only()
        .column(kategori::Column::Id)
        .column(kategori::Column::NamaKategori)
        .order_by_asc(kategori::Column::NamaKategori)
        .into_model::<KategoriOption>()
        .all(&state.db)
        .await?;

    let instructors = tutor::Entity::find()
        .select_only()
        .column(tutor::Column::Id)
        .column(tutor::Column::NamaTutor)
        .order_by_asc(tutor::Column::NamaTutor)
        .into_model::<TutorOption>()
        .all(&state.db)
        .await?;

    let price = kelas::Entity::find()
        .select_only()
        .column_as(kelas::Column::Harga.min(), "min")
        .column_as(kelas::Column::Harga.max(), "max")
        .into_model::<NumericRange>()
        .one(&state.db)
        .await?
        .unwrap_or(NumericRange {
            min: None,
            max: None,
        });

    let rating = kelas::Entity::find()
        .select_only()
        .column_as(kelas::Column::Rating.min(), "min")
        .column_as(kelas::Column::Rating.max(), "max")
        .into_model::<NumericRange>()
        .one(&state.db)
        .await?
        .unwrap_or(NumericRange {
            min: None,
            max: None,
        });

    Ok(Json(FilterOptionsResponse {
        success: true,
        data: FilterOptions {
            categories,
            levels: LEVELS,
            instructors,
            price,
            rating,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Kelas",
    operation_id = "kelasStats",
    summary = "Catalog aggregates",
    description = "Returns course counts by category and level, the average rating, and price min/max/avg.",
    responses(
        (status = 200, description = "Catalog statistics", body = KelasStatsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn kelas_stats(
    State(state): State<AppState>,
) -> Result<Json<KelasStatsResponse>, AppError> {
    let total_kelas = kelas::Entity::find().count(&state.db).await?;

    let by_category = kelas::Entity::find()
        .left_join(kategori::Entity)
        .select_only()
        .column(kelas::Column::KategoriId)
        .column_as(kategori::Column::NamaKategori, "nama_kategori")
        .column_as(kelas::Column::Id.count(), "count")
        .group_by(kelas::Column::KategoriId)
        .group_by(kategori::Column::NamaKategori)
        .order_by_asc(kelas::Column::KategoriId)
        .into_model::<CategoryCount>()
        .all(&state.db)
        .await?;

    let by_level = kelas::Entity::find()
        .select_only()
        .column(kelas::Column::Level)
        .column_as(kelas::Column::Id.count(), "count")
        .group_by(kelas::Column::Level)
        .order_by_asc(kelas::Column::Level)
        .into_model::<LevelCount>()
        .all(&state.db)
        .await?;

    let price = kelas::Entity::find()
        .select_only()
        .column_as(kelas::Column::Harga.min(), "min")
        .column_as(kelas::Column::Harga.max(), "max")
        .expr_as(Func::avg(Expr::col(kelas::Column::Harga)), "avg")
        .into_model::<PriceStats>()
        .one(&state.db)
        .await?
        .unwrap_or(PriceStats {
            min: None,
            max: None,
            avg: None,
        });

    let avg_rating = kelas::Entity::find()
        .select_only()
        .expr_as(Func::avg(Expr::col(kelas::Column::Rating)), "avg")
        .column_as(kelas::Column::Rating.min(), "min")
        .column_as(kelas::Column::Rating.max(), "max")
        .into_model::<PriceStats>()
        .one(&state.db)
        .await?
        .and_then(|stats| stats.avg);

    Ok(Json(KelasStatsResponse {
        success: true,
        data: KelasStats {
            total_kelas,
            by_category,
            by_level,
            avg_rating,
            price,
        },
    }))
}
