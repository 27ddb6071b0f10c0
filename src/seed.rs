use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::{kategori, kelas};

/// Default course categories seeded on startup.
const DEFAULT_KATEGORI: &[&str] = &["Pemasaran", "Desain", "Pengembangan Diri", "Bisnis"];

/// Seed the `kategori` table with the default categories.
pub async fn seed_kategori(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &nama in DEFAULT_KATEGORI {
        let model = kategori::ActiveModel {
            nama_kategori: Set(nama.to_string()),
            ..Default::default()
        };

        let result = kategori::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(kategori::Column::NamaKategori)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new categories", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the catalog listing:
    // SELECT ... FROM kelas WHERE kategori_id IN (...) ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_kelas_kategori_created")
        .table(kelas::Entity)
        .col(kelas::Column::KategoriId)
        .col(kelas::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_kelas_kategori_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_kelas_kategori_created: {}", e);
        }
    }

    Ok(())
}
