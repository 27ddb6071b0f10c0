use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kelas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Course title. Uniqueness is enforced by the database so concurrent
    /// creates with the same title cannot both succeed.
    #[sea_orm(unique)]
    pub judul: String,
    pub deskripsi: String,
    /// Price in rupiah. Must be > 0.
    pub harga: f64,
    /// Duration in hours.
    pub durasi: f64,
    /// Average rating in [0, 5]. NULL until the course has been rated.
    pub rating: Option<f64>,
    /// One of: beginner, intermediate, advanced
    pub level: String,

    pub kategori_id: i32,
    #[sea_orm(belongs_to, from = "kategori_id", to = "id")]
    pub kategori: HasOne<super::kategori::Entity>,

    pub tutor_id: i32,
    #[sea_orm(belongs_to, from = "tutor_id", to = "id")]
    pub tutor: HasOne<super::tutor::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
