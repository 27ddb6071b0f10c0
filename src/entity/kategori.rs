use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kategori")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub nama_kategori: String,

    #[sea_orm(has_many)]
    pub kelas: HasMany<super::kelas::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
