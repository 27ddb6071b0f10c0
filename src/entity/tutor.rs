use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tutor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nama_tutor: String,
    pub bio: Option<String>,
    /// Avatar image reference (path or URL).
    pub avatar: Option<String>,

    #[sea_orm(has_many)]
    pub kelas: HasMany<super::kelas::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
