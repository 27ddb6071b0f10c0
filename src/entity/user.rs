use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// One of: male, female
    pub gender: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    /// Argon2 password hash.
    pub password: String,

    /// Pending email-verification token. NULL once verified.
    pub verifikasi_token: Option<String>,
    pub email_verified: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
