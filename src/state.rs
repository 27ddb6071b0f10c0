use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, mailer::Mailer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub mailer: Arc<dyn Mailer>,
}
