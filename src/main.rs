use tracing::{Level, info};

use videobelajar_server::config::AppConfig;
use videobelajar_server::state::AppState;
use videobelajar_server::{build_router, database, error, mailer, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    error::set_verbose_errors(config.server.verbose_errors);

    let db = database::init_db(&config.database.url).await?;
    seed::seed_kategori(&db).await?;
    seed::ensure_indexes(&db).await?;

    let mailer = mailer::from_config(&config.mail)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config, mailer };
    let app = build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
