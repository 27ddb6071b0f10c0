use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/kelas", kelas_routes())
        .nest("/auth", auth_routes())
}

fn kelas_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::kelas::list_kelas,
            handlers::kelas::create_kelas
        ))
        .routes(routes!(handlers::kelas::filter_options))
        .routes(routes!(handlers::kelas::kelas_stats))
        .routes(routes!(
            handlers::kelas::get_kelas,
            handlers::kelas::update_kelas,
            handlers::kelas::delete_kelas
        ))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::verify_email))
        .routes(routes!(
            handlers::auth::profile,
            handlers::auth::update_profile
        ))
        .routes(routes!(handlers::auth::logout))
}
