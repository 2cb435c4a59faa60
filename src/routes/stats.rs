use actix_web::{get, web, HttpResponse};
use chrono::Local;

use crate::middleware::AuthUser;
use crate::services::stats_service::StatsService;
use crate::state::AppState;

/// GET /stats/overview - Chiffres du tableau de bord
#[get("/overview")]
pub async fn overview(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    let today = Local::now().date_naive();

    HttpResponse::Ok().json(StatsService::overview(&store, today))
}

/// GET /stats/sectors - Répartition par secteur
#[get("/sectors")]
pub async fn sectors(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(StatsService::sectors(&store))
}

/// GET /stats/contract-tiers - Contrats par niveau
#[get("/contract-tiers")]
pub async fn contract_tiers(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(StatsService::contract_tiers(&store))
}

pub fn stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stats")
            .service(overview)
            .service(sectors)
            .service(contract_tiers)
    );
}
