use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::company::Company;
use crate::models::dto::CompanyRequest;
use crate::routes::{fetch_one, insert, remove, replace};
use crate::state::AppState;

#[get("")]
pub async fn list_companies(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Company>())
}

#[get("/{id}")]
pub async fn get_company(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Company>(&state, &path, "Company").await
}

#[post("")]
pub async fn create_company(
    auth_user: AuthUser,
    body: web::Json<CompanyRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    insert(&state, body.into_inner().into_record(String::new())).await
}

#[put("/{id}")]
pub async fn update_company(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<CompanyRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    replace(&state, body.into_inner().into_record(path.into_inner()), "Company").await
}

#[delete("/{id}")]
pub async fn delete_company(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Company>(&state, &path, "Company").await
}

pub fn companies_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/companies")
            .service(list_companies)
            .service(get_company)
            .service(create_company)
            .service(update_company)
            .service(delete_company)
    );
}
