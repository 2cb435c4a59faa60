use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::SpeakerRequest;
use crate::models::speaker::Speaker;
use crate::routes::{fetch_one, insert, remove, replace};
use crate::state::AppState;

#[get("")]
pub async fn list_speakers(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Speaker>())
}

#[get("/{id}")]
pub async fn get_speaker(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Speaker>(&state, &path, "Speaker").await
}

#[post("")]
pub async fn create_speaker(
    auth_user: AuthUser,
    body: web::Json<SpeakerRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    insert(&state, body.into_inner().into_record(String::new())).await
}

#[put("/{id}")]
pub async fn update_speaker(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<SpeakerRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    replace(&state, body.into_inner().into_record(path.into_inner()), "Speaker").await
}

#[delete("/{id}")]
pub async fn delete_speaker(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Speaker>(&state, &path, "Speaker").await
}

pub fn speakers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/speakers")
            .service(list_speakers)
            .service(get_speaker)
            .service(create_speaker)
            .service(update_speaker)
            .service(delete_speaker)
    );
}
