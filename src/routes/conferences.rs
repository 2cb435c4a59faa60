use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Serialize;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::conference::Conference;
use crate::models::dto::{ConferenceRequest, ConflictCheckRequest};
use crate::routes::{fetch_one, insert, remove, replace};
use crate::services::scheduling::RoomConflict;
use crate::state::AppState;

// Réponse de la vérification de créneau
#[derive(Serialize)]
pub struct ConflictCheckResponse {
    pub available: bool,
    pub conflict: Option<RoomConflict>,
}

#[get("")]
pub async fn list_conferences(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Conference>())
}

#[get("/{id}")]
pub async fn get_conference(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Conference>(&state, &path, "Conference").await
}

/// POST /conferences/check-conflict - Vérifie un créneau sans rien enregistrer
#[post("/check-conflict")]
pub async fn check_conflict(
    _auth_user: AuthUser,
    body: web::Json<ConflictCheckRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let fin = body
        .resolve_end()
        .ok_or_else(|| AppError::Validation("dateFin or dureeMinutes is required".to_string()))?;

    let store = state.store.read().await;
    if store.rooms().find(body.salle.trim()).is_none() {
        return Err(AppError::Validation(format!("Unknown room: {}", body.salle)));
    }

    let conflict = store.check_conference_slot(
        body.salle.trim(),
        body.date_debut,
        fin,
        body.exclude_id.as_deref(),
    );

    Ok(HttpResponse::Ok().json(ConflictCheckResponse {
        available: conflict.is_none(),
        conflict,
    }))
}

#[post("")]
pub async fn create_conference(
    auth_user: AuthUser,
    body: web::Json<ConferenceRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    let conference = body
        .into_inner()
        .into_record(String::new())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    insert(&state, conference).await
}

#[put("/{id}")]
pub async fn update_conference(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<ConferenceRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    let conference = body
        .into_inner()
        .into_record(path.into_inner())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    replace(&state, conference, "Conference").await
}

#[delete("/{id}")]
pub async fn delete_conference(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Conference>(&state, &path, "Conference").await
}

pub fn conferences_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/conferences")
            .service(list_conferences)
            .service(check_conflict)
            .service(get_conference)
            .service(create_conference)
            .service(update_conference)
            .service(delete_conference)
    );
}
