pub mod auth;
pub mod companies;
pub mod conferences;
pub mod contracts;
pub mod health;
pub mod rooms;
pub mod speakers;
pub mod stands;
pub mod stats;
pub mod tasks;

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::Record;
use crate::services::entity_store::{EventStore, Holds};
use crate::state::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Corps JSON illisible → 400 au format {"error": ...}
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid JSON body: {}", err)).into());

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(companies::companies_routes)
            .configure(contracts::contracts_routes)
            .configure(speakers::speakers_routes)
            .configure(stands::stands_routes)
            .configure(conferences::conferences_routes)
            .configure(tasks::tasks_routes)
            .configure(rooms::rooms_routes)
            .configure(stats::stats_routes)
    );
}

// ============================================================================
// Helpers CRUD communs aux six collections
// ============================================================================

pub(crate) async fn fetch_one<T: Record>(
    state: &AppState,
    id: &str,
    label: &str,
) -> Result<HttpResponse, AppError>
where
    EventStore: Holds<T>,
{
    let store = state.store.read().await;
    match store.get::<T>(id) {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(AppError::NotFound(format!("{} {} not found", label, id))),
    }
}

pub(crate) async fn insert<T: Record>(state: &AppState, record: T) -> Result<HttpResponse, AppError>
where
    EventStore: Holds<T>,
{
    let created = state.store.write().await.add(record).await?;
    Ok(HttpResponse::Created().json(created))
}

pub(crate) async fn replace<T: Record>(
    state: &AppState,
    record: T,
    label: &str,
) -> Result<HttpResponse, AppError>
where
    EventStore: Holds<T>,
{
    let id = record.id().to_string();
    if state.store.write().await.update(record.clone()).await? {
        Ok(HttpResponse::Ok().json(record))
    } else {
        Err(AppError::NotFound(format!("{} {} not found", label, id)))
    }
}

pub(crate) async fn remove<T: Record>(
    state: &AppState,
    id: &str,
    label: &str,
) -> Result<HttpResponse, AppError>
where
    EventStore: Holds<T>,
{
    let removed = state.store.write().await.delete::<T>(id).await;
    if removed == 0 {
        return Err(AppError::NotFound(format!("{} {} not found", label, id)));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} {} deleted", label, id),
        "deleted": removed
    })))
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::state::AppState;

    /// Jeton Bearer pour un des comptes par défaut
    pub fn token_for(state: &AppState, email: &str, password: &str) -> String {
        let user = state.credentials.login(email, password).unwrap();
        let sid = state.sessions.open(user.clone());
        let token = crate::utils::jwt::generate_token(
            &sid,
            &user.email,
            user.role,
            &state.config.jwt_secret,
            state.config.jwt_ttl_hours,
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    pub fn admin_token(state: &AppState) -> String {
        token_for(state, "admin@forumemi.com", "admin123")
    }

    pub fn user_token(state: &AppState) -> String {
        token_for(state, "younesnihji@forumemi.com", "younesnihji123")
    }
}
