use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{TaskRequest, TaskStatusRequest};
use crate::models::task::Task;
use crate::routes::{fetch_one, insert, remove, replace};
use crate::state::AppState;

#[get("")]
pub async fn list_tasks(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Task>())
}

#[get("/{id}")]
pub async fn get_task(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Task>(&state, &path, "Task").await
}

#[post("")]
pub async fn create_task(
    auth_user: AuthUser,
    body: web::Json<TaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    insert(&state, body.into_inner().into_record(String::new())).await
}

#[put("/{id}")]
pub async fn update_task(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<TaskRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    replace(&state, body.into_inner().into_record(path.into_inner()), "Task").await
}

/// PATCH /tasks/{id}/status - Ouvert à tout utilisateur connecté
#[patch("/{id}/status")]
pub async fn update_task_status(
    _auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<TaskStatusRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task = state
        .store
        .write()
        .await
        .set_task_status(&path, body.statut)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{id}")]
pub async fn delete_task(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Task>(&state, &path, "Task").await
}

pub fn tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .service(list_tasks)
            .service(get_task)
            .service(create_task)
            .service(update_task)
            .service(update_task_status)
            .service(delete_task)
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::routes::configure_routes;
    use crate::routes::test_helpers::{admin_token, user_token};
    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_any_user_can_change_status() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::patch()
            .uri("/api/tasks/3/status")
            .insert_header(("Authorization", user_token(&state)))
            .set_json(json!({"statut": "EN_COURS"}))
            .to_request();
        let task: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(task["statut"], "EN_COURS");

        let req = test::TestRequest::patch()
            .uri("/api/tasks/404/status")
            .insert_header(("Authorization", user_token(&state)))
            .set_json(json!({"statut": "TERMINEE"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_task() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({
                "description": "Imprimer le plan des stands",
                "dateLimite": "2024-06-05",
                "responsable": "Ali Moustadraf",
                "priority": "HIGH"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let task: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(task["statut"], "EN_ATTENTE");
        assert_eq!(task["priority"], "HIGH");
    }

    #[actix_web::test]
    async fn test_task_requires_responsable() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"description": "Sans responsable", "dateLimite": "2024-06-05"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
