use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Local;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::contract::Contract;
use crate::models::dto::ContractRequest;
use crate::routes::{fetch_one, insert, remove, replace};
use crate::state::AppState;

#[get("")]
pub async fn list_contracts(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Contract>())
}

#[get("/{id}")]
pub async fn get_contract(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Contract>(&state, &path, "Contract").await
}

#[post("")]
pub async fn create_contract(
    auth_user: AuthUser,
    body: web::Json<ContractRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    let today = Local::now().date_naive();
    insert(&state, body.into_inner().into_record(String::new(), today)).await
}

#[put("/{id}")]
pub async fn update_contract(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<ContractRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    // Sans dateSignature, la date déjà enregistrée est conservée
    let id = path.into_inner();
    let signed_on = state
        .store
        .read()
        .await
        .get::<Contract>(&id)
        .map(|c| c.date_signature)
        .unwrap_or_else(|| Local::now().date_naive());

    replace(&state, body.into_inner().into_record(id, signed_on), "Contract").await
}

#[delete("/{id}")]
pub async fn delete_contract(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Contract>(&state, &path, "Contract").await
}

pub fn contracts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contracts")
            .service(list_contracts)
            .service(get_contract)
            .service(create_contract)
            .service(update_contract)
            .service(delete_contract)
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use chrono::Local;
    use serde_json::json;

    use crate::routes::configure_routes;
    use crate::routes::test_helpers::admin_token;
    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_create_contract_defaults_signature_date() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"partenaire": "SecureNet Solutions", "type": "SILVER", "montant": 8000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "SILVER");
        assert_eq!(body["statut"], "EN_NEGOCIATION");
        assert_eq!(body["dateSignature"], Local::now().date_naive().to_string());
    }

    #[actix_web::test]
    async fn test_contract_validation() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;
        let admin = admin_token(&state);

        // montant nul
        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({"partenaire": "TechCorp Innovation", "type": "GOLD", "montant": 0}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        // partenaire inconnu
        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({"partenaire": "Inconnue SA", "type": "GOLD", "montant": 1000}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        // type hors liste
        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .insert_header(("Authorization", admin))
            .set_json(json!({"partenaire": "TechCorp Innovation", "type": "PLATINUM", "montant": 1000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn test_update_keeps_signature_date() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::put()
            .uri("/api/contracts/1")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"partenaire": "TechCorp Innovation", "type": "DIAMOND", "montant": 55000}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["montant"], 55000);
        assert_eq!(body["dateSignature"], "2024-01-15");
    }

    #[actix_web::test]
    async fn test_oversized_amount_is_rejected() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"partenaire": "TechCorp Innovation", "type": "DIAMOND", "montant": i64::MAX}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_contract_twice() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;
        let admin = admin_token(&state);

        let req = test::TestRequest::delete()
            .uri("/api/contracts/1")
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], 1);

        let req = test::TestRequest::delete()
            .uri("/api/contracts/1")
            .insert_header(("Authorization", admin))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
