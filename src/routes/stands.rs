use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{StandAllocationRequest, StandRequest};
use crate::models::stand::Stand;
use crate::routes::{fetch_one, insert, remove, replace};
use crate::state::AppState;

#[get("")]
pub async fn list_stands(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.list::<Stand>())
}

/// GET /stands/zone/{zone} - Stands d'une zone (A, B, ...)
#[get("/zone/{zone}")]
pub async fn list_stands_by_zone(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let zone = path.into_inner();
    let store = state.store.read().await;

    let stands: Vec<&Stand> = store
        .stands()
        .iter()
        .filter(|s| s.zone.eq_ignore_ascii_case(&zone))
        .collect();

    HttpResponse::Ok().json(stands)
}

#[get("/{id}")]
pub async fn get_stand(
    _auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    fetch_one::<Stand>(&state, &path, "Stand").await
}

#[post("")]
pub async fn create_stand(
    auth_user: AuthUser,
    body: web::Json<StandRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    insert(&state, body.into_inner().into_record(String::new())).await
}

#[put("/{id}")]
pub async fn update_stand(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<StandRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    replace(&state, body.into_inner().into_record(path.into_inner()), "Stand").await
}

/// POST /stands/{id}/allocate - Attribuer le stand (OCCUPE ou RESERVE)
#[post("/{id}/allocate")]
pub async fn allocate_stand(
    auth_user: AuthUser,
    path: web::Path<String>,
    body: web::Json<StandAllocationRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    body.validate()?;

    let StandAllocationRequest { entreprise, statut } = body.into_inner();
    let stand = state
        .store
        .write()
        .await
        .allocate_stand(&path, &entreprise, statut)
        .await?;

    Ok(HttpResponse::Ok().json(stand))
}

/// POST /stands/{id}/release - Libérer le stand
#[post("/{id}/release")]
pub async fn release_stand(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;

    let stand = state.store.write().await.release_stand(&path).await?;
    Ok(HttpResponse::Ok().json(stand))
}

#[delete("/{id}")]
pub async fn delete_stand(
    auth_user: AuthUser,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth_user.require_admin()?;
    remove::<Stand>(&state, &path, "Stand").await
}

pub fn stands_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stands")
            .service(list_stands)
            .service(list_stands_by_zone)
            .service(get_stand)
            .service(create_stand)
            .service(update_stand)
            .service(allocate_stand)
            .service(release_stand)
            .service(delete_stand)
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::routes::configure_routes;
    use crate::routes::test_helpers::admin_token;
    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_zone_filter() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/stands/zone/b")
            .insert_header(("Authorization", admin_token(&state)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let numeros: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["numero"].as_u64().unwrap())
            .collect();
        assert_eq!(numeros, vec![3, 4]);
    }

    #[actix_web::test]
    async fn test_allocate_then_release() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;
        let admin = admin_token(&state);

        let req = test::TestRequest::post()
            .uri("/api/stands/2/allocate")
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({"entreprise": "SecureNet Solutions", "statut": "OCCUPE"}))
            .to_request();
        let stand: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stand["statut"], "OCCUPE");
        assert_eq!(stand["entreprise"], "SecureNet Solutions");

        let req = test::TestRequest::post()
            .uri("/api/stands/2/release")
            .insert_header(("Authorization", admin))
            .to_request();
        let stand: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stand["statut"], "LIBRE");
        assert!(stand.get("entreprise").map_or(true, |v| v.is_null()));
    }

    #[actix_web::test]
    async fn test_duplicate_stand_number_is_rejected() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/stands")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"numero": 1, "zone": "C", "taille": "SMALL", "prix": 1500}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_occupied_stand_needs_occupant() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/stands")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"numero": 9, "zone": "C", "statut": "OCCUPE", "entreprise": "  "}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_allocate_unknown_stand() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/stands/42/allocate")
            .insert_header(("Authorization", admin_token(&state)))
            .set_json(json!({"entreprise": "TechCorp Innovation"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
