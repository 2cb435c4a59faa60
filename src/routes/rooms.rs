use actix_web::{get, web, HttpResponse};

use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /rooms - Salles disponibles pour les conférences
#[get("")]
pub async fn list_rooms(_auth_user: AuthUser, state: web::Data<AppState>) -> HttpResponse {
    let store = state.store.read().await;
    HttpResponse::Ok().json(store.rooms().all())
}

pub fn rooms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rooms")
            .service(list_rooms)
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::json;

    use crate::routes::configure_routes;
    use crate::routes::test_helpers::user_token;
    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_room_catalogue() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/rooms")
            .insert_header(("Authorization", user_token(&state)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[0], json!({"numero": "101", "capacite": 50}));
    }
}
