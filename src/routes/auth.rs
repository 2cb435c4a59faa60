use actix_web::{get, post, web, HttpResponse};

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{LoginRequest, LoginResponse};
use crate::models::users::SessionUser;
use crate::state::AppState;
use crate::utils::jwt;

/// POST /auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();

    // 1. Vérifier le couple email / mot de passe (PBKDF2, hors du thread async)
    let lookup = state.clone();
    let user = web::block(move || lookup.credentials.login(&email, &password))
        .await
        .map_err(|e| AppError::Internal(format!("Login failed: {}", e)))?
        .ok_or_else(|| AppError::Unauthorized("Email ou mot de passe incorrect".to_string()))?;

    // 2. Ouvrir la session
    let session_id = state.sessions.open(user.clone());

    // 3. Générer le JWT
    let token = match jwt::generate_token(
        &session_id,
        &user.email,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_ttl_hours,
    ) {
        Ok(token) => token,
        Err(e) => {
            state.sessions.close(&session_id);
            return Err(AppError::Internal(e));
        }
    };

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        email: user.email,
        role: user.role,
    }))
}

/// POST /auth/logout - Fermer la session courante
#[post("/logout")]
pub async fn logout(
    auth_user: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    state.sessions.close(&auth_user.session_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out"
    })))
}

/// GET /auth/me - Utilisateur de la session
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SessionUser {
        email: auth_user.email,
        role: auth_user.role,
    }))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login)
            .service(logout)
            .service(me)
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::routes::configure_routes;
    use crate::state::test_support::test_state;

    #[actix_web::test]
    async fn test_login_me_logout() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "admin@forumemi.com", "password": "admin123"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["email"], "admin@forumemi.com");
        assert_eq!(body["role"], "admin");
        let bearer = format!("Bearer {}", body["token"].as_str().unwrap());

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let me: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me, json!({"email": "admin@forumemi.com", "role": "admin"}));

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // Le jeton est toujours valide mais la session n'existe plus
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", bearer))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_login_refused() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        for (email, password) in [
            ("admin@forumemi.com", "wrong"),
            ("Admin@forumemi.com", "admin123"),
            ("", ""),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": email, "password": password}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Email ou mot de passe incorrect");
        }
    }

    #[actix_web::test]
    async fn test_me_requires_bearer() {
        let state = test_state().await;
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
