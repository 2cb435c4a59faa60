use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::error::AppError;
use crate::models::users::Role;
use crate::state::AppState;
use crate::utils::jwt;

/// Utilisateur authentifié, extrait du header Authorization
/// Utilisé comme extracteur dans toutes les routes d'entités
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session_id: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Les écritures sont réservées au rôle admin
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => Err(AppError::Forbidden("Admin role required".to_string())),
        }
    }
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Error::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("Application state missing".to_string()))?;

    // 1. Extraire le header Authorization
    let auth_header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    // 2. Format: "Bearer <token>"
    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid Authorization format (expected: Bearer <token>)".to_string())
    })?;

    // 3. Vérifier le JWT
    let claims = jwt::verify_token(token, &state.config.jwt_secret)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    // 4. La session doit encore être ouverte (logout la supprime)
    let user = state
        .sessions
        .get(&claims.sid)
        .ok_or_else(|| AppError::Unauthorized("Session closed".to_string()))?;

    Ok(AuthUser {
        session_id: claims.sid,
        email: user.email,
        role: user.role,
    })
}
