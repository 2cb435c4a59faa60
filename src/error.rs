use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use validator::ValidationErrors;

use crate::services::entity_store::StoreError;
use crate::services::scheduling::RoomConflict;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{}", .0.message)]
    Conflict(RoomConflict),
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) | AppError::Rejected(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Conflict(conflict) => serde_json::json!({
                "error": self.to_string(),
                "conflict": conflict,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // "nom: nom is required; ..." plutôt que le Display multi-lignes de validator
        let mut fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect();
        fields.sort();

        if fields.is_empty() {
            AppError::Validation(format!("Invalid request: {}", errors))
        } else {
            AppError::Validation(format!("Invalid request: {}", fields.join("; ")))
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::RoomConflict(conflict) => AppError::Conflict(conflict),
            StoreError::NotFound(what) => AppError::NotFound(format!("{} not found", what)),
            StoreError::UnknownRoom(_)
            | StoreError::InvalidSchedule
            | StoreError::InconsistentStand(_)
            | StoreError::UnknownCompany(_) => AppError::Validation(error.to_string()),
            StoreError::DuplicateStandNumber(_)
            | StoreError::DuplicateCompany(_)
            | StoreError::CompanyStillReferenced(_) => AppError::Rejected(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use chrono::NaiveDate;

    #[test]
    fn test_store_errors_status() {
        assert_eq!(
            AppError::from(StoreError::DuplicateStandNumber(3)).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(StoreError::UnknownCompany("Nope".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(StoreError::NotFound("Stand 9".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_conflict_body_carries_conflict() {
        let at = |h, m| {
            NaiveDate::from_ymd_opt(2024, 6, 8)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
        };
        let conflict = RoomConflict {
            conference_id: "1".to_string(),
            titre: "Innovation et IA".to_string(),
            date_debut: at(9, 0),
            date_fin: at(10, 30),
            message: "Conflit avec \"Innovation et IA\" (09:00 - 10:30)".to_string(),
        };

        let response = AppError::from(StoreError::RoomConflict(conflict)).error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Conflit avec \"Innovation et IA\" (09:00 - 10:30)");
        assert_eq!(body["conflict"]["conferenceId"], "1");
    }
}
