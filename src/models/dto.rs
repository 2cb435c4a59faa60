// Requêtes de l'API: champs obligatoires des formulaires vérifiés avec validator
use serde::Deserialize;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use validator::{Validate, ValidationError};

use crate::utils::datetime;
use super::company::Company;
use super::contract::{Contract, ContractStatus, ContractTier};
use super::speaker::Speaker;
use super::stand::{Stand, StandSize, StandStatus};
use super::conference::Conference;
use super::task::{Task, TaskPriority, TaskStatus};
use super::users::Role;

// DTO pour la connexion
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    #[validate(length(min = 1, message = "nom is required"))]
    #[serde(default)]
    pub nom: String,
    #[validate(length(min = 1, message = "secteur is required"))]
    #[serde(default)]
    pub secteur: String,
    #[serde(default)]
    pub description: String,
    #[validate(email(message = "email must be a valid address"))]
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub site_web: String,
    pub stand_numero: Option<u32>,
    pub type_contrat: Option<ContractTier>,
    #[serde(default)]
    pub nombre_employes: u32,
    #[serde(default)]
    pub intervenants: Vec<String>,
}

impl CompanyRequest {
    pub fn into_record(self, id: String) -> Company {
        Company {
            id,
            nom: self.nom.trim().to_string(),
            secteur: self.secteur,
            description: self.description,
            email: self.email,
            telephone: self.telephone,
            site_web: self.site_web,
            stand_numero: self.stand_numero,
            type_contrat: self.type_contrat,
            nombre_employes: self.nombre_employes,
            intervenants: self.intervenants,
        }
    }
}

/// Plafond d'un contrat, en dirhams
pub const MAX_MONTANT: i64 = 1_000_000_000_000;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContractRequest {
    #[validate(length(min = 1, message = "partenaire is required"))]
    #[serde(default)]
    pub partenaire: String,
    #[serde(rename = "type")]
    pub tier: ContractTier,
    #[validate(range(min = 1, max = MAX_MONTANT, message = "montant must be between 1 and 1000000000000"))]
    pub montant: i64,
    pub date_signature: Option<NaiveDate>, // absente: date par défaut fournie à into_record
    #[serde(default)]
    pub statut: ContractStatus,
}

impl ContractRequest {
    /// `default_date`: aujourd'hui à la création, date déjà enregistrée à la modification
    pub fn into_record(self, id: String, default_date: NaiveDate) -> Contract {
        Contract {
            id,
            partenaire: self.partenaire.trim().to_string(),
            tier: self.tier,
            montant: self.montant,
            date_signature: self.date_signature.unwrap_or(default_date),
            statut: self.statut,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerRequest {
    #[validate(length(min = 1, message = "nom is required"))]
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub biographie: String,
    #[validate(length(min = 1, message = "specialite is required"))]
    #[serde(default)]
    pub specialite: String,
    #[validate(length(min = 1, message = "entreprise is required"))]
    #[serde(default)]
    pub entreprise: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub conferences: Vec<String>,
}

impl SpeakerRequest {
    pub fn into_record(self, id: String) -> Speaker {
        Speaker {
            id,
            nom: self.nom.trim().to_string(),
            biographie: self.biographie,
            specialite: self.specialite,
            entreprise: self.entreprise.trim().to_string(),
            email: self.email,
            telephone: self.telephone,
            conferences: self.conferences,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StandRequest {
    #[validate(range(min = 1, message = "numero must be at least 1"))]
    pub numero: u32,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub taille: StandSize,
    #[serde(default)]
    pub statut: StandStatus,
    pub entreprise: Option<String>,
    pub responsable: Option<String>,
    #[validate(range(min = 0, message = "prix cannot be negative"))]
    #[serde(default)]
    pub prix: i64,
}

impl StandRequest {
    pub fn into_record(self, id: String) -> Stand {
        Stand {
            id,
            numero: self.numero,
            zone: self.zone,
            taille: self.taille,
            statut: self.statut,
            entreprise: non_blank(self.entreprise),
            responsable: non_blank(self.responsable),
            prix: self.prix,
        }
    }
}

// DTO pour allouer un stand à une entreprise
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StandAllocationRequest {
    #[validate(length(min = 1, message = "entreprise is required"))]
    #[serde(default)]
    pub entreprise: String,
    #[serde(default = "default_allocation_status")]
    pub statut: StandStatus,
}

fn default_allocation_status() -> StandStatus {
    StandStatus::Reserve
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_conference_end"))]
pub struct ConferenceRequest {
    #[validate(length(min = 1, message = "titre is required"))]
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "datetime")]
    pub date_debut: NaiveDateTime,
    #[serde(default, with = "datetime::option")]
    pub date_fin: Option<NaiveDateTime>,
    #[validate(range(min = 1, message = "dureeMinutes must be at least 1"))]
    pub duree_minutes: Option<u32>,
    #[validate(length(min = 1, message = "salle is required"))]
    #[serde(default)]
    pub salle: String,
    #[serde(default)]
    pub intervenants: Vec<String>,
    pub entreprise: Option<String>,
}

impl ConferenceRequest {
    /// Fin explicite si fournie, sinon début + durée
    pub fn resolve_end(&self) -> Option<NaiveDateTime> {
        resolve_end(self.date_debut, self.date_fin, self.duree_minutes)
    }

    pub fn into_record(self, id: String) -> Result<Conference, ValidationError> {
        let date_fin = self.resolve_end().ok_or_else(missing_end)?;
        Ok(Conference {
            id,
            titre: self.titre.trim().to_string(),
            description: self.description,
            date_debut: self.date_debut,
            date_fin,
            salle: self.salle.trim().to_string(),
            intervenants: self.intervenants,
            entreprise: non_blank(self.entreprise),
        })
    }
}

fn validate_conference_end(request: &ConferenceRequest) -> Result<(), ValidationError> {
    request.resolve_end().map(|_| ()).ok_or_else(missing_end)
}

// DTO pour la vérification de conflit de salle (aucune écriture)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_check_end"))]
pub struct ConflictCheckRequest {
    #[validate(length(min = 1, message = "salle is required"))]
    #[serde(default)]
    pub salle: String,
    #[serde(with = "datetime")]
    pub date_debut: NaiveDateTime,
    #[serde(default, with = "datetime::option")]
    pub date_fin: Option<NaiveDateTime>,
    pub duree_minutes: Option<u32>,
    pub exclude_id: Option<String>,
}

impl ConflictCheckRequest {
    pub fn resolve_end(&self) -> Option<NaiveDateTime> {
        resolve_end(self.date_debut, self.date_fin, self.duree_minutes)
    }
}

fn validate_check_end(request: &ConflictCheckRequest) -> Result<(), ValidationError> {
    request.resolve_end().map(|_| ()).ok_or_else(missing_end)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[validate(length(min = 1, message = "description is required"))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub statut: TaskStatus,
    pub date_limite: NaiveDate,
    #[validate(length(min = 1, message = "responsable is required"))]
    #[serde(default)]
    pub responsable: String,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl TaskRequest {
    pub fn into_record(self, id: String) -> Task {
        Task {
            id,
            description: self.description,
            statut: self.statut,
            date_limite: self.date_limite,
            responsable: self.responsable.trim().to_string(),
            priority: self.priority,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    pub statut: TaskStatus,
}

// Réponse après login
#[derive(Debug, serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: Role,
}

fn resolve_end(
    debut: NaiveDateTime,
    fin: Option<NaiveDateTime>,
    duree_minutes: Option<u32>,
) -> Option<NaiveDateTime> {
    fin.or_else(|| duree_minutes.map(|m| debut + Duration::minutes(i64::from(m))))
}

fn missing_end() -> ValidationError {
    let mut error = ValidationError::new("missing_end");
    error.message = Some("dateFin or dureeMinutes is required".into());
    error
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
