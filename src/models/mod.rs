// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données du Forum EMI Entreprises.
//   Chaque entité est sérialisée en JSON avec les noms de champs camelCase
//   historiques (nom, secteur, siteWeb, dateDebut, ...).
//
// Liste des modules:
//   - health : Health check API
//   - company : Entreprises exposantes / partenaires
//   - contract : Contrats de sponsoring (SILVER / GOLD / DIAMOND)
//   - speaker : Intervenants
//   - stand : Stands d'exposition
//   - conference : Conférences (salle + créneau)
//   - task : Tâches de l'équipe logistique
//   - room : Catalogue des salles
//   - users : Rôles et comptes de connexion
//   - dto : Requêtes validées de l'API
//   - local_storage : Table clé/valeur SeaORM pour la persistance des collections
//
// Points d'attention:
//   - Les jointures entre entités se font par nom (Contract.partenaire -> Company.nom)
//   - Chaque collection est persistée sous une clé fixe (voir Record::STORAGE_KEY)
//
// ============================================================================

pub mod health;
pub mod company;
pub mod contract;
pub mod speaker;
pub mod stand;
pub mod conference;
pub mod task;
pub mod room;
pub mod users;
pub mod dto;
pub mod local_storage;

use serde::{Serialize, de::DeserializeOwned};

/// Un enregistrement stocké dans une collection de l'EventStore.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Clé sous laquelle la collection entière est persistée.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}
