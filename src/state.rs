use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::models::room::RoomCatalog;
use crate::services::auth_service::{CredentialTable, DEFAULT_ACCOUNTS, SessionRegistry};
use crate::services::entity_store::EventStore;
use crate::services::persistence::Storage;

/// État partagé par tous les handlers via web::Data
pub struct AppState {
    pub store: RwLock<EventStore>,
    pub credentials: CredentialTable,
    pub sessions: SessionRegistry,
    pub config: AppConfig,
}

impl AppState {
    pub async fn build(config: AppConfig, storage: Arc<dyn Storage>) -> Result<Self, String> {
        let store = EventStore::load(
            storage,
            config.policy,
            RoomCatalog::default(),
            config.seed_demo_data,
        )
        .await;

        info!(
            companies = store.companies().len(),
            conferences = store.conferences().len(),
            storage = store.storage_kind(),
            "entity store loaded"
        );

        let credentials = CredentialTable::from_accounts(&DEFAULT_ACCOUNTS, config.password_iterations)?;

        Ok(Self {
            store: RwLock::new(store),
            credentials,
            sessions: SessionRegistry::new(Duration::hours(config.jwt_ttl_hours)),
            config,
        })
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use actix_web::web;

    use crate::services::persistence::MemoryStorage;

    /// État de test: données de démo, stockage mémoire, hachage rapide
    pub async fn test_state() -> web::Data<AppState> {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.password_iterations = 1000;
        config.jwt_secret = "test-secret".to_string();

        let state = AppState::build(config, Arc::new(MemoryStorage::default()))
            .await
            .unwrap();
        web::Data::new(state)
    }
}
