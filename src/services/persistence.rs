// Persistance des collections: une valeur JSON par clé fixe
// ("companies", "contracts", "speakers", "stands", "conferences", "tasks")

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use tokio::sync::Mutex;

use crate::models::local_storage;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

//trait = Interface
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn save(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// "database" ou "memory", pour /api/health
    fn kind(&self) -> &'static str;
}

/// Stockage en mémoire: les données ne vivent que le temps du processus
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// Stockage durable dans la table local_storage (Postgres ou SQLite)
pub struct DbStorage {
    db: DatabaseConnection,
}

impl DbStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Storage for DbStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = local_storage::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await?;

        Ok(row.map(|r| r.value))
    }

    async fn save(&self, key: &str, value: String) -> Result<(), StorageError> {
        let row = local_storage::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
        };

        // Upsert: la dernière écriture gagne
        local_storage::Entity::insert(row)
            .on_conflict(
                OnConflict::column(local_storage::Column::Key)
                    .update_column(local_storage::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    fn kind(&self) -> &'static str {
        "database"
    }
}
