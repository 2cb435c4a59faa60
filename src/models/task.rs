use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

use super::Record;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    EnAttente,
    EnCours,
    Terminee,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub statut: TaskStatus,
    pub date_limite: NaiveDate,
    #[serde(default)]
    pub responsable: String,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl Task {
    /// En retard: date limite dépassée et tâche non terminée
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.date_limite < today && self.statut != TaskStatus::Terminee
    }
}

impl Record for Task {
    const STORAGE_KEY: &'static str = "tasks";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
