use serde::{Serialize, Deserialize};
use chrono::NaiveDateTime;

use super::Record;
use crate::utils::datetime;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub id: String,
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "datetime")]
    pub date_debut: NaiveDateTime,
    #[serde(with = "datetime")]
    pub date_fin: NaiveDateTime,
    pub salle: String, // Room.numero
    #[serde(default)]
    pub intervenants: Vec<String>, // noms des intervenants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entreprise: Option<String>, // Company.nom de l'organisateur
}

impl Record for Conference {
    const STORAGE_KEY: &'static str = "conferences";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
