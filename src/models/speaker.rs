use serde::{Serialize, Deserialize};

use super::Record;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub biographie: String,
    #[serde(default)]
    pub specialite: String,
    #[serde(default)]
    pub entreprise: String, // Company.nom
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub conferences: Vec<String>, // titres des conférences
}

impl Record for Speaker {
    const STORAGE_KEY: &'static str = "speakers";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
