use serde::{Serialize, Deserialize};

use super::Record;
use super::contract::ContractTier;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub secteur: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub site_web: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stand_numero: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_contrat: Option<ContractTier>,
    #[serde(default)]
    pub nombre_employes: u32,
    #[serde(default)]
    pub intervenants: Vec<String>, // noms des intervenants
}

impl Record for Company {
    const STORAGE_KEY: &'static str = "companies";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
