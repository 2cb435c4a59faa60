use serde::{Serialize, Deserialize};
use chrono::NaiveDate;

use super::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractTier {
    Silver,
    Gold,
    Diamond,
}

impl ContractTier {
    pub const ALL: [ContractTier; 3] = [ContractTier::Diamond, ContractTier::Gold, ContractTier::Silver];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Signe,
    #[default]
    EnNegociation,
    Expire,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub partenaire: String, // Company.nom
    #[serde(rename = "type")]
    pub tier: ContractTier,
    pub montant: i64,       // en dirhams
    pub date_signature: NaiveDate,
    #[serde(default)]
    pub statut: ContractStatus,
}

impl Record for Contract {
    const STORAGE_KEY: &'static str = "contracts";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
