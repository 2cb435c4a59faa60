use serde::{Serialize, Deserialize};

use super::Record;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandStatus {
    #[default]
    Libre,
    Occupe,
    Reserve,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stand {
    pub id: String,
    pub numero: u32,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub taille: StandSize,
    #[serde(default)]
    pub statut: StandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entreprise: Option<String>, // Company.nom de l'occupant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsable: Option<String>,
    #[serde(default)]
    pub prix: i64,
}

impl Stand {
    /// OCCUPE/RESERVE exige un occupant, LIBRE n'en accepte aucun.
    pub fn occupancy_is_consistent(&self) -> bool {
        let has_occupant = self
            .entreprise
            .as_deref()
            .is_some_and(|nom| !nom.trim().is_empty());

        match self.statut {
            StandStatus::Libre => !has_occupant,
            StandStatus::Occupe | StandStatus::Reserve => has_occupant,
        }
    }
}

impl Record for Stand {
    const STORAGE_KEY: &'static str = "stands";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stand(statut: StandStatus, entreprise: Option<&str>) -> Stand {
        Stand {
            id: "1".to_string(),
            numero: 1,
            zone: "A".to_string(),
            taille: StandSize::Medium,
            statut,
            entreprise: entreprise.map(str::to_string),
            responsable: None,
            prix: 3000,
        }
    }

    #[test]
    fn test_occupancy_consistency() {
        assert!(stand(StandStatus::Libre, None).occupancy_is_consistent());
        assert!(stand(StandStatus::Occupe, Some("TechCorp Innovation")).occupancy_is_consistent());
        assert!(stand(StandStatus::Reserve, Some("SecureNet Solutions")).occupancy_is_consistent());

        assert!(!stand(StandStatus::Libre, Some("TechCorp Innovation")).occupancy_is_consistent());
        assert!(!stand(StandStatus::Occupe, None).occupancy_is_consistent());
        assert!(!stand(StandStatus::Reserve, Some("   ")).occupancy_is_consistent());
    }

    #[test]
    fn test_missing_optional_fields_load_with_defaults() {
        let stand: Stand = serde_json::from_str(r#"{"id":"9","numero":9}"#).unwrap();
        assert_eq!(stand.statut, StandStatus::Libre);
        assert_eq!(stand.taille, StandSize::Medium);
        assert_eq!(stand.entreprise, None);
        assert_eq!(stand.prix, 0);
    }
}
