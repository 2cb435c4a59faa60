use chrono::NaiveDate;
use serde::Serialize;

use crate::models::contract::ContractTier;
use crate::models::stand::StandStatus;
use crate::models::task::TaskStatus;
use crate::services::entity_store::EventStore;

pub struct StatsService;

/// Occupation des stands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandOccupancy {
    pub total: usize,
    pub libres: usize,
    pub occupes: usize,
    pub reserves: usize,
    pub occupancy_rate: f64, // % de stands OCCUPE
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub en_attente: usize,
    pub en_cours: usize,
    pub terminee: usize,
    pub en_retard: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_companies: usize,
    pub total_contracts: usize,
    pub total_speakers: usize,
    pub total_conferences: usize,
    pub total_tasks: usize,
    pub total_revenue: i64,
    pub average_contract_value: f64,
    pub stands: StandOccupancy,
    pub tasks: TaskCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorStats {
    pub secteur: String,
    pub entreprises: usize,
    pub chiffre_affaires: i64,
    pub contrats: usize,
    pub stands: usize,
    pub ca_par_entreprise: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStats {
    #[serde(rename = "type")]
    pub tier: ContractTier,
    pub count: usize,
    pub revenue: i64,
}

/// Regroupe les secteurs saisis librement en grandes familles
pub fn normalize_sector(secteur: &str) -> &'static str {
    match secteur {
        "Technologies" | "Cybersécurité" => "Technologies",
        "Finance" | "Banque" | "Assurance" => "Finance",
        "Industrie" | "Manufacturing" | "Automobile" => "Industrie",
        "Services" | "Consulting" | "RH" => "Services",
        "Éducation" | "Formation" => "Éducation",
        "Santé" | "Pharmaceutique" => "Santé",
        "Énergie" => "Énergie",
        "Télécommunications" => "Télécommunications",
        _ => "Autres",
    }
}

/// Somme des montants, bornée à i64::MAX au lieu de déborder
fn revenue(montants: impl Iterator<Item = i64>) -> i64 {
    montants.fold(0i64, |total, montant| total.saturating_add(montant))
}

impl StatsService {
    /// Indicateurs du tableau de bord, recalculés à partir des collections complètes
    pub fn overview(store: &EventStore, today: NaiveDate) -> OverviewStats {
        let contracts = store.contracts();
        let total_revenue = revenue(contracts.iter().map(|c| c.montant));
        let average_contract_value = if contracts.is_empty() {
            0.0
        } else {
            total_revenue as f64 / contracts.len() as f64
        };

        OverviewStats {
            total_companies: store.companies().len(),
            total_contracts: contracts.len(),
            total_speakers: store.speakers().len(),
            total_conferences: store.conferences().len(),
            total_tasks: store.tasks().len(),
            total_revenue,
            average_contract_value,
            stands: Self::stand_occupancy(store),
            tasks: Self::task_counts(store, today),
        }
    }

    pub fn stand_occupancy(store: &EventStore) -> StandOccupancy {
        let stands = store.stands();
        let count = |statut: StandStatus| stands.iter().filter(|s| s.statut == statut).count();

        let occupes = count(StandStatus::Occupe);
        let occupancy_rate = if stands.is_empty() {
            0.0
        } else {
            occupes as f64 / stands.len() as f64 * 100.0
        };

        StandOccupancy {
            total: stands.len(),
            libres: count(StandStatus::Libre),
            occupes,
            reserves: count(StandStatus::Reserve),
            occupancy_rate,
        }
    }

    pub fn task_counts(store: &EventStore, today: NaiveDate) -> TaskCounts {
        let tasks = store.tasks();
        let count = |statut: TaskStatus| tasks.iter().filter(|t| t.statut == statut).count();

        TaskCounts {
            en_attente: count(TaskStatus::EnAttente),
            en_cours: count(TaskStatus::EnCours),
            terminee: count(TaskStatus::Terminee),
            en_retard: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        }
    }

    /// Chiffre d'affaires, contrats et stands par secteur normalisé, triés par CA décroissant
    pub fn sectors(store: &EventStore) -> Vec<SectorStats> {
        let mut sectors: Vec<SectorStats> = Vec::new();

        for company in store.companies() {
            let secteur = normalize_sector(&company.secteur);

            // Jointure par nom, comme dans les contrats et les stands
            let company_contracts: Vec<_> = store
                .contracts()
                .iter()
                .filter(|c| c.partenaire == company.nom)
                .collect();
            let company_stands = store
                .stands()
                .iter()
                .filter(|s| s.entreprise.as_deref() == Some(company.nom.as_str()))
                .count();

            let index = match sectors.iter().position(|s| s.secteur == secteur) {
                Some(index) => index,
                None => {
                    sectors.push(SectorStats {
                        secteur: secteur.to_string(),
                        entreprises: 0,
                        chiffre_affaires: 0,
                        contrats: 0,
                        stands: 0,
                        ca_par_entreprise: 0,
                    });
                    sectors.len() - 1
                }
            };

            let entry = &mut sectors[index];
            entry.entreprises += 1;
            entry.chiffre_affaires = entry
                .chiffre_affaires
                .saturating_add(revenue(company_contracts.iter().map(|c| c.montant)));
            entry.contrats += company_contracts.len();
            entry.stands += company_stands;
        }

        for entry in &mut sectors {
            entry.ca_par_entreprise = if entry.entreprises > 0 {
                (entry.chiffre_affaires as f64 / entry.entreprises as f64).round() as i64
            } else {
                0
            };
        }

        sectors.sort_by(|a, b| b.chiffre_affaires.cmp(&a.chiffre_affaires));
        sectors
    }

    /// Nombre et montant des contrats pour chaque niveau, DIAMOND en premier
    pub fn contract_tiers(store: &EventStore) -> Vec<TierStats> {
        ContractTier::ALL
            .iter()
            .map(|tier| {
                let matching = store.contracts().iter().filter(|c| c.tier == *tier);
                TierStats {
                    tier: *tier,
                    count: matching.clone().count(),
                    revenue: revenue(matching.map(|c| c.montant)),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::company::Company;
    use crate::models::contract::{Contract, ContractStatus};
    use crate::models::room::RoomCatalog;
    use crate::services::entity_store::StorePolicy;
    use crate::services::persistence::MemoryStorage;

    async fn seeded_store() -> EventStore {
        EventStore::load(
            Arc::new(MemoryStorage::default()),
            StorePolicy::default(),
            RoomCatalog::default(),
            true,
        )
        .await
    }

    #[test]
    fn test_normalize_sector() {
        assert_eq!(normalize_sector("Cybersécurité"), "Technologies");
        assert_eq!(normalize_sector("Banque"), "Finance");
        assert_eq!(normalize_sector("RH"), "Services");
        assert_eq!(normalize_sector(" RH "), "Autres");
        assert_eq!(normalize_sector("Agroalimentaire"), "Autres");
    }

    #[tokio::test]
    async fn test_overview_on_demo_data() {
        let store = seeded_store().await;
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

        let stats = StatsService::overview(&store, today);

        assert_eq!(stats.total_companies, 2);
        assert_eq!(stats.total_contracts, 2);
        assert_eq!(stats.total_revenue, 75000);
        assert_eq!(stats.average_contract_value, 37500.0);
        assert_eq!(stats.stands.total, 4);
        assert_eq!(stats.stands.occupes, 2);
        assert_eq!(stats.stands.libres, 2);
        assert_eq!(stats.stands.occupancy_rate, 50.0);

        // Tâche 1 terminée (pas en retard), tâche 3 échue le 25/05 (pas encore), tâche 2 le 01/06
        assert_eq!(stats.tasks.terminee, 1);
        assert_eq!(stats.tasks.en_retard, 0);

        let later = StatsService::task_counts(&store, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(later.en_retard, 2);
    }

    #[tokio::test]
    async fn test_empty_store_has_zero_rates() {
        let store = EventStore::load(
            Arc::new(MemoryStorage::default()),
            StorePolicy::default(),
            RoomCatalog::default(),
            false,
        )
        .await;

        let stats = StatsService::overview(&store, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(stats.average_contract_value, 0.0);
        assert_eq!(stats.stands.occupancy_rate, 0.0);
        assert!(StatsService::sectors(&store).is_empty());
    }

    #[tokio::test]
    async fn test_sectors_group_and_sort_by_revenue() {
        let mut store = seeded_store().await;
        store
            .add(Company {
                id: String::new(),
                nom: "Banque Atlas".to_string(),
                secteur: "Banque".to_string(),
                description: String::new(),
                email: "contact@atlas.ma".to_string(),
                telephone: String::new(),
                site_web: String::new(),
                stand_numero: None,
                type_contrat: None,
                nombre_employes: 40,
                intervenants: vec![],
            })
            .await
            .unwrap();

        let sectors = StatsService::sectors(&store);

        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].secteur, "Technologies");
        assert_eq!(sectors[0].entreprises, 2);
        assert_eq!(sectors[0].chiffre_affaires, 75000);
        assert_eq!(sectors[0].contrats, 2);
        assert_eq!(sectors[0].stands, 2);
        assert_eq!(sectors[0].ca_par_entreprise, 37500);

        assert_eq!(sectors[1].secteur, "Finance");
        assert_eq!(sectors[1].chiffre_affaires, 0);
    }

    #[tokio::test]
    async fn test_huge_contract_saturates_revenue() {
        let mut store = seeded_store().await;
        store
            .add(Contract {
                id: String::new(),
                partenaire: "TechCorp Innovation".to_string(),
                tier: ContractTier::Diamond,
                montant: i64::MAX,
                date_signature: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                statut: ContractStatus::Signe,
            })
            .await
            .unwrap();

        let stats = StatsService::overview(&store, NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        assert_eq!(stats.total_revenue, i64::MAX);
        assert!(stats.average_contract_value > 0.0);

        let sectors = StatsService::sectors(&store);
        assert_eq!(sectors[0].chiffre_affaires, i64::MAX);

        let tiers = StatsService::contract_tiers(&store);
        assert_eq!(tiers[0].revenue, i64::MAX);
    }

    #[tokio::test]
    async fn test_contract_tiers() {
        let store = seeded_store().await;
        let tiers = StatsService::contract_tiers(&store);

        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0], TierStats { tier: ContractTier::Diamond, count: 1, revenue: 50000 });
        assert_eq!(tiers[1], TierStats { tier: ContractTier::Gold, count: 1, revenue: 25000 });
        assert_eq!(tiers[2], TierStats { tier: ContractTier::Silver, count: 0, revenue: 0 });
    }
}
