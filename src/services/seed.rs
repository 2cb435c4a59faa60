// Données de démonstration du forum, chargées quand une collection n'a jamais été persistée

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::company::Company;
use crate::models::contract::{Contract, ContractStatus, ContractTier};
use crate::models::speaker::Speaker;
use crate::models::stand::{Stand, StandSize, StandStatus};
use crate::models::conference::Conference;
use crate::models::task::{Task, TaskPriority, TaskStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "1".to_string(),
            nom: "TechCorp Innovation".to_string(),
            secteur: "Technologies".to_string(),
            description: "Leader en solutions d'intelligence artificielle et de machine learning.".to_string(),
            email: "contact@techcorp.com".to_string(),
            telephone: "+33 1 23 45 67 89".to_string(),
            site_web: "www.techcorp.com".to_string(),
            stand_numero: Some(1),
            type_contrat: Some(ContractTier::Diamond),
            nombre_employes: 250,
            intervenants: vec!["Dr. Marie Dupont".to_string()],
        },
        Company {
            id: "2".to_string(),
            nom: "SecureNet Solutions".to_string(),
            secteur: "Cybersécurité".to_string(),
            description: "Spécialiste en sécurité informatique et protection des données.".to_string(),
            email: "info@securenet.com".to_string(),
            telephone: "+33 1 98 76 54 32".to_string(),
            site_web: "www.securenet.com".to_string(),
            stand_numero: Some(3),
            type_contrat: Some(ContractTier::Gold),
            nombre_employes: 120,
            intervenants: vec!["Jean-Pierre Martin".to_string()],
        },
    ]
}

pub fn contracts() -> Vec<Contract> {
    vec![
        Contract {
            id: "1".to_string(),
            partenaire: "TechCorp Innovation".to_string(),
            tier: ContractTier::Diamond,
            montant: 50000,
            date_signature: date(2024, 1, 15),
            statut: ContractStatus::Signe,
        },
        Contract {
            id: "2".to_string(),
            partenaire: "SecureNet Solutions".to_string(),
            tier: ContractTier::Gold,
            montant: 25000,
            date_signature: date(2024, 2, 10),
            statut: ContractStatus::Signe,
        },
    ]
}

pub fn speakers() -> Vec<Speaker> {
    vec![
        Speaker {
            id: "1".to_string(),
            nom: "Dr. Marie Dupont".to_string(),
            biographie: "Docteure en Intelligence Artificielle avec 15 ans d'expérience dans le domaine de la recherche et du développement.".to_string(),
            specialite: "Intelligence Artificielle".to_string(),
            entreprise: "TechCorp Innovation".to_string(),
            email: "marie.dupont@techcorp.com".to_string(),
            telephone: "+33 1 23 45 67 89".to_string(),
            conferences: vec!["Innovation et IA".to_string(), "L'avenir de l'IA".to_string()],
        },
        Speaker {
            id: "2".to_string(),
            nom: "Jean-Pierre Martin".to_string(),
            biographie: "Expert en cybersécurité et consultant pour de grandes entreprises internationales.".to_string(),
            specialite: "Cybersécurité".to_string(),
            entreprise: "SecureNet Solutions".to_string(),
            email: "jp.martin@securenet.com".to_string(),
            telephone: "+33 1 98 76 54 32".to_string(),
            conferences: vec!["Cybersécurité moderne".to_string()],
        },
    ]
}

pub fn stands() -> Vec<Stand> {
    let stand = |id: &str, numero, zone: &str, taille, statut, entreprise: Option<&str>, prix| Stand {
        id: id.to_string(),
        numero,
        zone: zone.to_string(),
        taille,
        statut,
        entreprise: entreprise.map(str::to_string),
        responsable: None,
        prix,
    };

    vec![
        stand("1", 1, "A", StandSize::Large, StandStatus::Occupe, Some("TechCorp Innovation"), 5000),
        stand("2", 2, "A", StandSize::Medium, StandStatus::Libre, None, 3000),
        stand("3", 3, "B", StandSize::Medium, StandStatus::Occupe, Some("SecureNet Solutions"), 3000),
        stand("4", 4, "B", StandSize::Small, StandStatus::Libre, None, 2000),
    ]
}

pub fn conferences() -> Vec<Conference> {
    let at = |d: NaiveDate, h: u32, m: u32| d.and_hms_opt(h, m, 0).unwrap_or(NaiveDateTime::MIN);
    let day = date(2024, 6, 8);

    vec![
        Conference {
            id: "1".to_string(),
            titre: "Innovation et IA".to_string(),
            description: "Panorama des usages de l'intelligence artificielle en entreprise.".to_string(),
            date_debut: at(day, 9, 0),
            date_fin: at(day, 10, 30),
            salle: "101".to_string(),
            intervenants: vec!["Dr. Marie Dupont".to_string()],
            entreprise: Some("TechCorp Innovation".to_string()),
        },
        Conference {
            id: "2".to_string(),
            titre: "Cybersécurité moderne".to_string(),
            description: "Menaces actuelles et bonnes pratiques de protection des données.".to_string(),
            date_debut: at(day, 11, 0),
            date_fin: at(day, 12, 30),
            salle: "102".to_string(),
            intervenants: vec!["Jean-Pierre Martin".to_string()],
            entreprise: Some("SecureNet Solutions".to_string()),
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            description: "Confirmer la réservation des salles 101 et 102".to_string(),
            statut: TaskStatus::Terminee,
            date_limite: date(2024, 5, 15),
            responsable: "Hamza Mantrach".to_string(),
            priority: TaskPriority::High,
        },
        Task {
            id: "2".to_string(),
            description: "Préparer les badges des intervenants".to_string(),
            statut: TaskStatus::EnCours,
            date_limite: date(2024, 6, 1),
            responsable: "Younes Nihji".to_string(),
            priority: TaskPriority::Medium,
        },
        Task {
            id: "3".to_string(),
            description: "Relancer les entreprises sans contrat signé".to_string(),
            statut: TaskStatus::EnAttente,
            date_limite: date(2024, 5, 25),
            responsable: "Mohamed Griguira".to_string(),
            priority: TaskPriority::Low,
        },
    ]
}
