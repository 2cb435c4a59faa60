// ============================================================================
// ENTITY STORE
// ============================================================================
//
// Une collection par type d'entité, mutée par add / update / delete.
// Après chaque écriture réussie la collection touchée est réécrite en entier
// dans le Storage (write-through). Un échec d'écriture est journalisé et
// n'annule pas la modification en mémoire.
//
// ============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Record;
use crate::models::company::Company;
use crate::models::contract::Contract;
use crate::models::speaker::Speaker;
use crate::models::stand::{Stand, StandStatus};
use crate::models::conference::Conference;
use crate::models::task::{Task, TaskStatus};
use crate::models::room::RoomCatalog;
use crate::services::persistence::Storage;
use crate::services::scheduling::{self, RoomConflict};
use crate::services::seed;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{}", .0.message)]
    RoomConflict(RoomConflict),
    #[error("Unknown room: {0}")]
    UnknownRoom(String),
    #[error("Conference must end after it starts")]
    InvalidSchedule,
    #[error("Stand number {0} already exists")]
    DuplicateStandNumber(u32),
    #[error("Inconsistent stand: {0}")]
    InconsistentStand(String),
    #[error("Unknown company: {0}")]
    UnknownCompany(String),
    #[error("Company {0} already exists")]
    DuplicateCompany(String),
    #[error("Company {0} is still referenced by contracts, speakers, stands or conferences")]
    CompanyStillReferenced(String),
    #[error("{0} not found")]
    NotFound(String),
}

/// Règles appliquées au niveau du store, quel que soit le chemin d'écriture
#[derive(Debug, Clone, Copy)]
pub struct StorePolicy {
    pub enforce_room_conflicts: bool,
    pub enforce_references: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            enforce_room_conflicts: true,
            enforce_references: true,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn push(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Remplace l'élément de même identifiant, sans effet si aucun ne correspond
    fn replace(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Retire tous les éléments portant cet identifiant
    fn remove(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        before - self.items.len()
    }
}

/// Accès à la collection d'un type et règles vérifiées avant écriture
pub trait Holds<T: Record> {
    fn records(&self) -> &Collection<T>;
    fn records_mut(&mut self) -> &mut Collection<T>;
    fn check(&self, record: &T) -> Result<(), StoreError>;
}

pub struct EventStore {
    companies: Collection<Company>,
    contracts: Collection<Contract>,
    speakers: Collection<Speaker>,
    stands: Collection<Stand>,
    conferences: Collection<Conference>,
    tasks: Collection<Task>,
    rooms: RoomCatalog,
    policy: StorePolicy,
    storage: Arc<dyn Storage>,
    // Clés dont le contenu stocké n'a pu être ni lu ni mis de côté: jamais réécrites
    read_only: HashSet<&'static str>,
}

impl EventStore {
    /// Recharge chaque collection depuis sa clé. Clé absente ou document illisible:
    /// données de démonstration si `seed_demo_data`, sinon collection vide.
    /// Les enregistrements illisibles sont écartés un par un et conservés sous `<clé>.unreadable`.
    pub async fn load(
        storage: Arc<dyn Storage>,
        policy: StorePolicy,
        rooms: RoomCatalog,
        seed_demo_data: bool,
    ) -> Self {
        let s = storage.as_ref();
        let mut read_only = HashSet::new();

        let companies = load_collection(s, seed_demo_data.then(seed::companies).unwrap_or_default(), &mut read_only).await;
        let contracts = load_collection(s, seed_demo_data.then(seed::contracts).unwrap_or_default(), &mut read_only).await;
        let speakers = load_collection(s, seed_demo_data.then(seed::speakers).unwrap_or_default(), &mut read_only).await;
        let stands = load_collection(s, seed_demo_data.then(seed::stands).unwrap_or_default(), &mut read_only).await;
        let conferences = load_collection(s, seed_demo_data.then(seed::conferences).unwrap_or_default(), &mut read_only).await;
        let tasks = load_collection(s, seed_demo_data.then(seed::tasks).unwrap_or_default(), &mut read_only).await;

        Self {
            companies,
            contracts,
            speakers,
            stands,
            conferences,
            tasks,
            rooms,
            policy,
            storage,
            read_only,
        }
    }

    pub fn list<T: Record>(&self) -> &[T]
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::records(self).list()
    }

    pub fn get<T: Record>(&self, id: &str) -> Option<&T>
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::records(self).get(id)
    }

    /// Ajoute l'entité. Un identifiant vide ou déjà pris est remplacé par un UUID.
    pub async fn add<T: Record>(&mut self, mut entity: T) -> Result<T, StoreError>
    where
        Self: Holds<T>,
    {
        if entity.id().trim().is_empty() || <Self as Holds<T>>::records(self).contains(entity.id()) {
            entity.set_id(new_id());
        }

        <Self as Holds<T>>::check(self, &entity)?;
        <Self as Holds<T>>::records_mut(self).push(entity.clone());
        self.persist::<T>().await;

        info!(collection = T::STORAGE_KEY, id = entity.id(), "record added");
        Ok(entity)
    }

    /// Remplace l'enregistrement de même identifiant. Ok(false) si aucun ne correspond.
    pub async fn update<T: Record>(&mut self, entity: T) -> Result<bool, StoreError>
    where
        Self: Holds<T>,
    {
        if !<Self as Holds<T>>::records(self).contains(entity.id()) {
            return Ok(false);
        }

        <Self as Holds<T>>::check(self, &entity)?;
        let id = entity.id().to_string();
        <Self as Holds<T>>::records_mut(self).replace(entity);
        self.persist::<T>().await;

        info!(collection = T::STORAGE_KEY, id = %id, "record updated");
        Ok(true)
    }

    /// Supprime par identifiant, sans cascade. Renvoie le nombre d'éléments retirés.
    pub async fn delete<T: Record>(&mut self, id: &str) -> usize
    where
        Self: Holds<T>,
    {
        let removed = <Self as Holds<T>>::records_mut(self).remove(id);
        if removed > 0 {
            self.persist::<T>().await;
            info!(collection = T::STORAGE_KEY, id = id, "record deleted");
        }
        removed
    }

    pub fn companies(&self) -> &[Company] {
        self.companies.list()
    }

    pub fn contracts(&self) -> &[Contract] {
        self.contracts.list()
    }

    pub fn speakers(&self) -> &[Speaker] {
        self.speakers.list()
    }

    pub fn stands(&self) -> &[Stand] {
        self.stands.list()
    }

    pub fn conferences(&self) -> &[Conference] {
        self.conferences.list()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.list()
    }

    pub fn rooms(&self) -> &RoomCatalog {
        &self.rooms
    }

    pub fn storage_kind(&self) -> &'static str {
        self.storage.kind()
    }

    /// Vérification consultative d'un créneau, sans écriture
    pub fn check_conference_slot(
        &self,
        salle: &str,
        debut: NaiveDateTime,
        fin: NaiveDateTime,
        exclude_id: Option<&str>,
    ) -> Option<RoomConflict> {
        scheduling::check_conflict(self.conferences.list(), salle, debut, fin, exclude_id)
    }

    /// Attribue un stand à une entreprise (OCCUPE ou RESERVE)
    pub async fn allocate_stand(
        &mut self,
        id: &str,
        entreprise: &str,
        statut: StandStatus,
    ) -> Result<Stand, StoreError> {
        if statut == StandStatus::Libre {
            return Err(StoreError::InconsistentStand(
                "a stand cannot be allocated with status LIBRE".to_string(),
            ));
        }

        let mut stand = self
            .stands
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Stand {}", id)))?;

        stand.entreprise = Some(entreprise.trim().to_string());
        stand.statut = statut;

        self.update(stand.clone()).await?;
        Ok(stand)
    }

    /// Libère un stand: statut LIBRE et plus d'occupant
    pub async fn release_stand(&mut self, id: &str) -> Result<Stand, StoreError> {
        let mut stand = self
            .stands
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Stand {}", id)))?;

        stand.entreprise = None;
        stand.statut = StandStatus::Libre;

        self.update(stand.clone()).await?;
        Ok(stand)
    }

    pub async fn set_task_status(&mut self, id: &str, statut: TaskStatus) -> Result<Task, StoreError> {
        let mut task = self
            .tasks
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Task {}", id)))?;

        task.statut = statut;

        self.update(task.clone()).await?;
        Ok(task)
    }

    fn company_exists(&self, nom: &str) -> bool {
        self.companies.list().iter().any(|c| c.nom == nom)
    }

    fn require_company(&self, nom: &str) -> Result<(), StoreError> {
        if !self.policy.enforce_references || self.company_exists(nom) {
            Ok(())
        } else {
            Err(StoreError::UnknownCompany(nom.to_string()))
        }
    }

    fn company_is_referenced(&self, nom: &str) -> bool {
        self.contracts.list().iter().any(|c| c.partenaire == nom)
            || self.speakers.list().iter().any(|s| s.entreprise == nom)
            || self.stands.list().iter().any(|s| s.entreprise.as_deref() == Some(nom))
            || self.conferences.list().iter().any(|c| c.entreprise.as_deref() == Some(nom))
    }

    /// Réécrit la collection entière sous sa clé. Les erreurs sont seulement journalisées.
    async fn persist<T: Record>(&self)
    where
        Self: Holds<T>,
    {
        if self.read_only.contains(T::STORAGE_KEY) {
            warn!(
                collection = T::STORAGE_KEY,
                "stored collection could not be read, change kept in memory only"
            );
            return;
        }

        let json = match serde_json::to_string(<Self as Holds<T>>::records(self).list()) {
            Ok(json) => json,
            Err(e) => {
                warn!(collection = T::STORAGE_KEY, error = %e, "failed to serialize collection");
                return;
            }
        };

        if let Err(e) = self.storage.save(T::STORAGE_KEY, json).await {
            warn!(
                collection = T::STORAGE_KEY,
                error = %e,
                "failed to persist collection, change kept in memory only"
            );
        }
    }
}

fn unreadable_key(key: &str) -> String {
    format!("{}.unreadable", key)
}

async fn load_collection<T: Record>(
    storage: &dyn Storage,
    fallback: Vec<T>,
    read_only: &mut HashSet<&'static str>,
) -> Collection<T> {
    let raw = match storage.load(T::STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Collection::new(fallback),
        Err(e) => {
            // Contenu inconnu: ne pas l'écraser avec les valeurs par défaut
            warn!(collection = T::STORAGE_KEY, error = %e, "failed to load collection, using defaults");
            read_only.insert(T::STORAGE_KEY);
            return Collection::new(fallback);
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(collection = T::STORAGE_KEY, error = %e, "unreadable collection, using defaults");
            if !set_aside(storage, T::STORAGE_KEY, raw).await {
                read_only.insert(T::STORAGE_KEY);
            }
            return Collection::new(fallback);
        }
    };

    let mut items = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    for value in values {
        match T::deserialize(&value) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!(collection = T::STORAGE_KEY, error = %e, "skipping unreadable record");
                rejected.push(value);
            }
        }
    }

    if !rejected.is_empty() {
        let raw = serde_json::Value::Array(rejected).to_string();
        if !set_aside(storage, T::STORAGE_KEY, raw).await {
            read_only.insert(T::STORAGE_KEY);
        }
    }

    info!(collection = T::STORAGE_KEY, count = items.len(), "collection loaded");
    Collection::new(items)
}

/// Copie le contenu illisible sous `<clé>.unreadable` avant que la clé ne soit réécrite
async fn set_aside(storage: &dyn Storage, key: &str, raw: String) -> bool {
    let backup = unreadable_key(key);
    match storage.save(&backup, raw).await {
        Ok(()) => {
            warn!(collection = key, backup = %backup, "unreadable content kept aside");
            true
        }
        Err(e) => {
            warn!(collection = key, error = %e, "failed to keep unreadable content aside");
            false
        }
    }
}

impl Holds<Company> for EventStore {
    fn records(&self) -> &Collection<Company> {
        &self.companies
    }

    fn records_mut(&mut self) -> &mut Collection<Company> {
        &mut self.companies
    }

    fn check(&self, company: &Company) -> Result<(), StoreError> {
        if !self.policy.enforce_references {
            return Ok(());
        }

        // Le nom sert de clé de jointure: il doit rester unique
        if self.companies.list().iter().any(|c| c.id != company.id && c.nom == company.nom) {
            return Err(StoreError::DuplicateCompany(company.nom.clone()));
        }

        if let Some(previous) = self.companies.get(&company.id) {
            if previous.nom != company.nom && self.company_is_referenced(&previous.nom) {
                return Err(StoreError::CompanyStillReferenced(previous.nom.clone()));
            }
        }

        Ok(())
    }
}

impl Holds<Contract> for EventStore {
    fn records(&self) -> &Collection<Contract> {
        &self.contracts
    }

    fn records_mut(&mut self) -> &mut Collection<Contract> {
        &mut self.contracts
    }

    fn check(&self, contract: &Contract) -> Result<(), StoreError> {
        self.require_company(&contract.partenaire)
    }
}

impl Holds<Speaker> for EventStore {
    fn records(&self) -> &Collection<Speaker> {
        &self.speakers
    }

    fn records_mut(&mut self) -> &mut Collection<Speaker> {
        &mut self.speakers
    }

    fn check(&self, speaker: &Speaker) -> Result<(), StoreError> {
        self.require_company(&speaker.entreprise)
    }
}

impl Holds<Stand> for EventStore {
    fn records(&self) -> &Collection<Stand> {
        &self.stands
    }

    fn records_mut(&mut self) -> &mut Collection<Stand> {
        &mut self.stands
    }

    fn check(&self, stand: &Stand) -> Result<(), StoreError> {
        if !stand.occupancy_is_consistent() {
            return Err(StoreError::InconsistentStand(format!(
                "stand {} is {:?} but occupant is {:?}",
                stand.numero, stand.statut, stand.entreprise
            )));
        }

        if self.stands.list().iter().any(|s| s.id != stand.id && s.numero == stand.numero) {
            return Err(StoreError::DuplicateStandNumber(stand.numero));
        }

        match &stand.entreprise {
            Some(nom) => self.require_company(nom),
            None => Ok(()),
        }
    }
}

impl Holds<Conference> for EventStore {
    fn records(&self) -> &Collection<Conference> {
        &self.conferences
    }

    fn records_mut(&mut self) -> &mut Collection<Conference> {
        &mut self.conferences
    }

    fn check(&self, conference: &Conference) -> Result<(), StoreError> {
        if self.rooms.find(&conference.salle).is_none() {
            return Err(StoreError::UnknownRoom(conference.salle.clone()));
        }

        if conference.date_fin <= conference.date_debut {
            return Err(StoreError::InvalidSchedule);
        }

        if self.policy.enforce_room_conflicts {
            if let Some(conflict) = self.check_conference_slot(
                &conference.salle,
                conference.date_debut,
                conference.date_fin,
                Some(&conference.id),
            ) {
                return Err(StoreError::RoomConflict(conflict));
            }
        }

        match &conference.entreprise {
            Some(nom) => self.require_company(nom),
            None => Ok(()),
        }
    }
}

impl Holds<Task> for EventStore {
    fn records(&self) -> &Collection<Task> {
        &self.tasks
    }

    fn records_mut(&mut self) -> &mut Collection<Task> {
        &mut self.tasks
    }

    fn check(&self, _task: &Task) -> Result<(), StoreError> {
        Ok(())
    }
}
