use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::users::{Credential, Role, SessionUser};
use crate::utils::password;

/// Comptes de l'équipe d'organisation
pub const DEFAULT_ACCOUNTS: [(&str, &str, Role); 5] = [
    ("admin@forumemi.com", "admin123", Role::Admin),
    ("hamzamantrach@forumemi.com", "hamzamantrach123", Role::User),
    ("alimoustadraf@forumemi.com", "alimoustadraf123", Role::User),
    ("mohamedgriguira@forumemi.com", "mohamedgriguira123", Role::User),
    ("younesnihji@forumemi.com", "younesnihji123", Role::User),
];

/// Table fixe des comptes autorisés, parcourue linéairement à chaque connexion
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    pub fn from_accounts(accounts: &[(&str, &str, Role)], iterations: u32) -> Result<Self, String> {
        let entries = accounts
            .iter()
            .map(|(email, plain, role)| {
                Ok(Credential {
                    email: email.to_string(),
                    password_hash: password::hash_password(plain, iterations)?,
                    role: *role,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { entries })
    }

    /// Succès si et seulement si le couple (email, mot de passe) correspond exactement à une entrée
    pub fn login(&self, email: &str, password: &str) -> Option<SessionUser> {
        let found = self.entries.iter().find(|entry| {
            entry.email == email
                && password::verify_password(password, &entry.password_hash).unwrap_or(false)
        });

        match found {
            Some(entry) => Some(SessionUser {
                email: entry.email.clone(),
                role: entry.role,
            }),
            None => {
                info!(email = email, "login refused");
                None
            }
        }
    }
}

/// Sessions ouvertes, en mémoire uniquement: un redémarrage déconnecte tout le monde.
/// Une session expire avec son JWT; les sessions expirées sont purgées à chaque ouverture.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

struct Session {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn open(&self, user: SessionUser) -> String {
        let now = Utc::now();
        let session_id = Uuid::new_v4().to_string();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(session_id.clone(), Session { user, expires_at });

        session_id
    }

    pub fn get(&self, session_id: &str) -> Option<SessionUser> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .filter(|session| session.expires_at > Utc::now())
            .map(|session| session.user.clone())
    }

    /// Renvoie true si la session existait
    pub fn close(&self, session_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(session_id)
            .is_some()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
