use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::conference::Conference;
use crate::utils::datetime;

/// Réservation de salle qui chevauche le créneau demandé
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConflict {
    pub conference_id: String,
    pub titre: String,
    #[serde(with = "datetime")]
    pub date_debut: NaiveDateTime,
    #[serde(with = "datetime")]
    pub date_fin: NaiveDateTime,
    pub message: String,
}

/// Deux créneaux [debut, fin) se chevauchent sauf si l'un finit avant que l'autre commence.
/// Des bornes qui se touchent ne sont pas un conflit.
pub fn overlaps(
    debut: NaiveDateTime,
    fin: NaiveDateTime,
    existing_debut: NaiveDateTime,
    existing_fin: NaiveDateTime,
) -> bool {
    !(fin <= existing_debut || debut >= existing_fin)
}

/// Parcourt les conférences dans l'ordre de la collection et renvoie le premier conflit
/// dans la même salle. `exclude_id` ignore la conférence en cours de modification.
pub fn check_conflict(
    conferences: &[Conference],
    salle: &str,
    debut: NaiveDateTime,
    fin: NaiveDateTime,
    exclude_id: Option<&str>,
) -> Option<RoomConflict> {
    conferences
        .iter()
        .filter(|conf| Some(conf.id.as_str()) != exclude_id)
        .filter(|conf| conf.salle == salle)
        .find(|conf| overlaps(debut, fin, conf.date_debut, conf.date_fin))
        .map(|conf| RoomConflict {
            conference_id: conf.id.clone(),
            titre: conf.titre.clone(),
            date_debut: conf.date_debut,
            date_fin: conf.date_fin,
            message: format!(
                "Conflit avec \"{}\" ({} - {})",
                conf.titre,
                datetime::format_time(&conf.date_debut),
                datetime::format_time(&conf.date_fin)
            ),
        })
}
