use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Room {
    pub numero: String,
    pub capacite: u32,
}

/// Salles disponibles pour programmer des conférences
#[derive(Clone, Debug)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn all(&self) -> &[Room] {
        &self.rooms
    }

    pub fn find(&self, numero: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.numero == numero)
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        let rooms = [("101", 50), ("102", 80), ("103", 120), ("201", 30)]
            .into_iter()
            .map(|(numero, capacite)| Room {
                numero: numero.to_string(),
                capacite,
            })
            .collect();

        Self::new(rooms)
    }
}
