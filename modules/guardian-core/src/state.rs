use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guardian_common::{City, EffectVector, EnergySource, GameError, NewsEvent, Position, Transportation};

pub const STARTING_MONEY: i64 = 1000;
pub const FIRST_YEAR: u32 = 1;

struct CitySeed {
    key: &'static str,
    name: &'static str,
    happiness: i64,
    co2: i64,
    position: Position,
}

const CITY_SEEDS: [CitySeed; 3] = [
    CitySeed {
        key: "stockholm",
        name: "Stockholm",
        happiness: 60,
        co2: 40,
        position: Position { x: 300, y: 180 },
    },
    CitySeed {
        key: "gothenburg",
        name: "Gothenburg",
        happiness: 50,
        co2: 45,
        position: Position { x: 150, y: 300 },
    },
    CitySeed {
        key: "malmo",
        name: "Malmö",
        happiness: 55,
        co2: 50,
        position: Position { x: 180, y: 420 },
    },
];

/// Fresh copies of the seeded cities, keyed by city key.
pub fn seed_cities() -> BTreeMap<String, City> {
    CITY_SEEDS
        .iter()
        .map(|seed| {
            (
                seed.key.to_string(),
                City {
                    name: seed.name.to_string(),
                    happiness: seed.happiness,
                    co2: seed.co2,
                    transportation: Transportation::Bicycle,
                    energy_source: EnergySource::Solar,
                    eliminated: false,
                    position: seed.position,
                },
            )
        })
        .collect()
}

/// Pending selections for the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLedger {
    pub transportation: BTreeMap<String, Transportation>,
    pub energy_source: BTreeMap<String, EnergySource>,
    pub projected_effects: BTreeMap<String, EffectVector>,
}

impl RoundLedger {
    pub fn is_empty(&self) -> bool {
        self.transportation.is_empty() && self.energy_source.is_empty()
    }
}

/// One game session. Mutated only through the effects engine and the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub money: i64,
    pub cities: BTreeMap<String, City>,
    pub last_news: Option<NewsEvent>,
    /// Sticky: only [`GameState::reset`] clears it.
    pub game_over: bool,
    pub year: u32,
    #[serde(rename = "current_round_changes")]
    pub ledger: RoundLedger,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            money: STARTING_MONEY,
            cities: seed_cities(),
            last_news: None,
            game_over: false,
            year: FIRST_YEAR,
            ledger: RoundLedger::default(),
        }
    }

    /// Back to the seed table, year one, empty ledger.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn city(&self, key: &str) -> Result<&City, GameError> {
        self.cities
            .get(key)
            .ok_or_else(|| GameError::CityNotFound(key.to_string()))
    }

    /// A city that can still receive selections.
    pub fn active_city(&self, key: &str) -> Result<&City, GameError> {
        let city = self.city(key)?;
        if city.eliminated {
            return Err(GameError::CityEliminated(key.to_string()));
        }
        Ok(city)
    }

    /// Keys of non-eliminated cities in stable order.
    pub fn active_city_keys(&self) -> Vec<&str> {
        self.cities
            .iter()
            .filter(|(_, city)| !city.eliminated)
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_uses_literal_seed_data() {
        let state = GameState::new();
        assert_eq!(state.money, 1000);
        assert_eq!(state.year, 1);
        assert!(!state.game_over);
        assert!(state.last_news.is_none());
        assert!(state.ledger.is_empty());

        let stockholm = state.city("stockholm").unwrap();
        assert_eq!(stockholm.name, "Stockholm");
        assert_eq!((stockholm.happiness, stockholm.co2), (60, 40));
        assert_eq!(stockholm.position, Position { x: 300, y: 180 });

        let malmo = state.city("malmo").unwrap();
        assert_eq!(malmo.name, "Malmö");
        assert_eq!((malmo.happiness, malmo.co2), (55, 50));
        assert_eq!(malmo.transportation, Transportation::Bicycle);
        assert_eq!(malmo.energy_source, EnergySource::Solar);
    }

    #[test]
    fn active_city_distinguishes_missing_from_eliminated() {
        let mut state = GameState::new();
        state.cities.get_mut("gothenburg").unwrap().eliminated = true;

        assert_eq!(
            state.active_city("uppsala"),
            Err(GameError::CityNotFound("uppsala".into()))
        );
        assert_eq!(
            state.active_city("gothenburg"),
            Err(GameError::CityEliminated("gothenburg".into()))
        );
        assert_eq!(state.active_city_keys(), vec!["malmo", "stockholm"]);
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let value = serde_json::to_value(GameState::new()).unwrap();
        assert_eq!(value["money"], 1000);
        assert!(value["current_round_changes"]["transportation"].is_object());
        assert_eq!(value["cities"]["stockholm"]["energy_source"], "solar");
        assert_eq!(value["cities"]["gothenburg"]["position"]["x"], 150);
        assert!(value["last_news"].is_null());
    }

    #[test]
    fn reset_discards_everything() {
        let mut state = GameState::new();
        state.money = -5;
        state.year = 9;
        state.game_over = true;
        state.cities.get_mut("malmo").unwrap().co2 = 100;
        state
            .ledger
            .transportation
            .insert("malmo".into(), Transportation::Car);

        state.reset();
        assert_eq!(state, GameState::new());
    }
}
