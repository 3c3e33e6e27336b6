use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Lower and upper bound shared by happiness and CO2.
pub const ATTRIBUTE_MIN: i64 = 0;
pub const ATTRIBUTE_MAX: i64 = 100;

pub fn clamp_attribute(value: i64) -> i64 {
    value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
}

// --- Effects ---

/// Signed delta over money, happiness and CO2, optionally scoped to one city.
/// A zero field means "no effect" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectVector {
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub happiness: i64,
    #[serde(default)]
    pub co2: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl EffectVector {
    pub const fn new(money: i64, happiness: i64, co2: i64) -> Self {
        Self {
            money,
            happiness,
            co2,
            city: None,
        }
    }

    pub fn for_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Field-wise sum. The target city of `self` is kept.
    pub fn plus(&self, other: &EffectVector) -> EffectVector {
        EffectVector {
            money: self.money + other.money,
            happiness: self.happiness + other.happiness,
            co2: self.co2 + other.co2,
            city: self.city.clone(),
        }
    }

    /// Applies `f` to each numeric field independently.
    pub fn map_fields(mut self, mut f: impl FnMut(i64) -> i64) -> EffectVector {
        self.money = f(self.money);
        self.happiness = f(self.happiness);
        self.co2 = f(self.co2);
        self
    }
}

// --- Transportation & energy tables ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transportation {
    Bicycle,
    Scooter,
    Car,
    ElectronicCar,
    Bus,
    ElectronicBus,
    Train,
    Airplane,
    Potogan,
}

impl Transportation {
    pub const ALL: [Transportation; 9] = [
        Transportation::Bicycle,
        Transportation::Scooter,
        Transportation::Car,
        Transportation::ElectronicCar,
        Transportation::Bus,
        Transportation::ElectronicBus,
        Transportation::Train,
        Transportation::Airplane,
        Transportation::Potogan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transportation::Bicycle => "bicycle",
            Transportation::Scooter => "scooter",
            Transportation::Car => "car",
            Transportation::ElectronicCar => "electronic_car",
            Transportation::Bus => "bus",
            Transportation::ElectronicBus => "electronic_bus",
            Transportation::Train => "train",
            Transportation::Airplane => "airplane",
            Transportation::Potogan => "potogan",
        }
    }

    /// Fixed per-change effect. These values are the game balance.
    pub const fn effect(&self) -> EffectVector {
        match self {
            Transportation::Bicycle => EffectVector::new(-5, 3, -8),
            Transportation::Scooter => EffectVector::new(-10, 2, -5),
            Transportation::Car => EffectVector::new(-50, -5, 15),
            Transportation::ElectronicCar => EffectVector::new(-70, 2, 5),
            Transportation::Bus => EffectVector::new(-20, -2, 8),
            Transportation::ElectronicBus => EffectVector::new(-30, 1, 3),
            Transportation::Train => EffectVector::new(-25, 4, 4),
            Transportation::Airplane => EffectVector::new(-150, 6, 40),
            Transportation::Potogan => EffectVector::new(-200, 10, -10),
        }
    }
}

impl fmt::Display for Transportation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transportation {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transportation::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| GameError::UnknownTransportation(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Mining,
    Water,
    Nuclear,
    Solar,
    Wind,
    Automic,
    AntiMaterial,
}

impl EnergySource {
    pub const ALL: [EnergySource; 7] = [
        EnergySource::Mining,
        EnergySource::Water,
        EnergySource::Nuclear,
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Automic,
        EnergySource::AntiMaterial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySource::Mining => "mining",
            EnergySource::Water => "water",
            EnergySource::Nuclear => "nuclear",
            EnergySource::Solar => "solar",
            EnergySource::Wind => "wind",
            EnergySource::Automic => "automic",
            EnergySource::AntiMaterial => "anti_material",
        }
    }

    pub const fn effect(&self) -> EffectVector {
        match self {
            EnergySource::Mining => EffectVector::new(-30, -10, 20),
            EnergySource::Water => EffectVector::new(-50, 5, -8),
            EnergySource::Nuclear => EffectVector::new(-100, -5, -15),
            EnergySource::Solar => EffectVector::new(-80, 8, -12),
            EnergySource::Wind => EffectVector::new(-70, 7, -10),
            EnergySource::Automic => EffectVector::new(-150, 3, -20),
            EnergySource::AntiMaterial => EffectVector::new(-300, 15, -30),
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergySource {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnergySource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| GameError::UnknownEnergy(s.to_string()))
    }
}

// --- Cities ---

/// Map coordinates. Opaque to the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// Always within [0, 100].
    pub happiness: i64,
    /// Always within [0, 100].
    pub co2: i64,
    pub transportation: Transportation,
    pub energy_source: EnergySource,
    /// One-way: once set the city is out of the game.
    pub eliminated: bool,
    pub position: Position,
}

impl City {
    pub fn should_be_eliminated(&self) -> bool {
        self.happiness <= ATTRIBUTE_MIN || self.co2 >= ATTRIBUTE_MAX
    }
}

// --- News ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    NaturalDisaster,
    #[serde(alias = "construction")]
    CityConstruction,
    #[serde(alias = "economic_growth")]
    EconomyGrowth,
    #[serde(alias = "economic_decline")]
    EconomyDecline,
    #[serde(alias = "sustainability")]
    SustainabilityEvent,
    #[serde(alias = "entertainment")]
    EntertainmentNews,
    LocalEvent,
    LocalDisaster,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 8] = [
        NewsCategory::NaturalDisaster,
        NewsCategory::CityConstruction,
        NewsCategory::EconomyGrowth,
        NewsCategory::EconomyDecline,
        NewsCategory::SustainabilityEvent,
        NewsCategory::EntertainmentNews,
        NewsCategory::LocalEvent,
        NewsCategory::LocalDisaster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::NaturalDisaster => "natural_disaster",
            NewsCategory::CityConstruction => "city_construction",
            NewsCategory::EconomyGrowth => "economy_growth",
            NewsCategory::EconomyDecline => "economy_decline",
            NewsCategory::SustainabilityEvent => "sustainability_event",
            NewsCategory::EntertainmentNews => "entertainment_news",
            NewsCategory::LocalEvent => "local_event",
            NewsCategory::LocalDisaster => "local_disaster",
        }
    }

    fn alias(&self) -> Option<&'static str> {
        match self {
            NewsCategory::CityConstruction => Some("construction"),
            NewsCategory::EconomyGrowth => Some("economic_growth"),
            NewsCategory::EconomyDecline => Some("economic_decline"),
            NewsCategory::SustainabilityEvent => Some("sustainability"),
            NewsCategory::EntertainmentNews => Some("entertainment"),
            _ => None,
        }
    }

    /// Human-readable label, used for fallback headlines.
    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::NaturalDisaster => "Natural Disaster",
            NewsCategory::CityConstruction => "City Construction",
            NewsCategory::EconomyGrowth => "Economic Growth",
            NewsCategory::EconomyDecline => "Economic Decline",
            NewsCategory::SustainabilityEvent => "Sustainability",
            NewsCategory::EntertainmentNews => "Entertainment",
            NewsCategory::LocalEvent => "Local Event",
            NewsCategory::LocalDisaster => "Local Disaster",
        }
    }

    /// City-scoped archetypes only exist in the preset catalog.
    pub fn is_local(&self) -> bool {
        matches!(self, NewsCategory::LocalEvent | NewsCategory::LocalDisaster)
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.alias() == Some(s))
            .ok_or_else(|| GameError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl FromStr for Severity {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(GameError::InvalidSeverity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsSource {
    Generated,
    Preset,
}

/// A news item as it leaves the orchestrator. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    #[serde(rename = "type")]
    pub category: NewsCategory,
    pub title: String,
    pub description: String,
    pub effects: EffectVector,
    pub timestamp: DateTime<Utc>,
    pub source: NewsSource,
}

impl NewsEvent {
    pub fn target_city(&self) -> Option<&str> {
        self.effects.city.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tables_round_trip_through_strings() {
        for mode in Transportation::ALL {
            assert_eq!(mode.as_str().parse::<Transportation>().unwrap(), mode);
            assert_eq!(
                serde_json::to_value(mode).unwrap(),
                serde_json::json!(mode.as_str())
            );
        }
        for source in EnergySource::ALL {
            assert_eq!(source.as_str().parse::<EnergySource>().unwrap(), source);
        }
    }

    #[test]
    fn unknown_modes_are_validation_errors() {
        assert_eq!(
            "hovercraft".parse::<Transportation>(),
            Err(GameError::UnknownTransportation("hovercraft".into()))
        );
        assert_eq!(
            "coal".parse::<EnergySource>(),
            Err(GameError::UnknownEnergy("coal".into()))
        );
    }

    #[test]
    fn balance_tables_are_literal() {
        assert_eq!(Transportation::Car.effect(), EffectVector::new(-50, -5, 15));
        assert_eq!(Transportation::Airplane.effect(), EffectVector::new(-150, 6, 40));
        assert_eq!(Transportation::Potogan.effect(), EffectVector::new(-200, 10, -10));
        assert_eq!(EnergySource::Solar.effect(), EffectVector::new(-80, 8, -12));
        assert_eq!(
            EnergySource::AntiMaterial.effect(),
            EffectVector::new(-300, 15, -30)
        );
        assert_eq!(EnergySource::Mining.effect(), EffectVector::new(-30, -10, 20));
    }

    #[test]
    fn category_parsing_accepts_short_aliases() {
        assert_eq!(
            "construction".parse::<NewsCategory>().unwrap(),
            NewsCategory::CityConstruction
        );
        assert_eq!(
            "economy_decline".parse::<NewsCategory>().unwrap(),
            NewsCategory::EconomyDecline
        );
        assert!(matches!(
            "weather".parse::<NewsCategory>(),
            Err(GameError::UnknownCategory(_))
        ));
    }

    #[test]
    fn severity_rejects_unknown_levels() {
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(
            "extreme".parse::<Severity>(),
            Err(GameError::InvalidSeverity("extreme".into()))
        );
    }

    #[test]
    fn effect_vector_serializes_sparse_city() {
        let broadcast = serde_json::to_value(EffectVector::new(-200, -10, 0)).unwrap();
        assert!(broadcast.get("city").is_none());

        let scoped = serde_json::to_value(EffectVector::new(0, 12, 0).for_city("malmo")).unwrap();
        assert_eq!(scoped["city"], "malmo");

        let parsed: EffectVector = serde_json::from_str(r#"{"co2": -15}"#).unwrap();
        assert_eq!(parsed, EffectVector::new(0, 0, -15));
    }

    #[test]
    fn map_fields_touches_each_dimension() {
        let doubled = EffectVector::new(1, -2, 3).for_city("malmo").map_fields(|v| v * 2);
        assert_eq!(doubled, EffectVector::new(2, -4, 6).for_city("malmo"));
    }
}
