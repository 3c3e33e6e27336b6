//! Per-round pending selections: preview on selection, apply on commit.
//!
//! Effects land only at commit and only when the committed mode actually
//! changes, so cycling through previews accumulates nothing.

use serde::Serialize;
use tracing::{debug, info};

use guardian_common::{EffectVector, EnergySource, GameError, Transportation};

use crate::effects::shift_city;
use crate::state::{GameState, RoundLedger};

impl RoundLedger {
    /// Flat-table sum of the given selections. The stored preview for the
    /// city is replaced, never merged.
    pub fn preview(
        &mut self,
        city_key: &str,
        transport: Option<Transportation>,
        energy: Option<EnergySource>,
    ) -> EffectVector {
        let mut effects = EffectVector::default();
        if let Some(mode) = transport {
            effects = effects.plus(&mode.effect());
        }
        if let Some(source) = energy {
            effects = effects.plus(&source.effect());
        }

        self.projected_effects
            .insert(city_key.to_string(), effects.clone());
        effects
    }
}

/// What a round commit actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub transport_changes: usize,
    pub energy_changes: usize,
    pub money_delta: i64,
}

impl GameState {
    /// Record a pending transportation change and return its preview.
    /// The energy half of the preview is this round's pending energy, else the
    /// city's committed source.
    pub fn select_transportation(
        &mut self,
        city_key: &str,
        mode: Transportation,
    ) -> Result<EffectVector, GameError> {
        let committed_energy = self.active_city(city_key)?.energy_source;

        self.ledger
            .transportation
            .insert(city_key.to_string(), mode);

        let energy = self
            .ledger
            .energy_source
            .get(city_key)
            .copied()
            .unwrap_or(committed_energy);

        debug!(city = city_key, %mode, "Pending transportation change");
        Ok(self.ledger.preview(city_key, Some(mode), Some(energy)))
    }

    pub fn select_energy(
        &mut self,
        city_key: &str,
        source: EnergySource,
    ) -> Result<EffectVector, GameError> {
        let committed_transport = self.active_city(city_key)?.transportation;

        self.ledger
            .energy_source
            .insert(city_key.to_string(), source);

        let transport = self
            .ledger
            .transportation
            .get(city_key)
            .copied()
            .unwrap_or(committed_transport);

        debug!(city = city_key, %source, "Pending energy change");
        Ok(self.ledger.preview(city_key, Some(transport), Some(source)))
    }

    /// Apply this round's pending selections and clear the ledger.
    ///
    /// Each selection that differs from the committed mode applies its fixed
    /// vector once: happiness/CO2 straight onto the city, money into a single
    /// total added at the end. The ledger is cleared whether or not anything
    /// applied.
    pub fn commit_round(&mut self) -> CommitSummary {
        let ledger = std::mem::take(&mut self.ledger);
        let mut summary = CommitSummary::default();

        if self.game_over {
            return summary;
        }

        for (key, mode) in &ledger.transportation {
            let Some(city) = self.cities.get_mut(key) else {
                continue;
            };
            if city.eliminated || city.transportation == *mode {
                continue;
            }
            let effect = mode.effect();
            summary.money_delta += effect.money;
            shift_city(city, effect.happiness, effect.co2);
            city.transportation = *mode;
            summary.transport_changes += 1;
        }

        for (key, source) in &ledger.energy_source {
            let Some(city) = self.cities.get_mut(key) else {
                continue;
            };
            if city.eliminated || city.energy_source == *source {
                continue;
            }
            let effect = source.effect();
            summary.money_delta += effect.money;
            shift_city(city, effect.happiness, effect.co2);
            city.energy_source = *source;
            summary.energy_changes += 1;
        }

        self.money += summary.money_delta;

        info!(
            transport_changes = summary.transport_changes,
            energy_changes = summary.energy_changes,
            money_delta = summary.money_delta,
            "Committed round changes"
        );

        self.sweep_eliminations();
        self.evaluate_game_over();
        summary
    }
}
