//! Effect application, elimination and the game-over predicate.

use tracing::{debug, info};

use guardian_common::{clamp_attribute, City, EffectVector};

use crate::state::GameState;

/// Shift a city's happiness and CO2, clamping each into range.
/// A zero delta leaves the field untouched.
pub(crate) fn shift_city(city: &mut City, happiness: i64, co2: i64) {
    if happiness != 0 {
        city.happiness = clamp_attribute(city.happiness + happiness);
    }
    if co2 != 0 {
        city.co2 = clamp_attribute(city.co2 + co2);
    }
}

impl GameState {
    /// Apply an effect vector to money and to the resolved target cities.
    ///
    /// Target resolution: `explicit_city` when it names a known city, else the
    /// vector's own `city` when known, else every city. Unknown keys fall
    /// through silently. Eliminated cities never change. Once the game is over
    /// this is a no-op.
    pub fn apply_effects(&mut self, effects: &EffectVector, explicit_city: Option<&str>) {
        if self.game_over {
            debug!("Ignoring effects after game over");
            return;
        }

        if effects.money != 0 {
            self.money += effects.money;
        }

        let targets = self.resolve_targets(effects, explicit_city);
        for key in &targets {
            if let Some(city) = self.cities.get_mut(key) {
                if !city.eliminated {
                    shift_city(city, effects.happiness, effects.co2);
                }
            }
        }

        debug!(
            money = effects.money,
            happiness = effects.happiness,
            co2 = effects.co2,
            targets = targets.len(),
            "Applied effects"
        );

        self.sweep_eliminations();
        self.evaluate_game_over();
    }

    fn resolve_targets(&self, effects: &EffectVector, explicit_city: Option<&str>) -> Vec<String> {
        let scoped = explicit_city
            .filter(|key| self.cities.contains_key(*key))
            .or_else(|| {
                effects
                    .city
                    .as_deref()
                    .filter(|key| self.cities.contains_key(*key))
            });

        match scoped {
            Some(key) => vec![key.to_string()],
            None => self.cities.keys().cloned().collect(),
        }
    }

    /// Flag every city that has bottomed out on happiness or maxed out on CO2.
    /// Returns how many cities were newly eliminated.
    pub fn sweep_eliminations(&mut self) -> usize {
        let mut newly_eliminated = 0;
        for (key, city) in self.cities.iter_mut() {
            if !city.eliminated && city.should_be_eliminated() {
                city.eliminated = true;
                newly_eliminated += 1;
                info!(
                    city = %key,
                    happiness = city.happiness,
                    co2 = city.co2,
                    "City eliminated"
                );
            }
        }
        newly_eliminated
    }

    /// Sets `game_over` when money is gone or every city is out. Idempotent.
    pub fn evaluate_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }

        let bankrupt = self.money <= 0;
        let all_eliminated = self.cities.values().all(|city| city.eliminated);

        if bankrupt || all_eliminated {
            self.game_over = true;
            info!(
                money = self.money,
                year = self.year,
                bankrupt,
                all_eliminated,
                "Game over"
            );
        }
        self.game_over
    }
}
