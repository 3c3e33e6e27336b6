use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use guardian_common::{EffectVector, NewsCategory, NewsEvent, NewsSource, Severity};

use super::backend::TextBackend;
use super::prompt::{user_prompt, SYSTEM_PROMPT};
use super::repair::{repair, NewsCopy};

/// Chance that a synthesised effect value is distorted.
pub const DISTORTION_PROBABILITY: f64 = 0.2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no text backend configured")]
    NotConfigured,

    #[error("category {0} cannot be generated")]
    UnsupportedCategory(NewsCategory),
}

/// Closed value ranges for one generatable category.
#[derive(Debug)]
pub struct CategoryProfile {
    pub category: NewsCategory,
    pub money: (i64, i64),
    pub happiness: (i64, i64),
    pub co2: (i64, i64),
}

static PROFILES: [CategoryProfile; 6] = [
    CategoryProfile {
        category: NewsCategory::NaturalDisaster,
        money: (-300, -100),
        happiness: (-15, -5),
        co2: (-5, 5),
    },
    CategoryProfile {
        category: NewsCategory::CityConstruction,
        money: (-200, -50),
        happiness: (3, 12),
        co2: (2, 8),
    },
    CategoryProfile {
        category: NewsCategory::EconomyGrowth,
        money: (150, 400),
        happiness: (5, 12),
        co2: (3, 10),
    },
    CategoryProfile {
        category: NewsCategory::EconomyDecline,
        money: (-350, -150),
        happiness: (-12, -4),
        co2: (-5, 0),
    },
    CategoryProfile {
        category: NewsCategory::SustainabilityEvent,
        money: (-100, 50),
        happiness: (0, 8),
        co2: (-25, -5),
    },
    CategoryProfile {
        category: NewsCategory::EntertainmentNews,
        money: (-50, 100),
        happiness: (8, 20),
        co2: (2, 8),
    },
];

pub fn category_profile(category: NewsCategory) -> Option<&'static CategoryProfile> {
    PROFILES.iter().find(|p| p.category == category)
}

/// Random effects for a category: a uniform draw per dimension, sometimes
/// distorted into a halved reversal or a 1.5x amplification.
pub fn synthesize_effects<R: Rng + ?Sized>(profile: &CategoryProfile, rng: &mut R) -> EffectVector {
    EffectVector::new(
        roll(profile.money, rng),
        roll(profile.happiness, rng),
        roll(profile.co2, rng),
    )
}

fn roll<R: Rng + ?Sized>((low, high): (i64, i64), rng: &mut R) -> i64 {
    let base = rng.random_range(low..=high);
    if rng.random::<f64>() >= DISTORTION_PROBABILITY {
        return base;
    }
    if rng.random_bool(0.5) {
        (-base).div_euclid(2)
    } else {
        base * 3 / 2
    }
}

/// Generatable category for a severity level.
pub fn category_for_severity<R: Rng + ?Sized>(severity: Severity, rng: &mut R) -> NewsCategory {
    let choices: &[NewsCategory] = match severity {
        Severity::Low => &[
            NewsCategory::EntertainmentNews,
            NewsCategory::SustainabilityEvent,
        ],
        Severity::Medium => &[NewsCategory::CityConstruction],
        Severity::High => &[
            NewsCategory::NaturalDisaster,
            NewsCategory::EconomyGrowth,
            NewsCategory::EconomyDecline,
        ],
    };
    choices
        .choose(rng)
        .copied()
        .unwrap_or(NewsCategory::CityConstruction)
}

/// Produces news copy from a text backend and effects from local ranges.
#[derive(Clone)]
pub struct NewsGenerator {
    backend: Arc<dyn TextBackend>,
    timeout: Duration,
}

impl NewsGenerator {
    pub fn new(backend: Arc<dyn TextBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Generate one broadcast event. Backend problems only degrade the copy;
    /// the call fails only for categories without a profile.
    pub async fn generate<R: Rng + Send + ?Sized>(
        &self,
        category: Option<NewsCategory>,
        rng: &mut R,
    ) -> Result<NewsEvent, GenerationError> {
        let profile = match category {
            Some(category) => {
                category_profile(category).ok_or(GenerationError::UnsupportedCategory(category))?
            }
            None => &PROFILES[rng.random_range(0..PROFILES.len())],
        };
        let effects = synthesize_effects(profile, rng);

        let copy = self.write_copy(profile.category).await;

        Ok(NewsEvent {
            category: profile.category,
            title: copy.title,
            description: copy.description,
            effects,
            timestamp: Utc::now(),
            source: NewsSource::Generated,
        })
    }

    pub async fn generate_by_severity<R: Rng + Send + ?Sized>(
        &self,
        severity: Severity,
        rng: &mut R,
    ) -> Result<NewsEvent, GenerationError> {
        let category = category_for_severity(severity, rng);
        self.generate(Some(category), rng).await
    }

    /// True only when the backend actually answers within the timeout.
    pub async fn probe(&self) -> bool {
        let user = user_prompt(NewsCategory::SustainabilityEvent);
        match tokio::time::timeout(self.timeout, self.backend.complete(SYSTEM_PROMPT, &user)).await
        {
            Ok(Ok(reply)) => {
                let (copy, strategy) = repair(&reply, NewsCategory::SustainabilityEvent);
                info!(
                    backend = self.backend.name(),
                    title = %copy.title,
                    ?strategy,
                    "News backend probe succeeded"
                );
                true
            }
            Ok(Err(e)) => {
                warn!(backend = self.backend.name(), error = %e, "News backend probe failed");
                false
            }
            Err(_) => {
                warn!(
                    backend = self.backend.name(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "News backend probe timed out"
                );
                false
            }
        }
    }

    async fn write_copy(&self, category: NewsCategory) -> NewsCopy {
        let user = user_prompt(category);
        match tokio::time::timeout(self.timeout, self.backend.complete(SYSTEM_PROMPT, &user)).await
        {
            Ok(Ok(reply)) => {
                let (copy, strategy) = repair(&reply, category);
                debug!(%category, ?strategy, "Repaired news copy");
                copy
            }
            Ok(Err(e)) => {
                warn!(
                    %category,
                    backend = self.backend.name(),
                    error = %e,
                    "News backend failed, using fallback copy"
                );
                NewsCopy::fallback(category)
            }
            Err(_) => {
                warn!(
                    %category,
                    backend = self.backend.name(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "News backend timed out, using fallback copy"
                );
                NewsCopy::fallback(category)
            }
        }
    }
}
