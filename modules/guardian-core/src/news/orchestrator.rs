//! Chooses between generated and preset news and normalises both into one
//! [`NewsEvent`].

use std::sync::Arc;

use chrono::Utc;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use ai_client::OpenAi;
use guardian_common::{Config, EffectVector, NewsCategory, NewsEvent, NewsSource, Severity};

use super::backend::OpenAiBackend;
use super::catalog::{NewsCatalog, PresetDraft};
use super::generator::{GenerationError, NewsGenerator};
use crate::state::GameState;

/// Maximum preset variance, in percent, either way.
pub const PRESET_VARIANCE_PERCENT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewsSettings {
    /// Chance in [0, 1] that an unforced request is generated.
    pub ai_probability: f64,
    pub effect_multiplier: f64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            ai_probability: 0.7,
            effect_multiplier: 1.0,
        }
    }
}

impl NewsSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ai_probability: config.news_ai_probability.clamp(0.0, 1.0),
            effect_multiplier: config.effect_multiplier,
        }
    }
}

/// What the caller asked for. A category takes precedence over a severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsRequest {
    pub force_ai: bool,
    pub category: Option<NewsCategory>,
    pub severity: Option<Severity>,
}

impl NewsRequest {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn forced_ai() -> Self {
        Self {
            force_ai: true,
            ..Self::default()
        }
    }

    pub fn of_category(category: NewsCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn of_severity(severity: Severity) -> Self {
        Self {
            severity: Some(severity),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewsStatistics {
    pub ai_enabled: u8,
    pub preset_news_count: usize,
    /// Integer percent.
    pub ai_probability: u32,
}

enum Draft {
    Generated(NewsEvent),
    Preset(PresetDraft),
}

#[derive(Clone)]
pub struct NewsOrchestrator {
    generator: Option<NewsGenerator>,
    catalog: NewsCatalog,
    settings: NewsSettings,
}

impl NewsOrchestrator {
    pub fn new(generator: Option<NewsGenerator>, settings: NewsSettings) -> Self {
        Self {
            generator,
            catalog: NewsCatalog,
            settings,
        }
    }

    /// Preset-only orchestrator.
    pub fn presets_only(settings: NewsSettings) -> Self {
        Self::new(None, settings)
    }

    /// Wire the OpenAI backend when a key is configured; preset-only otherwise.
    pub fn from_config(config: &Config) -> Self {
        let settings = NewsSettings::from_config(config);
        let Some(api_key) = config.openai_api_key.as_deref() else {
            info!("No OpenAI key configured, news will use presets only");
            return Self::presets_only(settings);
        };

        let mut ai = OpenAi::new(api_key, &config.openai_model).with_timeout(config.ai_timeout);
        if let Some(url) = &config.openai_base_url {
            ai = ai.with_base_url(url);
        }
        let backend = OpenAiBackend::new(ai, config.openai_temperature, config.openai_max_tokens);
        info!(
            model = backend.model(),
            ai_probability = settings.ai_probability,
            "News generator enabled"
        );

        Self::new(
            Some(NewsGenerator::new(Arc::new(backend), config.ai_timeout)),
            settings,
        )
    }

    pub fn ai_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Produce one news event. Never fails: any generation problem falls
    /// through to the preset catalog.
    pub async fn produce<R: Rng + Send + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
        request: &NewsRequest,
    ) -> NewsEvent {
        let use_ai = request.force_ai
            || (self.generator.is_some() && rng.random::<f64>() < self.settings.ai_probability);

        let generated = if use_ai {
            match self.try_generate(rng, request).await {
                Ok(event) => Some(Draft::Generated(event)),
                Err(e) => {
                    warn!(error = %e, "Generated news unavailable, falling back to presets");
                    None
                }
            }
        } else {
            None
        };

        let draft = match generated {
            Some(draft) => draft,
            None => Draft::Preset(self.pick_preset(state, rng, request)),
        };
        let event = self.finish(draft, rng);

        info!(
            category = %event.category,
            source = ?event.source,
            title = %event.title,
            target = event.target_city().unwrap_or("all"),
            "News produced"
        );
        event
    }

    /// Record the event as the latest news and apply its effects.
    pub fn publish(&self, state: &mut GameState, event: &NewsEvent) {
        state.last_news = Some(event.clone());
        state.apply_effects(&event.effects, event.target_city());
    }

    pub fn statistics(&self) -> NewsStatistics {
        NewsStatistics {
            ai_enabled: u8::from(self.ai_enabled()),
            preset_news_count: self.catalog.nationwide().len(),
            ai_probability: (self.settings.ai_probability * 100.0).round() as u32,
        }
    }

    /// Round-trip the configured backend once.
    pub async fn self_test(&self) -> bool {
        match &self.generator {
            Some(generator) => generator.probe().await,
            None => false,
        }
    }

    async fn try_generate<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
        request: &NewsRequest,
    ) -> Result<NewsEvent, GenerationError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::NotConfigured)?;

        match (request.category, request.severity) {
            (Some(category), _) => generator.generate(Some(category), rng).await,
            (None, Some(severity)) => generator.generate_by_severity(severity, rng).await,
            (None, None) => generator.generate(None, rng).await,
        }
    }

    fn pick_preset<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
        request: &NewsRequest,
    ) -> PresetDraft {
        let active = state.active_city_keys();
        let category = request
            .category
            .or_else(|| request.severity.map(|s| preset_category_for_severity(s, rng)));

        category
            .and_then(|c| self.catalog.pick_for_category(c, &active, rng))
            .unwrap_or_else(|| self.catalog.pick_default(&active, rng))
    }

    fn finish<R: Rng + ?Sized>(&self, draft: Draft, rng: &mut R) -> NewsEvent {
        let mut event = match draft {
            Draft::Generated(event) => event,
            Draft::Preset(preset) => NewsEvent {
                category: preset.event.category,
                title: preset.event.title.to_string(),
                description: preset.event.description.to_string(),
                effects: apply_variance(preset.effects(), rng),
                timestamp: Utc::now(),
                source: NewsSource::Preset,
            },
        };
        event.effects = apply_multiplier(event.effects, self.settings.effect_multiplier);
        event
    }
}

/// Preset category pairs differ from the generator's severity sets.
fn preset_category_for_severity<R: Rng + ?Sized>(severity: Severity, rng: &mut R) -> NewsCategory {
    let pair = match severity {
        Severity::Low => [
            NewsCategory::EntertainmentNews,
            NewsCategory::SustainabilityEvent,
        ],
        Severity::Medium => [NewsCategory::CityConstruction, NewsCategory::EconomyGrowth],
        Severity::High => [NewsCategory::NaturalDisaster, NewsCategory::EconomyDecline],
    };
    pair.choose(rng).copied().unwrap_or(pair[0])
}

/// Independent integer variance of up to ±20% per field.
fn apply_variance<R: Rng + ?Sized>(effects: EffectVector, rng: &mut R) -> EffectVector {
    effects.map_fields(|value| {
        let percent = rng.random_range(-PRESET_VARIANCE_PERCENT..=PRESET_VARIANCE_PERCENT);
        value * (100 + percent) / 100
    })
}

fn apply_multiplier(effects: EffectVector, multiplier: f64) -> EffectVector {
    if (multiplier - 1.0).abs() <= f64::EPSILON {
        return effects;
    }
    effects.map_fields(|value| (value as f64 * multiplier).trunc() as i64)
}
