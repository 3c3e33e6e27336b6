use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // AI / LLM
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub openai_max_tokens: u32,
    pub openai_temperature: f32,
    pub ai_timeout: Duration,

    // News balance
    /// Chance in [0, 1] that an unforced news request goes to the generator.
    pub news_ai_probability: f64,
    /// Difficulty multiplier applied to every news effect.
    pub effect_multiplier: f64,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_base_url: None,
            openai_max_tokens: 300,
            openai_temperature: 0.8,
            ai_timeout: Duration::from_secs(15),
            news_ai_probability: 0.7,
            effect_multiplier: 1.0,
            web_host: "0.0.0.0".to_string(),
            web_port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    /// Missing or malformed values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: env::var("OPENAI_BASE_URL").ok().filter(|u| !u.is_empty()),
            openai_max_tokens: parsed_env("OPENAI_MAX_TOKENS", defaults.openai_max_tokens),
            openai_temperature: parsed_env("OPENAI_TEMPERATURE", defaults.openai_temperature),
            ai_timeout: Duration::from_secs(parsed_env(
                "AI_TIMEOUT_SECS",
                defaults.ai_timeout.as_secs(),
            )),
            news_ai_probability: finite_env("NEWS_AI_PROBABILITY", defaults.news_ai_probability)
                .clamp(0.0, 1.0),
            effect_multiplier: finite_env("EFFECT_MULTIPLIER", defaults.effect_multiplier),
            web_host: env::var("WEB_HOST").unwrap_or(defaults.web_host),
            web_port: parsed_env("WEB_PORT", defaults.web_port),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Replace the generator credentials at runtime.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let key = api_key.into().trim().to_string();
        self.openai_api_key = if key.is_empty() { None } else { Some(key) };
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parsed_env<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring malformed config value");
            default
        }),
        Err(_) => default,
    }
}

/// `NaN` and the infinities parse as `f64` but are never usable settings.
fn finite_env(key: &str, default: f64) -> f64 {
    finite_or(key, parsed_env(key, default), default)
}

fn finite_or(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(key, value, "Ignoring non-finite config value");
        default
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
