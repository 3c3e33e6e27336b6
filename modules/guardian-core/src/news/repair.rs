//! Recovers `{title, description}` from whatever the backend sent back.
//!
//! Strategies run in a fixed order and the first one that yields copy wins.
//! The last strategy always succeeds, so repair never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use ai_client::{strip_code_blocks, truncate_to_char_boundary};
use guardian_common::NewsCategory;

const MAX_TITLE_BYTES: usize = 120;
const MAX_DESCRIPTION_BYTES: usize = 600;
const PLACEHOLDER_DESCRIPTION: &str = "Details to follow.";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title"\s*:\s*"([^"]+)""#).expect("valid regex"));
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""description"\s*:\s*"([^"]+)""#).expect("valid regex"));

/// Final headline and body of a generated news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsCopy {
    pub title: String,
    pub description: String,
}

impl NewsCopy {
    /// Copy used when the backend could not be reached at all.
    pub fn fallback(category: NewsCategory) -> Self {
        Self {
            title: generic_title(category),
            description: format!("System-generated {} news event.", category.label()),
        }
    }
}

fn generic_title(category: NewsCategory) -> String {
    format!("{} Event", category.label())
}

#[derive(Debug, Default, Deserialize)]
struct RawCopy {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// The reply is already the JSON object.
    Strict,
    /// JSON wrapped in a markdown code fence.
    FenceStripped,
    /// JSON embedded in prose: first `{` through last `}`.
    BraceExtracted,
    /// Quoted fields pulled out of malformed JSON.
    FieldRegex,
    /// Nothing usable; generic copy.
    Placeholder,
}

impl RepairStrategy {
    pub const CHAIN: [RepairStrategy; 5] = [
        RepairStrategy::Strict,
        RepairStrategy::FenceStripped,
        RepairStrategy::BraceExtracted,
        RepairStrategy::FieldRegex,
        RepairStrategy::Placeholder,
    ];

    fn attempt(&self, raw: &str) -> Option<RawCopy> {
        match self {
            RepairStrategy::Strict => serde_json::from_str(raw.trim()).ok(),
            RepairStrategy::FenceStripped => {
                if !raw.contains("```") {
                    return None;
                }
                serde_json::from_str(strip_code_blocks(raw)).ok()
            }
            RepairStrategy::BraceExtracted => {
                let start = raw.find('{')?;
                let end = raw.rfind('}')?;
                if end <= start {
                    return None;
                }
                serde_json::from_str(&raw[start..=end]).ok()
            }
            RepairStrategy::FieldRegex => {
                let field = |re: &Regex| {
                    re.captures(raw)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.as_str().to_string())
                };
                let title = field(&TITLE_RE);
                let description = field(&DESCRIPTION_RE);
                if title.is_none() && description.is_none() {
                    return None;
                }
                Some(RawCopy {
                    title: title.unwrap_or_default(),
                    description: description.unwrap_or_default(),
                })
            }
            RepairStrategy::Placeholder => Some(RawCopy::default()),
        }
    }
}

/// Run the chain over `raw` and return the normalised copy together with the
/// strategy that produced it.
pub fn repair(raw: &str, category: NewsCategory) -> (NewsCopy, RepairStrategy) {
    let (parsed, strategy) = RepairStrategy::CHAIN
        .iter()
        .find_map(|strategy| strategy.attempt(raw).map(|copy| (copy, *strategy)))
        .unwrap_or_else(|| (RawCopy::default(), RepairStrategy::Placeholder));

    let title = parsed.title.trim();
    let description = parsed.description.trim();

    let copy = NewsCopy {
        title: if title.is_empty() {
            generic_title(category)
        } else {
            truncate_to_char_boundary(title, MAX_TITLE_BYTES).to_string()
        },
        description: if description.is_empty() {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            truncate_to_char_boundary(description, MAX_DESCRIPTION_BYTES).to_string()
        },
    };
    (copy, strategy)
}
