pub mod backend;
pub mod catalog;
pub mod generator;
pub mod orchestrator;
pub mod prompt;
pub mod repair;

pub use backend::{OpenAiBackend, TextBackend};
pub use catalog::{NewsCatalog, PresetDraft, PresetEvent};
pub use generator::{GenerationError, NewsGenerator};
pub use orchestrator::{NewsOrchestrator, NewsRequest, NewsSettings, NewsStatistics};
pub use repair::{NewsCopy, RepairStrategy};
