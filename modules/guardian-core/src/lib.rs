//! Round resolution, effects engine and news generation for the city game.
//!
//! All operations take the session state explicitly; nothing here owns a
//! global. The HTTP layer holds one [`Session`] and serializes access to it.

pub mod effects;
pub mod ledger;
pub mod news;
pub mod session;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use ledger::CommitSummary;
pub use news::{
    NewsCatalog, NewsGenerator, NewsOrchestrator, NewsRequest, NewsSettings, NewsStatistics,
    OpenAiBackend, TextBackend,
};
pub use session::{RoundOutcome, Session};
pub use state::{GameState, RoundLedger, STARTING_MONEY};
