//! One game session: state, news pipeline and the random source they share.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use guardian_common::{EffectVector, EnergySource, GameError, NewsEvent, Transportation};

use crate::ledger::CommitSummary;
use crate::news::{NewsOrchestrator, NewsRequest};
use crate::state::GameState;

/// Result of one round advance.
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    /// `None` when the commit itself ended the game.
    pub news: Option<NewsEvent>,
    pub year: u32,
    pub commit: CommitSummary,
}

pub struct Session {
    state: GameState,
    news: NewsOrchestrator,
    rng: StdRng,
}

impl Session {
    pub fn new(news: NewsOrchestrator) -> Self {
        Self {
            state: GameState::new(),
            news,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(news: NewsOrchestrator, seed: u64) -> Self {
        Self {
            state: GameState::new(),
            news,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn news(&self) -> &NewsOrchestrator {
        &self.news
    }

    /// Swap the news pipeline, e.g. after the API key changed.
    pub fn set_news(&mut self, news: NewsOrchestrator) {
        self.news = news;
    }

    pub fn select_transportation(
        &mut self,
        city_key: &str,
        mode: Transportation,
    ) -> Result<EffectVector, GameError> {
        self.ensure_running()?;
        self.state.select_transportation(city_key, mode)
    }

    pub fn select_energy(
        &mut self,
        city_key: &str,
        source: EnergySource,
    ) -> Result<EffectVector, GameError> {
        self.ensure_running()?;
        self.state.select_energy(city_key, source)
    }

    /// Commit pending selections, advance the year and publish one news event.
    ///
    /// If the commit ends the game the year stays put and no news is produced.
    pub async fn advance_round(&mut self) -> Result<RoundOutcome, GameError> {
        self.ensure_running()?;

        let commit = self.state.commit_round();
        if self.state.game_over {
            info!(year = self.state.year, "Round commit ended the game");
            return Ok(RoundOutcome {
                news: None,
                year: self.state.year,
                commit,
            });
        }

        self.state.year += 1;
        let event = self
            .news
            .produce(&self.state, &mut self.rng, &NewsRequest::any())
            .await;
        self.news.publish(&mut self.state, &event);

        info!(
            year = self.state.year,
            money = self.state.money,
            game_over = self.state.game_over,
            "Round advanced"
        );

        Ok(RoundOutcome {
            news: Some(event),
            year: self.state.year,
            commit,
        })
    }

    /// Out-of-round news: produced, recorded and applied immediately.
    pub async fn request_news(&mut self, request: NewsRequest) -> Result<NewsEvent, GameError> {
        self.ensure_running()?;
        let event = self
            .news
            .produce(&self.state, &mut self.rng, &request)
            .await;
        self.news.publish(&mut self.state, &event);
        Ok(event)
    }

    pub fn restart(&mut self) {
        self.state.reset();
        info!("Game restarted");
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.game_over {
            return Err(GameError::GameOver);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::NewsSettings;
    use guardian_common::NewsSource;

    fn preset_session(seed: u64) -> Session {
        Session::with_seed(NewsOrchestrator::presets_only(NewsSettings::default()), seed)
    }

    #[tokio::test]
    async fn advance_increments_year_and_publishes_news() {
        let mut session = preset_session(1);
        let outcome = session.advance_round().await.unwrap();

        assert_eq!(outcome.year, 2);
        assert_eq!(session.state().year, 2);
        let news = outcome.news.unwrap();
        assert_eq!(news.source, NewsSource::Preset);
        assert_eq!(session.state().last_news.as_ref(), Some(&news));
    }

    #[tokio::test]
    async fn commit_that_ends_the_game_skips_news_and_year() {
        let mut session = preset_session(2);
        session.state.money = 40;
        session
            .select_transportation("stockholm", Transportation::Car)
            .unwrap();

        let outcome = session.advance_round().await.unwrap();
        assert!(outcome.news.is_none());
        assert_eq!(outcome.year, 1);
        assert!(session.state().game_over);
        assert_eq!(session.state().money, -10);
    }

    #[tokio::test]
    async fn game_over_rejects_everything_but_restart() {
        let mut session = preset_session(3);
        session.state.game_over = true;
        let frozen = session.state().clone();

        assert_eq!(session.advance_round().await.unwrap_err(), GameError::GameOver);
        assert_eq!(
            session.request_news(NewsRequest::any()).await.unwrap_err(),
            GameError::GameOver
        );
        assert_eq!(
            session.select_energy("malmo", EnergySource::Wind),
            Err(GameError::GameOver)
        );
        assert_eq!(session.state(), &frozen);

        session.restart();
        assert!(!session.state().game_over);
        assert_eq!(session.state(), &GameState::new());
    }

    #[tokio::test]
    async fn requested_news_applies_immediately() {
        let mut session = preset_session(4);
        let event = session
            .request_news(NewsRequest::of_category(
                guardian_common::NewsCategory::NaturalDisaster,
            ))
            .await
            .unwrap();

        assert_eq!(session.state().money, 1000 + event.effects.money);
        assert_eq!(session.state().year, 1);
        assert_eq!(session.state().last_news.as_ref(), Some(&event));
    }
}
