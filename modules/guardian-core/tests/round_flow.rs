//! Full rounds through the public session API with scripted backends.

use std::sync::Arc;
use std::time::Duration;

use guardian_common::{EnergySource, GameError, NewsCategory, NewsSource, Severity, Transportation};
use guardian_core::testing::{FailingBackend, ScriptedBackend};
use guardian_core::{NewsGenerator, NewsOrchestrator, NewsRequest, NewsSettings, Session};

fn settings(ai_probability: f64) -> NewsSettings {
    NewsSettings {
        ai_probability,
        effect_multiplier: 1.0,
    }
}

fn scripted_session(reply: &str, ai_probability: f64) -> (Session, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::new(reply));
    let generator = NewsGenerator::new(backend.clone(), Duration::from_millis(500));
    let orchestrator = NewsOrchestrator::new(Some(generator), settings(ai_probability));
    (Session::with_seed(orchestrator, 17), backend)
}

#[tokio::test]
async fn selections_only_land_on_commit() {
    let (mut session, _) = scripted_session("{}", 0.0);

    let preview = session
        .select_transportation("gothenburg", Transportation::Potogan)
        .unwrap();
    assert_eq!(preview.money, -200 - 80);
    assert_eq!(session.state().money, 1000);
    assert_eq!(
        session.state().ledger.projected_effects["gothenburg"],
        preview
    );

    let outcome = session.advance_round().await.unwrap();
    assert_eq!(outcome.commit.transport_changes, 1);
    assert_eq!(outcome.commit.money_delta, -200);
    assert_eq!(
        session.state().cities["gothenburg"].transportation,
        Transportation::Potogan
    );
    assert!(session.state().ledger.is_empty());

    let news = outcome.news.unwrap();
    assert_eq!(session.state().money, 800 + news.effects.money);
}

#[tokio::test]
async fn repeating_a_committed_selection_costs_nothing() {
    let (mut session, _) = scripted_session("{}", 0.0);

    session.select_energy("malmo", EnergySource::Wind).unwrap();
    let first = session.advance_round().await.unwrap();
    assert_eq!(first.commit.energy_changes, 1);

    session.select_energy("malmo", EnergySource::Wind).unwrap();
    let second = session.advance_round().await.unwrap();
    assert_eq!(second.commit.energy_changes, 0);
    assert_eq!(second.commit.money_delta, 0);
    assert_eq!(second.year, 3);
}

#[tokio::test]
async fn generated_news_flows_through_the_round() {
    let (mut session, backend) = scripted_session(
        "```json\n{\"title\": \"Heatwave in Umeå\", \"description\": \"Record temperatures.\"}\n```",
        1.0,
    );

    let outcome = session.advance_round().await.unwrap();
    let news = outcome.news.unwrap();
    assert_eq!(news.source, NewsSource::Generated);
    assert_eq!(news.title, "Heatwave in Umeå");
    assert_eq!(backend.calls(), 1);
    assert_eq!(session.state().last_news.as_ref(), Some(&news));
}

#[tokio::test]
async fn forced_requests_survive_a_dead_backend() {
    let generator = NewsGenerator::new(Arc::new(FailingBackend), Duration::from_millis(200));
    let mut session = Session::with_seed(NewsOrchestrator::new(Some(generator), settings(0.0)), 5);

    let news = session.request_news(NewsRequest::forced_ai()).await.unwrap();
    assert_eq!(news.source, NewsSource::Generated);
    assert!(news.title.ends_with(" Event"));

    let severe = session
        .request_news(NewsRequest::of_severity(Severity::Medium))
        .await
        .unwrap();
    assert!(matches!(
        severe.category,
        NewsCategory::CityConstruction | NewsCategory::EconomyGrowth
    ));
    assert_eq!(severe.source, NewsSource::Preset);
}

#[tokio::test]
async fn bankruptcy_freezes_the_session_until_restart() {
    let (mut session, _) = scripted_session("{}", 0.0);

    for city in ["stockholm", "gothenburg", "malmo"] {
        session
            .select_energy(city, EnergySource::AntiMaterial)
            .unwrap();
        session
            .select_transportation(city, Transportation::Airplane)
            .unwrap();
    }
    let outcome = session.advance_round().await.unwrap();
    assert!(outcome.news.is_none());
    assert!(session.state().game_over);
    assert_eq!(session.state().money, 1000 - 3 * 450);

    assert_eq!(
        session
            .select_transportation("stockholm", Transportation::Bus)
            .unwrap_err(),
        GameError::GameOver
    );
    assert_eq!(
        session.advance_round().await.unwrap_err(),
        GameError::GameOver
    );

    session.restart();
    assert_eq!(session.state().money, 1000);
    assert_eq!(session.state().year, 1);
    assert!(session.state().last_news.is_none());
    assert!(session
        .state()
        .cities
        .values()
        .all(|city| !city.eliminated && city.transportation == Transportation::Bicycle));
}
