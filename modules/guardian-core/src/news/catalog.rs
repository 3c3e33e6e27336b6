//! Fixed preset news: a nation-wide list plus two archetypes per city.

use rand::seq::IndexedRandom;
use rand::Rng;

use guardian_common::{EffectVector, NewsCategory};

/// Share of default picks that come from the nation-wide list.
pub const NATIONWIDE_SHARE: f64 = 0.7;

#[derive(Debug)]
pub struct PresetEvent {
    pub category: NewsCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub effects: EffectVector,
    /// Fixed target, if the event only concerns one city.
    pub city: Option<&'static str>,
}

/// The positive and negative archetype of one city.
#[derive(Debug)]
pub struct CityNews {
    pub key: &'static str,
    pub local_event: PresetEvent,
    pub local_disaster: PresetEvent,
}

impl CityNews {
    fn archetype(&self, category: NewsCategory) -> Option<&PresetEvent> {
        match category {
            NewsCategory::LocalEvent => Some(&self.local_event),
            NewsCategory::LocalDisaster => Some(&self.local_disaster),
            _ => None,
        }
    }
}

static NATIONWIDE: [PresetEvent; 6] = [
    PresetEvent {
        category: NewsCategory::NaturalDisaster,
        title: "Natural Disaster",
        description: "Rare floods hit northern Sweden, damaging infrastructure",
        effects: EffectVector::new(-200, -10, 0),
        city: None,
    },
    PresetEvent {
        category: NewsCategory::CityConstruction,
        title: "City Construction",
        description: "Stockholm builds new eco-friendly residential area",
        effects: EffectVector::new(-150, 8, 5),
        city: Some("stockholm"),
    },
    PresetEvent {
        category: NewsCategory::EconomyGrowth,
        title: "Economic Growth",
        description: "Swedish tech industry flourishes, creating many job opportunities",
        effects: EffectVector::new(300, 7, 3),
        city: None,
    },
    PresetEvent {
        category: NewsCategory::EconomyDecline,
        title: "Economic Downturn",
        description: "Global market fluctuations impact Swedish exports",
        effects: EffectVector::new(-250, -8, -2),
        city: None,
    },
    PresetEvent {
        category: NewsCategory::SustainabilityEvent,
        title: "Sustainability Initiative",
        description: "Gothenburg hosts international environmental conference promoting green technology",
        effects: EffectVector::new(0, 0, -15),
        city: Some("gothenburg"),
    },
    PresetEvent {
        category: NewsCategory::EntertainmentNews,
        title: "Entertainment Event",
        description: "Malmö music festival attracts global visitors, energizing the city",
        effects: EffectVector::new(0, 12, 0),
        city: Some("malmo"),
    },
];

static CITY_NEWS: [CityNews; 3] = [
    CityNews {
        key: "stockholm",
        local_event: PresetEvent {
            category: NewsCategory::LocalEvent,
            title: "Stockholm Innovation Center",
            description: "Stockholm builds a new technology innovation center, attracting global talent",
            effects: EffectVector::new(-100, 8, 5),
            city: Some("stockholm"),
        },
        local_disaster: PresetEvent {
            category: NewsCategory::LocalDisaster,
            title: "Stockholm Severe Cold",
            description: "Stockholm experiences extremely cold weather, significantly increasing energy consumption",
            effects: EffectVector::new(-80, -5, 10),
            city: Some("stockholm"),
        },
    },
    CityNews {
        key: "gothenburg",
        local_event: PresetEvent {
            category: NewsCategory::LocalEvent,
            title: "Gothenburg Port Expansion",
            description: "Gothenburg port expansion completed, significantly increasing trade volume",
            effects: EffectVector::new(150, 5, 8),
            city: Some("gothenburg"),
        },
        local_disaster: PresetEvent {
            category: NewsCategory::LocalDisaster,
            title: "Gothenburg Flooding",
            description: "Gothenburg hit by flooding, coastal areas damaged",
            effects: EffectVector::new(-120, -8, 3),
            city: Some("gothenburg"),
        },
    },
    CityNews {
        key: "malmo",
        local_event: PresetEvent {
            category: NewsCategory::LocalEvent,
            title: "Malmö Renewable Energy",
            description: "Malmö implements large-scale renewable energy plan, improving city image",
            effects: EffectVector::new(-180, 10, -12),
            city: Some("malmo"),
        },
        local_disaster: PresetEvent {
            category: NewsCategory::LocalDisaster,
            title: "Malmö Traffic Congestion",
            description: "Severe traffic congestion in Malmö, citizens face difficulties commuting",
            effects: EffectVector::new(-50, -7, 9),
            city: Some("malmo"),
        },
    },
];

/// A chosen preset and the city its effects are stamped with.
#[derive(Debug, Clone)]
pub struct PresetDraft {
    pub event: &'static PresetEvent,
    pub target: Option<String>,
}

impl PresetDraft {
    fn nationwide(event: &'static PresetEvent) -> Self {
        Self {
            event,
            target: event.city.map(str::to_string),
        }
    }

    /// The preset's base vector, scoped to the draft's target.
    pub fn effects(&self) -> EffectVector {
        EffectVector {
            city: self.target.clone(),
            ..self.event.effects.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NewsCatalog;

impl NewsCatalog {
    pub fn nationwide(&self) -> &'static [PresetEvent] {
        &NATIONWIDE
    }

    pub fn city_news(&self, key: &str) -> Option<&'static CityNews> {
        CITY_NEWS.iter().find(|city| city.key == key)
    }

    /// Two-stage pick: nation-wide most of the time, otherwise one archetype
    /// of a random active city. With no active city it is always nation-wide.
    pub fn pick_default<R: Rng + ?Sized>(&self, active_cities: &[&str], rng: &mut R) -> PresetDraft {
        if rng.random::<f64>() >= NATIONWIDE_SHARE {
            let category = if rng.random_bool(0.5) {
                NewsCategory::LocalEvent
            } else {
                NewsCategory::LocalDisaster
            };
            if let Some(draft) = self.pick_local(category, active_cities, rng) {
                return draft;
            }
        }
        self.pick_nationwide(rng)
    }

    /// A preset of exactly `category`, or `None` when the catalog has none
    /// (or, for local categories, no active city has one).
    pub fn pick_for_category<R: Rng + ?Sized>(
        &self,
        category: NewsCategory,
        active_cities: &[&str],
        rng: &mut R,
    ) -> Option<PresetDraft> {
        if category.is_local() {
            return self.pick_local(category, active_cities, rng);
        }

        let matching: Vec<&'static PresetEvent> = NATIONWIDE
            .iter()
            .filter(|event| event.category == category)
            .collect();
        matching.choose(rng).copied().map(PresetDraft::nationwide)
    }

    fn pick_nationwide<R: Rng + ?Sized>(&self, rng: &mut R) -> PresetDraft {
        PresetDraft::nationwide(&NATIONWIDE[rng.random_range(0..NATIONWIDE.len())])
    }

    fn pick_local<R: Rng + ?Sized>(
        &self,
        category: NewsCategory,
        active_cities: &[&str],
        rng: &mut R,
    ) -> Option<PresetDraft> {
        let candidates: Vec<&'static CityNews> = active_cities
            .iter()
            .filter_map(|key| self.city_news(key))
            .collect();
        let city: &'static CityNews = *candidates.choose(rng)?;
        let event = city.archetype(category)?;
        Some(PresetDraft {
            event,
            target: Some(city.key.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_CITIES: [&str; 3] = ["gothenburg", "malmo", "stockholm"];

    #[test]
    fn nationwide_table_is_literal() {
        let catalog = NewsCatalog;
        assert_eq!(catalog.nationwide().len(), 6);

        let growth = &catalog.nationwide()[2];
        assert_eq!(growth.category, NewsCategory::EconomyGrowth);
        assert_eq!(growth.effects, EffectVector::new(300, 7, 3));
        assert_eq!(growth.city, None);

        let culture = &catalog.nationwide()[5];
        assert_eq!(culture.effects, EffectVector::new(0, 12, 0));
        assert_eq!(culture.city, Some("malmo"));
    }

    #[test]
    fn every_seeded_city_has_both_archetypes() {
        let catalog = NewsCatalog;
        for key in ALL_CITIES {
            let news = catalog.city_news(key).unwrap();
            assert_eq!(news.local_event.category, NewsCategory::LocalEvent);
            assert_eq!(news.local_disaster.category, NewsCategory::LocalDisaster);
            assert_eq!(news.local_event.city, Some(key));
        }
        assert!(catalog.city_news("uppsala").is_none());
    }

    #[test]
    fn default_pick_is_mostly_nationwide() {
        let catalog = NewsCatalog;
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 10_000;

        let local = (0..draws)
            .map(|_| catalog.pick_default(&ALL_CITIES, &mut rng))
            .filter(|draft| draft.event.category.is_local())
            .count();

        let share = local as f64 / draws as f64;
        assert!((0.27..0.33).contains(&share), "local share was {share}");
    }

    #[test]
    fn default_pick_skips_eliminated_cities() {
        let catalog = NewsCatalog;
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let draft = catalog.pick_default(&["malmo"], &mut rng);
            if draft.event.category.is_local() {
                assert_eq!(draft.target.as_deref(), Some("malmo"));
            }
        }
    }

    #[test]
    fn default_pick_without_active_cities_is_nationwide() {
        let catalog = NewsCatalog;
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(!catalog.pick_default(&[], &mut rng).event.category.is_local());
        }
    }

    #[test]
    fn category_pick_matches_and_stamps_fixed_city() {
        let catalog = NewsCatalog;
        let mut rng = StdRng::seed_from_u64(1);

        let draft = catalog
            .pick_for_category(NewsCategory::SustainabilityEvent, &ALL_CITIES, &mut rng)
            .unwrap();
        assert_eq!(draft.event.title, "Sustainability Initiative");
        assert_eq!(
            draft.effects(),
            EffectVector::new(0, 0, -15).for_city("gothenburg")
        );
    }

    #[test]
    fn local_category_pick_targets_an_active_city() {
        let catalog = NewsCatalog;
        let mut rng = StdRng::seed_from_u64(5);

        let draft = catalog
            .pick_for_category(NewsCategory::LocalDisaster, &["gothenburg"], &mut rng)
            .unwrap();
        assert_eq!(draft.event.title, "Gothenburg Flooding");
        assert_eq!(draft.target.as_deref(), Some("gothenburg"));

        assert!(catalog
            .pick_for_category(NewsCategory::LocalEvent, &[], &mut rng)
            .is_none());
    }
}
