use guardian_common::NewsCategory;

pub const SYSTEM_PROMPT: &str = "You are a professional news editor writing realistic, detailed news \
for a sustainability game set in Stockholm, Sweden. Your reply must be pure JSON with no markdown \
and no code fences.";

/// Subject and background for each generatable category.
pub(crate) fn topic(category: NewsCategory) -> (&'static str, &'static str) {
    match category {
        NewsCategory::NaturalDisaster => (
            "a natural disaster",
            "natural hazards Sweden faces, such as floods, blizzards and droughts",
        ),
        NewsCategory::CityConstruction => (
            "city construction",
            "infrastructure projects in Stockholm and other Swedish cities",
        ),
        NewsCategory::EconomyGrowth => (
            "economic growth",
            "Swedish economic development, job growth and technology innovation",
        ),
        NewsCategory::EconomyDecline => (
            "an economic downturn",
            "economic hardship, rising unemployment and market volatility",
        ),
        NewsCategory::SustainabilityEvent => (
            "a sustainability initiative",
            "environmental campaigns, green technology and sustainable development",
        ),
        NewsCategory::EntertainmentNews => (
            "an entertainment event",
            "cultural events, music festivals and sports competitions",
        ),
        NewsCategory::LocalEvent | NewsCategory::LocalDisaster => (
            "a local city event",
            "everyday life in a Swedish city",
        ),
    }
}

pub fn user_prompt(category: NewsCategory) -> String {
    let (subject, context) = topic(category);
    format!(
        "Write one news item about {subject}. Background: {context}.\n\n\
         Requirements:\n\
         1. A short, punchy headline (5-10 words).\n\
         2. A vivid description (40-80 words) with concrete figures, places and impact.\n\
         3. Stay true to Swedish geography, culture and society.\n\
         4. You may mention real Swedish cities such as Stockholm, Gothenburg, Malmö or Uppsala.\n\
         5. Read like a real news report.\n\n\
         Reply with pure JSON only, no markdown and no code fences:\n\
         {{\"title\": \"headline\", \"description\": \"detailed description\"}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_names_topic_and_shape() {
        let prompt = user_prompt(NewsCategory::EconomyDecline);
        assert!(prompt.contains("an economic downturn"));
        assert!(prompt.contains(r#"{"title": "headline", "description": "detailed description"}"#));
    }
}
