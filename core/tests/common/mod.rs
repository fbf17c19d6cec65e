#![allow(dead_code)]

use idea_core::{ExistingIdea, Submission};

pub fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// A complete, clean final-draft submission that scores well above every
/// stage minimum.
pub fn detailed_final_submission() -> Submission {
    Submission {
        user_name: "ana".to_string(),
        project_name: "mealmate".to_string(),
        customer_profile: text(
            "Working parents aged 28 to 45 in urban and suburban households who shop for \
             groceries weekly, earn a middle income, and manage meal planning for families of \
             three to five people alongside full-time jobs.",
        ),
        product_idea: text(
            "A mobile app and subscription platform that automatically builds a weekly meal \
             plan from pantry data, generates a shared shopping list, and integrates with local \
             grocery delivery services so that families can order everything in one tap. A \
             recommendation algorithm learns household preferences over time.",
        ),
        pain_points: text(
            "Parents told us the biggest problem is the nightly frustration of deciding what to \
             cook. Planning meals takes about three hours every week, forgotten items cause extra \
             store trips, and wasted food is costly: surveyed families throw away roughly a \
             quarter of what they buy.",
        ),
        alternatives: text(
            "Existing meal kit companies are expensive and inflexible, while generic recipe apps \
             do not connect to pantry data or delivery. Compared to these competitors, our \
             approach is cheaper and adapts to what a family already has.",
        ),
        market_validation: text(
            "We ran a survey with 212 parents and completed 34 interviews; 71 percent said they \
             would pay a monthly fee. A two week pilot with 15 households reduced reported \
             planning time by half, and our waitlist has 480 sign ups from a single school \
             newsletter.",
        ),
        competitor_research: text(
            "We compared HelloFresh, Mealime and Instacart on price, flexibility and pantry \
             awareness. None of them track what is already at home, and meal kits cost about \
             twice as much per serving as our projected plan.",
        ),
        investor_pitch: text(
            "We are raising a 500k pre-seed round to finish the mobile app, onboard three \
             regional grocery partners, and reach 5,000 paying households within twelve months, \
             building on validated demand from our pilot.",
        ),
        mvp_link: text("https://mealmate.app/demo"),
        category: vec!["food".to_string()],
        heard_about: text("University startup newsletter"),
    }
}

pub fn as_existing(s: &Submission, id: &str) -> ExistingIdea {
    let mut idea = ExistingIdea::from(s);
    idea.id = Some(id.to_string());
    idea
}
