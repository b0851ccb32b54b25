//! Scoring engine: ranks places against the traveler's preferences.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::params::PlannerParams;
use crate::place::{category_matches, Footprint};
use crate::traits::Place;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Multiplier for places whose cost tier exceeds the traveler's budget.
    pub over_budget_multiplier: f64,
    /// Fraction of the score removed from high-footprint places at bias 1.
    pub high_footprint_penalty: f64,
    /// Points added per rating star.
    pub rating_bonus_per_star: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            over_budget_multiplier: 0.5,
            high_footprint_penalty: 0.5,
            rating_bonus_per_star: 2.0,
        }
    }
}

/// A place with its score and the reasons behind it.
#[derive(Debug, Clone)]
pub struct ScoredPlace<'a, P: ?Sized> {
    pub place: &'a P,
    pub score: f64,
    /// Sum of matched interest weights, before bonuses and multipliers.
    pub interest_match: f64,
    pub reasons: Vec<String>,
}

/// Interests the place matches with a positive weight, heaviest first.
pub fn matched_interests<'p, P>(place: &P, params: &'p PlannerParams) -> Vec<(&'p str, f64)>
where
    P: Place + ?Sized,
{
    let mut matched: Vec<(&str, f64)> = params
        .interests
        .iter()
        .filter(|(tag, weight)| **weight > 0.0 && category_matches(place.category(), tag))
        .map(|(tag, weight)| (tag.as_str(), *weight))
        .collect();
    matched.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    matched
}

/// Score a single place.
pub fn score<P>(place: &P, params: &PlannerParams, options: &ScoringOptions) -> f64
where
    P: Place + ?Sized,
{
    score_place(place, params, options).score
}

/// Score a place and record why.
pub fn score_place<'a, P>(
    place: &'a P,
    params: &PlannerParams,
    options: &ScoringOptions,
) -> ScoredPlace<'a, P>
where
    P: Place + ?Sized,
{
    let matched = matched_interests(place, params);
    let interest_match: f64 = matched.iter().map(|(_, weight)| weight).sum();
    let mut reasons: Vec<String> = matched
        .iter()
        .map(|(tag, _)| format!("matches interest: {}", tag))
        .collect();

    let mut score = interest_match;
    if interest_match > 0.0 {
        score += rating_bonus(place, options);
    }

    if let Some(tier) = place.cost_tier() {
        if tier > params.budget {
            score *= options.over_budget_multiplier;
            reasons.push(format!("over budget: {}", tier.as_str()));
        }
    }

    match place.footprint() {
        Footprint::High if params.sustainability_bias > 0.0 => {
            score *= 1.0 - params.sustainability_bias * options.high_footprint_penalty;
            reasons.push("high footprint".to_string());
        }
        Footprint::Low => reasons.push("low footprint".to_string()),
        _ => {}
    }

    ScoredPlace {
        place,
        score: score.max(0.0),
        interest_match,
        reasons,
    }
}

fn rating_bonus<P: Place + ?Sized>(place: &P, options: &ScoringOptions) -> f64 {
    place
        .rating()
        .filter(|rating| rating.is_finite())
        .map(|rating| rating.clamp(0.0, 5.0) * options.rating_bonus_per_star)
        .unwrap_or(0.0)
}

/// Rank places by descending score, ties broken by identifier.
pub fn rank<'a, P>(
    places: &[&'a P],
    params: &PlannerParams,
    options: &ScoringOptions,
) -> Vec<ScoredPlace<'a, P>>
where
    P: Place + ?Sized,
{
    let mut scored: Vec<ScoredPlace<'a, P>> = places
        .iter()
        .map(|place| score_place(*place, params, options))
        .collect();
    scored.sort_by(compare_scored);
    scored
}

/// Rank by rating alone, for requests where no place matches any interest.
pub fn rank_by_rating<'a, P>(places: &[&'a P]) -> Vec<ScoredPlace<'a, P>>
where
    P: Place + ?Sized,
{
    let mut scored: Vec<ScoredPlace<'a, P>> = places
        .iter()
        .map(|place| ScoredPlace {
            place: *place,
            score: place.rating().filter(|r| r.is_finite()).unwrap_or(0.0).max(0.0),
            interest_match: 0.0,
            reasons: vec!["top rated (no interest match)".to_string()],
        })
        .collect();
    scored.sort_by(compare_scored);
    scored
}

fn compare_scored<P: Place + ?Sized>(a: &ScoredPlace<'_, P>, b: &ScoredPlace<'_, P>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.place.id().cmp(b.place.id()))
}
