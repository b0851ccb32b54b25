//! Route builder: packs ranked places into days and emits one variant per
//! selection policy.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cities::find_city;
use crate::error::{FieldError, OptionsError, Result};
use crate::haversine::{Estimate, HaversineEstimator, TravelMatrix, DEFAULT_SPEED_KMH};
use crate::params::PlannerParams;
use crate::place::{category_matches, CULTURAL_INTERESTS};
use crate::plan::{PlanDay, PlanDayItem, PlanLeg, PlanVariant, PlanWarning, VariantLabel};
use crate::scoring::{rank, rank_by_rating, ScoredPlace, ScoringOptions};
use crate::signals::{Condition, Signals};
use crate::traits::{Place, TravelEstimator};

/// Minimum drive-time gain for a 2-opt move to count as an improvement.
const IMPROVEMENT_EPSILON_MIN: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOptions {
    /// Fastest only considers places scoring at least this fraction of the
    /// best score, while any such place still fits.
    pub fastest_score_floor: f64,
    /// Balanced cost per kilometer of approach.
    pub distance_penalty_per_km: f64,
    /// Balanced credit for a place with the best score (scores are
    /// normalized to `[0, 1]`).
    pub score_weight: f64,
    /// Deep Culture multiplier for cultural places the traveler cares about.
    pub culture_boost: f64,
    /// Score multiplier for outdoor places on adverse-weather days.
    pub adverse_outdoor_multiplier: f64,
    /// Maximum 2-opt passes per Fastest day.
    pub two_opt_iterations: usize,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            fastest_score_floor: 0.3,
            distance_penalty_per_km: 1.0,
            score_weight: 10.0,
            culture_boost: 1.25,
            adverse_outdoor_multiplier: 0.3,
            two_opt_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Average driving speed used by the default estimator.
    pub speed_kmh: f64,
    pub scoring: ScoringOptions,
    pub policy: PolicyOptions,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            scoring: ScoringOptions::default(),
            policy: PolicyOptions::default(),
        }
    }
}

impl PlannerOptions {
    /// Check every tunable, collecting all rejected fields.
    pub fn validate(&self) -> std::result::Result<(), OptionsError> {
        let mut fields = Vec::new();

        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            fields.push(FieldError::new(
                "speed_kmh",
                format!("must be finite and > 0, got {}", self.speed_kmh),
            ));
        }

        let scoring = &self.scoring;
        let policy = &self.policy;
        let unbounded = [
            ("scoring.over_budget_multiplier", scoring.over_budget_multiplier),
            ("scoring.rating_bonus_per_star", scoring.rating_bonus_per_star),
            ("policy.distance_penalty_per_km", policy.distance_penalty_per_km),
            ("policy.score_weight", policy.score_weight),
            ("policy.culture_boost", policy.culture_boost),
            ("policy.adverse_outdoor_multiplier", policy.adverse_outdoor_multiplier),
        ];
        for (name, value) in unbounded {
            if !value.is_finite() || value < 0.0 {
                fields.push(FieldError::new(name, format!("must be finite and >= 0, got {}", value)));
            }
        }

        // Fractions of a score.
        let fractions = [
            ("scoring.high_footprint_penalty", scoring.high_footprint_penalty),
            ("policy.fastest_score_floor", policy.fastest_score_floor),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                fields.push(FieldError::new(name, format!("must be within [0, 1], got {}", value)));
            }
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(OptionsError { fields })
        }
    }
}

/// How the packer picks the next stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Nearest next stop among well-scored places.
    DistanceFirst,
    /// Lowest `distance penalty - score credit`.
    Blended,
    /// Highest (culture-boosted) score; distance breaks ties.
    ScoreFirst,
}

impl SelectionPolicy {
    pub fn for_label(label: VariantLabel) -> Self {
        match label {
            VariantLabel::Fastest => SelectionPolicy::DistanceFirst,
            VariantLabel::Balanced => SelectionPolicy::Blended,
            VariantLabel::DeepCulture => SelectionPolicy::ScoreFirst,
        }
    }

    fn select<'c>(&self, choices: &'c [Choice], max_score: f64, options: &PolicyOptions) -> Option<&'c Choice> {
        // Without an anchor there is no distance to optimize: open with the
        // best-scored place.
        if choices.iter().all(|c| c.proximity_km.is_none()) {
            return choices.iter().min_by(|a, b| by_score_desc(a, b));
        }

        match self {
            SelectionPolicy::DistanceFirst => {
                let floor = options.fastest_score_floor * max_score;
                let eligible: Vec<&Choice> = choices.iter().filter(|c| c.score >= floor).collect();
                let pool: Vec<&Choice> = if eligible.is_empty() {
                    choices.iter().collect()
                } else {
                    eligible
                };
                pool.into_iter().min_by(|a, b| {
                    a.proximity()
                        .total_cmp(&b.proximity())
                        .then_with(|| a.rank.cmp(&b.rank))
                })
            }
            SelectionPolicy::Blended => {
                let norm = if max_score > 0.0 { max_score } else { 1.0 };
                let cost = |c: &Choice| {
                    c.proximity() * options.distance_penalty_per_km - options.score_weight * (c.score / norm)
                };
                choices.iter().min_by(|a, b| {
                    cost(*a)
                        .total_cmp(&cost(*b))
                        .then_with(|| a.rank.cmp(&b.rank))
                })
            }
            SelectionPolicy::ScoreFirst => choices.iter().min_by(|a, b| {
                b.score
                    .total_cmp(&a.score)
                    .then_with(|| a.proximity().total_cmp(&b.proximity()))
                    .then_with(|| a.rank.cmp(&b.rank))
            }),
        }
    }
}

fn by_score_desc(a: &Choice, b: &Choice) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.rank.cmp(&b.rank))
}

/// A schedulable place for the current step.
#[derive(Debug, Clone)]
struct Choice {
    /// Position in the ranked pool.
    rank: usize,
    /// Drive from the day's last stop; zero for the day's first stop.
    approach: Estimate,
    /// Distance from the current anchor, if there is one.
    proximity_km: Option<f64>,
    /// Score adjusted for the policy and the day's weather.
    score: f64,
}

impl Choice {
    fn proximity(&self) -> f64 {
        self.proximity_km.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
struct Candidate<'a, P> {
    scored: ScoredPlace<'a, P>,
    /// Index into the travel matrix.
    index: usize,
    cultural: bool,
}

#[derive(Debug, Clone)]
struct StartPoint {
    id: String,
    /// Estimates to every matrix index.
    estimates: Vec<Estimate>,
}

struct PlanContext<'a, P> {
    params: &'a PlannerParams,
    signals: &'a Signals,
    options: &'a PlannerOptions,
    pool: Vec<Candidate<'a, P>>,
    matrix: TravelMatrix,
    start: Option<StartPoint>,
    max_score: f64,
    warnings: Vec<PlanWarning>,
}

/// Plan a request with the haversine estimator at `options.speed_kmh`.
pub fn build_plan<P: Place>(
    params: &PlannerParams,
    places: &[P],
    signals: &Signals,
    options: &PlannerOptions,
) -> Result<Vec<PlanVariant>> {
    let estimator = HaversineEstimator::new(options.speed_kmh);
    build_plan_with(params, places, signals, options, &estimator)
}

/// Plan a request with a caller-supplied estimator.
///
/// Returns the Fastest, Balanced and Deep Culture variants, in that order,
/// each with exactly `params.days` days.
pub fn build_plan_with<P, E>(
    params: &PlannerParams,
    places: &[P],
    signals: &Signals,
    options: &PlannerOptions,
    estimator: &E,
) -> Result<Vec<PlanVariant>>
where
    P: Place,
    E: TravelEstimator + ?Sized,
{
    params.validate()?;
    options.validate()?;

    let ctx = PlanContext::new(params, places, signals, options, estimator)?;
    let variants = VariantLabel::ALL
        .iter()
        .map(|label| ctx.pack(*label))
        .collect();

    Ok(variants)
}

/// An independent planning request for [`plan_batch`].
#[derive(Debug, Clone)]
pub struct PlanRequest<P> {
    pub params: PlannerParams,
    pub places: Vec<P>,
    pub signals: Signals,
}

/// Plan many independent requests in parallel. Results keep input order.
pub fn plan_batch<P>(requests: &[PlanRequest<P>], options: &PlannerOptions) -> Vec<Result<Vec<PlanVariant>>>
where
    P: Place + Sync,
{
    requests
        .par_iter()
        .map(|request| build_plan(&request.params, &request.places, &request.signals, options))
        .collect()
}

impl<'a, P: Place> PlanContext<'a, P> {
    fn new<E>(
        params: &'a PlannerParams,
        places: &'a [P],
        signals: &'a Signals,
        options: &'a PlannerOptions,
        estimator: &E,
    ) -> Result<Self>
    where
        E: TravelEstimator + ?Sized,
    {
        let mut warnings = Vec::new();

        let mut index_of: HashMap<&str, usize> = HashMap::new();
        let mut unique: Vec<&'a P> = Vec::with_capacity(places.len());
        for place in places {
            if !index_of.contains_key(place.id()) {
                index_of.insert(place.id(), unique.len());
                unique.push(place);
            } else {
                warn!(id = place.id(), "duplicate place id dropped");
                warnings.push(PlanWarning::DuplicatePlace {
                    id: place.id().to_string(),
                });
            }
        }

        let matrix = TravelMatrix::build(&unique, estimator)?;
        let start = resolve_start(params, &unique, estimator, &mut warnings)?;

        let mut ranked = rank(&unique, params, &options.scoring);
        ranked.retain(|scored| scored.interest_match > 0.0);
        if ranked.is_empty() && !unique.is_empty() {
            warn!("no place matches a positive interest, ranking by rating");
            warnings.push(PlanWarning::NoInterestMatch);
            ranked = rank_by_rating(&unique);
        }

        let budget = params.day_budget_minutes();
        let pool: Vec<Candidate<'a, P>> = ranked
            .into_iter()
            .filter_map(|scored| {
                let index = *index_of.get(scored.place.id())?;
                let cultural = CULTURAL_INTERESTS.iter().any(|tag| {
                    params.weight_for(tag) > 0.0 && category_matches(scored.place.category(), tag)
                });
                Some(Candidate {
                    scored,
                    index,
                    cultural,
                })
            })
            .collect();

        for candidate in &pool {
            if f64::from(candidate.scored.place.visit_minutes()) > budget {
                warnings.push(PlanWarning::PlaceTooLong {
                    id: candidate.scored.place.id().to_string(),
                });
            }
        }

        let max_score = pool
            .iter()
            .map(|c| c.scored.score)
            .fold(0.0_f64, f64::max);

        debug!(
            places = unique.len(),
            candidates = pool.len(),
            days = params.days,
            "planning context ready"
        );

        Ok(Self {
            params,
            signals,
            options,
            pool,
            matrix,
            start,
            max_score,
            warnings,
        })
    }

    /// Run the greedy day packer under the policy for `label`.
    fn pack(&self, label: VariantLabel) -> PlanVariant {
        let _span = tracing::debug_span!("pack", label = %label).entered();
        let policy = SelectionPolicy::for_label(label);
        let budget = self.params.day_budget_minutes();

        let mut scheduled = vec![false; self.pool.len()];
        let mut previous_stop: Option<usize> = None;
        let mut days = Vec::with_capacity(self.params.days as usize);

        for day_index in 0..self.params.days as usize {
            let condition = if self.params.weather_aware {
                self.signals.condition_for(day_index)
            } else {
                None
            };

            let mut order: Vec<usize> = Vec::new();
            let mut clock = 0.0;
            loop {
                let last = order.last().copied();
                let choices = self.choices(policy, &scheduled, last, previous_stop, clock, budget, condition);
                let Some(choice) = policy.select(&choices, self.max_score, &self.options.policy) else {
                    break;
                };

                // Same summation order as the fit check in `choices`.
                clock = clock
                    + choice.approach.minutes
                    + f64::from(self.pool[choice.rank].scored.place.visit_minutes());
                scheduled[choice.rank] = true;
                order.push(choice.rank);
            }

            if policy == SelectionPolicy::DistanceFirst {
                self.improve_order(&mut order);
            }

            let day = self.materialize_day(policy, &order, previous_stop, condition);
            debug!(
                day = day_index + 1,
                stops = day.items.len(),
                active_min = day.active_minutes(),
                "day closed"
            );
            if let Some(last) = order.last() {
                previous_stop = Some(*last);
            }
            days.push(day);
        }

        self.finish(label, days)
    }

    /// Every unscheduled place that still fits the day, with its policy score.
    #[allow(clippy::too_many_arguments)]
    fn choices(
        &self,
        policy: SelectionPolicy,
        scheduled: &[bool],
        last: Option<usize>,
        previous_stop: Option<usize>,
        clock: f64,
        budget: f64,
        condition: Option<Condition>,
    ) -> Vec<Choice> {
        self.pool
            .iter()
            .enumerate()
            .filter(|(rank, _)| !scheduled[*rank])
            .filter_map(|(rank, candidate)| {
                let approach = match last {
                    Some(from) => self.matrix.get(self.pool[from].index, candidate.index),
                    None => Estimate::default(),
                };
                let visit = f64::from(candidate.scored.place.visit_minutes());
                if clock + approach.minutes + visit > budget {
                    return None;
                }

                let proximity_km = match last {
                    Some(_) => Some(approach.km),
                    None => self.anchor_estimate(previous_stop, candidate.index).map(|e| e.km),
                };

                Some(Choice {
                    rank,
                    approach,
                    proximity_km,
                    score: self.effective_score(policy, candidate, condition),
                })
            })
            .collect()
    }

    /// Estimate from where the day starts: the previous day's last stop, or
    /// the start city on the first day.
    fn anchor_estimate(&self, previous_stop: Option<usize>, index: usize) -> Option<Estimate> {
        match previous_stop {
            Some(rank) => Some(self.matrix.get(self.pool[rank].index, index)),
            None => self.start.as_ref().map(|start| start.estimates[index]),
        }
    }

    fn effective_score(&self, policy: SelectionPolicy, candidate: &Candidate<'a, P>, condition: Option<Condition>) -> f64 {
        let mut score = candidate.scored.score;
        if policy == SelectionPolicy::ScoreFirst && candidate.cultural {
            score *= self.options.policy.culture_boost;
        }
        if condition.is_some_and(|c| c.is_adverse()) && candidate.scored.place.is_outdoor() {
            score *= self.options.policy.adverse_outdoor_multiplier;
        }
        score
    }

    /// 2-opt over the day's stops with the first stop fixed. Only accepts
    /// moves that shorten total drive time, so the day stays within budget.
    fn improve_order(&self, order: &mut [usize]) {
        let n = order.len();
        if n < 3 {
            return;
        }
        let drive = |a: usize, b: usize| self.matrix.get(self.pool[a].index, self.pool[b].index).minutes;

        for _ in 0..self.options.policy.two_opt_iterations {
            let mut improved = false;
            for i in 1..n - 1 {
                for j in i + 1..n {
                    let mut before = drive(order[i - 1], order[i]);
                    let mut after = drive(order[i - 1], order[j]);
                    if j + 1 < n {
                        before += drive(order[j], order[j + 1]);
                        after += drive(order[i], order[j + 1]);
                    }
                    if after + IMPROVEMENT_EPSILON_MIN < before {
                        order[i..=j].reverse();
                        improved = true;
                    }
                }
            }
            if !improved {
                break;
            }
        }
    }

    fn materialize_day(
        &self,
        policy: SelectionPolicy,
        order: &[usize],
        previous_stop: Option<usize>,
        condition: Option<Condition>,
    ) -> PlanDay {
        let mut day = PlanDay {
            condition,
            ..PlanDay::default()
        };

        let mut clock = 0.0;
        for (position, rank) in order.iter().enumerate() {
            let candidate = &self.pool[*rank];
            let place = candidate.scored.place;

            if position > 0 {
                let from = &self.pool[order[position - 1]];
                let estimate = self.matrix.get(from.index, candidate.index);
                clock += estimate.minutes;
                day.legs.push(PlanLeg {
                    from_id: from.scored.place.id().to_string(),
                    to_id: place.id().to_string(),
                    drive_km: estimate.km,
                    drive_min: estimate.minutes,
                });
            }

            let visit_min = place.visit_minutes();
            let start_min = clock;
            let end_min = start_min + f64::from(visit_min);
            clock = end_min;

            let (lat, lon) = place.location();
            day.items.push(PlanDayItem {
                id: place.id().to_string(),
                name: place.name().to_string(),
                lat,
                lon,
                category: place.category().to_string(),
                start_min,
                end_min,
                visit_min,
                reason: self.reasons(policy, candidate, position, condition),
            });
        }

        if let Some(first) = order.first() {
            day.transfer = self.transfer_leg(previous_stop, *first);
        }

        day
    }

    fn transfer_leg(&self, previous_stop: Option<usize>, first: usize) -> Option<PlanLeg> {
        let to = &self.pool[first];
        let (from_id, estimate) = match previous_stop {
            Some(rank) => {
                let from = &self.pool[rank];
                (
                    from.scored.place.id().to_string(),
                    self.matrix.get(from.index, to.index),
                )
            }
            None => {
                let start = self.start.as_ref()?;
                (start.id.clone(), start.estimates[to.index])
            }
        };

        // Starting at a candidate and opening there is not a transfer.
        if from_id == to.scored.place.id() {
            return None;
        }

        Some(PlanLeg {
            from_id,
            to_id: to.scored.place.id().to_string(),
            drive_km: estimate.km,
            drive_min: estimate.minutes,
        })
    }

    fn reasons(
        &self,
        policy: SelectionPolicy,
        candidate: &Candidate<'a, P>,
        position: usize,
        condition: Option<Condition>,
    ) -> Vec<String> {
        let place = candidate.scored.place;
        let mut reasons = candidate.scored.reasons.clone();

        match policy {
            SelectionPolicy::DistanceFirst if position > 0 => reasons.push("short hop from previous stop".to_string()),
            SelectionPolicy::ScoreFirst if candidate.cultural => reasons.push("cultural highlight".to_string()),
            _ => {}
        }

        if let Some(condition) = condition.filter(|c| c.is_adverse()) {
            if place.is_outdoor() {
                reasons.push(format!("outdoor despite forecast: {}", condition.as_str()));
            } else {
                reasons.push(format!("indoor pick for forecast: {}", condition.as_str()));
            }
        }

        if self.params.fx_aware {
            if let Some(reason) = self.price_reason(place) {
                reasons.push(reason);
            }
        }

        reasons
    }

    fn price_reason(&self, place: &P) -> Option<String> {
        let fx = self.signals.fx.as_ref()?;
        let price = place.price_mad().filter(|p| p.is_finite() && *p >= 0.0)?;
        let currency = self.params.locale.display_currency();
        let converted = fx.convert_from_base(price, currency)?;
        Some(format!("entry ≈ {:.2} {}", converted, currency))
    }

    fn finish(&self, label: VariantLabel, days: Vec<PlanDay>) -> PlanVariant {
        let total_km: f64 = days.iter().map(PlanDay::drive_km).sum();
        let total_drive_min: f64 = days.iter().map(PlanDay::drive_minutes).sum();

        let mut warnings = self.warnings.clone();
        let filled_days = days.iter().filter(|day| !day.is_empty()).count() as u32;
        if filled_days < self.params.days {
            debug!(filled_days, requested = self.params.days, "not enough candidates to fill every day");
            warnings.push(PlanWarning::InsufficientCandidates {
                requested_days: self.params.days,
                filled_days,
            });
        }

        PlanVariant {
            label,
            total_km,
            total_drive_min,
            days,
            warnings,
        }
    }
}

/// Resolve `startCity` against the candidate ids first, then the city table.
fn resolve_start<P, E>(
    params: &PlannerParams,
    places: &[&P],
    estimator: &E,
    warnings: &mut Vec<PlanWarning>,
) -> Result<Option<StartPoint>>
where
    P: Place,
    E: TravelEstimator + ?Sized,
{
    let Some(key) = params.start_city.as_deref() else {
        return Ok(None);
    };

    let origin = places
        .iter()
        .find(|place| place.id() == key)
        .map(|place| (place.id().to_string(), place.location()))
        .or_else(|| find_city(key).map(|city| (city.slug.to_string(), city.coords())));

    let Some((id, location)) = origin else {
        warn!(city = key, "unknown start city ignored");
        warnings.push(PlanWarning::UnknownStartCity {
            city: key.to_string(),
        });
        return Ok(None);
    };

    let estimates = places
        .iter()
        .map(|place| {
            estimator
                .estimate(location, place.location())?
                .checked(&id, place.id())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(StartPoint { id, estimates }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::params::{Budget, Pace};
    use crate::place::Poi;

    fn params(days: u32) -> PlannerParams {
        PlannerParams::new(days, Budget::Mid, Pace::Balanced).interest("history", 50.0)
    }

    fn choice(rank: usize, km: Option<f64>, score: f64) -> Choice {
        Choice {
            rank,
            approach: Estimate::default(),
            proximity_km: km,
            score,
        }
    }

    #[test]
    fn test_policies_open_with_best_score_without_anchor() {
        let choices = vec![choice(0, None, 90.0), choice(1, None, 40.0)];
        let opts = PolicyOptions::default();
        for label in VariantLabel::ALL {
            let picked = SelectionPolicy::for_label(label).select(&choices, 90.0, &opts).unwrap();
            assert_eq!(picked.rank, 0, "{} should open with the top place", label);
        }
    }

    #[test]
    fn test_distance_first_respects_score_floor() {
        // rank 2 is nearest but below 30% of the best score
        let choices = vec![
            choice(0, Some(5.0), 100.0),
            choice(1, Some(2.0), 60.0),
            choice(2, Some(0.5), 10.0),
        ];
        let picked = SelectionPolicy::DistanceFirst
            .select(&choices, 100.0, &PolicyOptions::default())
            .unwrap();
        assert_eq!(picked.rank, 1);
    }

    #[test]
    fn test_blended_trades_distance_for_score() {
        // cost: 0 -> 8 - 10 = -2, 1 -> 1 - 5 = -4
        let choices = vec![choice(0, Some(8.0), 100.0), choice(1, Some(1.0), 50.0)];
        let picked = SelectionPolicy::Blended
            .select(&choices, 100.0, &PolicyOptions::default())
            .unwrap();
        assert_eq!(picked.rank, 1);
    }

    #[test]
    fn test_score_first_uses_distance_as_tie_break() {
        let choices = vec![choice(0, Some(9.0), 70.0), choice(1, Some(1.0), 70.0)];
        let picked = SelectionPolicy::ScoreFirst
            .select(&choices, 70.0, &PolicyOptions::default())
            .unwrap();
        assert_eq!(picked.rank, 1);
    }

    #[test]
    fn test_two_opt_untangles_crossed_day() {
        // Points on a line visited out of order: 0, 2, 1, 3
        let places = vec![
            Poi::new("p0", "P0", (31.60, -8.00), "museum", 30),
            Poi::new("p1", "P1", (31.61, -8.00), "museum", 30),
            Poi::new("p2", "P2", (31.62, -8.00), "museum", 30),
            Poi::new("p3", "P3", (31.63, -8.00), "museum", 30),
        ];
        let params = params(1);
        let signals = Signals::none();
        let options = PlannerOptions::default();
        let ctx = PlanContext::new(&params, &places, &signals, &options, &HaversineEstimator::default()).unwrap();
        assert_eq!(ctx.pool.len(), 4);

        // Equal scores rank by id, so pool rank == place index.
        let mut order = vec![0, 2, 1, 3];
        ctx.improve_order(&mut order);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_duplicate_ids_dropped_with_warning() {
        let places = vec![
            Poi::new("dup", "First", (31.60, -8.00), "museum", 30),
            Poi::new("dup", "Second", (31.70, -8.10), "museum", 30),
        ];
        let variants = build_plan(&params(1), &places, &Signals::none(), &PlannerOptions::default()).unwrap();
        let variant = &variants[0];
        assert_eq!(variant.stop_count(), 1);
        assert_eq!(variant.days[0].items[0].name, "First");
        assert!(variant.warnings.contains(&PlanWarning::DuplicatePlace { id: "dup".into() }));
    }

    #[test]
    fn test_unknown_start_city_is_warning() {
        let places = vec![Poi::new("a", "A", (31.60, -8.00), "museum", 30)];
        let params = params(1).start_city("atlantis");
        let variants = build_plan(&params, &places, &Signals::none(), &PlannerOptions::default()).unwrap();
        assert!(variants[0].warnings.contains(&PlanWarning::UnknownStartCity {
            city: "atlantis".into()
        }));
        assert_eq!(variants[0].stop_count(), 1);
    }

    #[test]
    fn test_place_longer_than_day_never_scheduled() {
        let places = vec![
            Poi::new("long", "Desert trek", (31.60, -8.00), "museum", 600),
            Poi::new("short", "Museum", (31.61, -8.00), "museum", 60),
        ];
        let variants = build_plan(&params(2), &places, &Signals::none(), &PlannerOptions::default()).unwrap();
        for variant in &variants {
            assert_eq!(variant.stop_count(), 1);
            assert!(variant.warnings.contains(&PlanWarning::PlaceTooLong { id: "long".into() }));
        }
    }

    #[test]
    fn test_deep_culture_boosts_cultural_place() {
        // Equal base scores; the cafe wins the id tie-break.
        let places = vec![
            Poi::new("a-cafe", "Cafe", (31.620, -7.985), "cafe", 60),
            Poi::new("b-museum", "Museum", (31.632, -7.993), "museum", 60),
        ];
        let params = PlannerParams::new(1, Budget::Mid, Pace::Balanced)
            .interest("history", 50.0)
            .interest("food", 50.0);
        let variants = build_plan(&params, &places, &Signals::none(), &PlannerOptions::default()).unwrap();

        let highlight = "cultural highlight".to_string();
        for variant in &variants {
            let day = &variant.days[0];
            let museum = day.items.iter().find(|item| item.id == "b-museum").unwrap();
            if variant.label == VariantLabel::DeepCulture {
                assert_eq!(day.items[0].id, "b-museum");
                assert!(museum.reason.contains(&highlight));
            } else {
                assert_eq!(day.items[0].id, "a-cafe", "{} should not boost culture", variant.label);
                assert!(!museum.reason.contains(&highlight));
            }
        }
    }

    #[test]
    fn test_options_validation_lists_every_bad_field() {
        let mut options = PlannerOptions::default();
        options.speed_kmh = 0.0;
        options.scoring.over_budget_multiplier = f64::NAN;
        options.scoring.high_footprint_penalty = 1.5;
        options.policy.culture_boost = -1.0;

        let err = options.validate().unwrap_err();
        assert!(err.has_field("speed_kmh"));
        assert!(err.has_field("scoring.over_budget_multiplier"));
        assert!(err.has_field("scoring.high_footprint_penalty"));
        assert!(err.has_field("policy.culture_boost"));
        assert_eq!(err.fields.len(), 4);
        assert!(PlannerOptions::default().validate().is_ok());
    }

    #[test]
    fn test_zero_or_negative_speed_rejected_before_packing() {
        // Co-located places would give 0 / 0 drive minutes at speed 0.
        let places = vec![
            Poi::new("a", "A", (31.62, -7.98), "cafe", 200),
            Poi::new("b", "B", (31.62, -7.98), "cafe", 200),
            Poi::new("c", "C", (31.62, -7.98), "cafe", 200),
        ];
        let params = PlannerParams::new(1, Budget::Mid, Pace::Balanced).interest("food", 50.0);

        for speed_kmh in [0.0, -60.0, f64::INFINITY] {
            let options = PlannerOptions {
                speed_kmh,
                ..PlannerOptions::default()
            };
            match build_plan(&params, &places, &Signals::none(), &options) {
                Err(PlannerError::Options(err)) => assert!(err.has_field("speed_kmh")),
                other => panic!("speed {} should be rejected, got {:?}", speed_kmh, other),
            }
        }
    }

    struct NanEstimator;

    impl TravelEstimator for NanEstimator {
        fn estimate(&self, _from: (f64, f64), _to: (f64, f64)) -> Result<Estimate> {
            Ok(Estimate {
                km: 0.0,
                minutes: f64::NAN,
            })
        }
    }

    #[test]
    fn test_invalid_estimator_output_rejected() {
        let places = vec![
            Poi::new("a", "A", (31.62, -7.98), "cafe", 60),
            Poi::new("b", "B", (31.63, -7.99), "cafe", 60),
        ];
        let params = PlannerParams::new(1, Budget::Mid, Pace::Balanced).interest("food", 50.0);
        let err = build_plan_with(&params, &places, &Signals::none(), &PlannerOptions::default(), &NanEstimator)
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidEstimate { .. }));
    }

    #[test]
    fn test_invalid_estimate_from_start_city_rejected() {
        // A single place has no matrix pairs; only the start estimate runs.
        let places = vec![Poi::new("a", "A", (31.62, -7.98), "cafe", 60)];
        let params = PlannerParams::new(1, Budget::Mid, Pace::Balanced)
            .interest("food", 50.0)
            .start_city("marrakech");
        let err = build_plan_with(&params, &places, &Signals::none(), &PlannerOptions::default(), &NanEstimator)
            .unwrap_err();
        match err {
            PlannerError::InvalidEstimate { from, to, .. } => {
                assert_eq!(from, "marrakech");
                assert_eq!(to, "a");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_start_at_candidate_emits_no_transfer() {
        let places = vec![
            Poi::new("koutoubia", "Koutoubia", (31.6237, -7.9937), "mosque", 30),
            Poi::new("bahia-palace", "Bahia Palace", (31.6216, -7.9833), "palace", 75),
        ];
        let params = params(1).start_city("koutoubia");
        let variants = build_plan(&params, &places, &Signals::none(), &PlannerOptions::default()).unwrap();
        for variant in &variants {
            let day = &variant.days[0];
            assert_eq!(day.items[0].id, "koutoubia", "{} should open at the start", variant.label);
            assert!(day.transfer.is_none());
        }
    }
}
