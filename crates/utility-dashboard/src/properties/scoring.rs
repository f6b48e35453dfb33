//! Cost-based service score.
//!
//! Start at 100, take the single matching total-cost penalty, then the
//! independent per-utility penalties, and clamp to `60..=100`. The result
//! depends on the three costs only.

use std::fmt;

use serde::Serialize;

use super::domain::InvalidArgument;
use super::rating::ReliabilityRating;

pub const BASE_SCORE: i16 = 100;
pub const MIN_SERVICE_SCORE: u8 = 60;
pub const MAX_SERVICE_SCORE: u8 = 100;

/// Checked highest first; only the first match applies.
const TOTAL_COST_TIERS: [(f64, i16); 4] = [(300.0, -20), (250.0, -15), (200.0, -10), (150.0, -5)];

const ELECTRICITY_LIMIT: f64 = 120.0;
const WATER_LIMIT: f64 = 60.0;
const INTERNET_LIMIT: f64 = 100.0;
const UTILITY_PENALTY: i16 = -5;

/// Validated monthly utility costs, all in the same currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostProfile {
    electricity: f64,
    water: f64,
    internet: f64,
}

impl CostProfile {
    pub fn new(electricity: f64, water: f64, internet: f64) -> Result<Self, InvalidArgument> {
        Ok(Self {
            electricity: checked_cost("electricity", electricity)?,
            water: checked_cost("water", water)?,
            internet: checked_cost("internet", internet)?,
        })
    }

    /// Missing figures count as zero, as the entry forms do.
    pub fn normalized(
        electricity: Option<f64>,
        water: Option<f64>,
        internet: Option<f64>,
    ) -> Result<Self, InvalidArgument> {
        Self::new(
            electricity.unwrap_or(0.0),
            water.unwrap_or(0.0),
            internet.unwrap_or(0.0),
        )
    }

    pub const fn zero() -> Self {
        Self {
            electricity: 0.0,
            water: 0.0,
            internet: 0.0,
        }
    }

    pub fn electricity(&self) -> f64 {
        self.electricity
    }

    pub fn water(&self) -> f64 {
        self.water
    }

    pub fn internet(&self) -> f64 {
        self.internet
    }

    pub fn total(&self) -> f64 {
        self.electricity + self.water + self.internet
    }

    pub fn service_score(&self) -> ServiceScore {
        score_costs(self).score
    }
}

fn checked_cost(utility: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidArgument::Cost { utility, value })
    }
}

/// Score in `60..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceScore(u8);

impl ServiceScore {
    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn rating(self) -> ReliabilityRating {
        ReliabilityRating::from_score(f64::from(self.0))
    }

    fn clamped(raw: i16) -> Self {
        Self(raw.clamp(MIN_SERVICE_SCORE as i16, MAX_SERVICE_SCORE as i16) as u8)
    }
}

impl fmt::Display for ServiceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyFactor {
    TotalCost,
    Electricity,
    Water,
    Internet,
}

/// One deduction applied to the base score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePenalty {
    pub factor: PenaltyFactor,
    pub points: i16,
    pub note: String,
}

/// Applied deductions, the unclamped total, and the final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub penalties: Vec<ScorePenalty>,
    pub raw_score: i16,
    pub score: ServiceScore,
}

impl ScoreBreakdown {
    pub fn rating(&self) -> ReliabilityRating {
        self.score.rating()
    }
}

pub fn score_costs(costs: &CostProfile) -> ScoreBreakdown {
    let mut penalties = Vec::new();

    let total = costs.total();
    if let Some((threshold, points)) = TOTAL_COST_TIERS
        .iter()
        .find(|(threshold, _)| total > *threshold)
    {
        penalties.push(ScorePenalty {
            factor: PenaltyFactor::TotalCost,
            points: *points,
            note: format!("total monthly cost {total:.2} above {threshold:.0}"),
        });
    }

    let utilities = [
        (PenaltyFactor::Electricity, "electricity", costs.electricity, ELECTRICITY_LIMIT),
        (PenaltyFactor::Water, "water", costs.water, WATER_LIMIT),
        (PenaltyFactor::Internet, "internet", costs.internet, INTERNET_LIMIT),
    ];
    for (factor, utility, cost, limit) in utilities {
        if cost > limit {
            penalties.push(ScorePenalty {
                factor,
                points: UTILITY_PENALTY,
                note: format!("{utility} cost {cost:.2} above {limit:.0}"),
            });
        }
    }

    let raw_score = BASE_SCORE + penalties.iter().map(|penalty| penalty.points).sum::<i16>();

    ScoreBreakdown {
        penalties,
        raw_score,
        score: ServiceScore::clamped(raw_score),
    }
}

/// Validate the three monthly costs and score them.
pub fn calculate_service_score(
    electricity_cost: f64,
    water_cost: f64,
    internet_cost: f64,
) -> Result<ServiceScore, InvalidArgument> {
    CostProfile::new(electricity_cost, water_cost, internet_cost).map(|costs| costs.service_score())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(electricity: f64, water: f64, internet: f64) -> u8 {
        calculate_service_score(electricity, water, internet)
            .expect("valid costs")
            .value()
    }

    #[test]
    fn typical_home_loses_one_total_tier() {
        let breakdown = score_costs(&CostProfile::new(102.50, 45.80, 79.99).expect("valid"));
        assert_eq!(breakdown.score.value(), 90);
        assert_eq!(breakdown.rating(), ReliabilityRating::Excellent);
        assert_eq!(breakdown.penalties.len(), 1);
        assert_eq!(breakdown.penalties[0].factor, PenaltyFactor::TotalCost);
        assert_eq!(breakdown.penalties[0].points, -10);
    }

    #[test]
    fn expensive_property_stacks_every_penalty() {
        let breakdown = score_costs(&CostProfile::new(150.0, 70.0, 110.0).expect("valid"));
        assert_eq!(breakdown.raw_score, 65);
        assert_eq!(breakdown.score.value(), 65);
        assert_eq!(breakdown.rating(), ReliabilityRating::Poor);
        let factors: Vec<_> = breakdown.penalties.iter().map(|p| p.factor).collect();
        assert_eq!(
            factors,
            vec![
                PenaltyFactor::TotalCost,
                PenaltyFactor::Electricity,
                PenaltyFactor::Water,
                PenaltyFactor::Internet,
            ]
        );
    }

    #[test]
    fn zero_costs_score_full_marks() {
        assert_eq!(score(0.0, 0.0, 0.0), 100);
        assert_eq!(CostProfile::zero().service_score().value(), 100);
    }

    #[test]
    fn total_tiers_are_exclusive_and_strict() {
        assert_eq!(score(50.0, 50.0, 50.0), 100);
        assert_eq!(score(50.0, 50.0, 50.01), 95);
        assert_eq!(score(100.0, 50.0, 50.0), 95);
        assert_eq!(score(100.0, 55.0, 50.01), 90);
        assert_eq!(score(100.0, 60.0, 90.01), 85);
        assert_eq!(score(110.0, 60.0, 95.0), 85);
        assert_eq!(score(120.0, 60.0, 100.0), 85);
        assert_eq!(score(120.0, 60.0, 100.01), 80);
        assert_eq!(score(120.0, 60.0, 120.01), 75);
    }

    #[test]
    fn individual_thresholds_are_strict() {
        assert_eq!(score(120.0, 0.0, 0.0), 100);
        assert_eq!(score(120.01, 0.0, 0.0), 95);
        assert_eq!(score(0.0, 60.01, 0.0), 95);
        assert_eq!(score(0.0, 0.0, 100.01), 95);
    }

    #[test]
    fn score_stays_in_range_and_never_rises_with_cost() {
        let step = 12.5;
        let grid: Vec<f64> = (0..=32).map(|n| f64::from(n) * step).collect();
        for &e in &grid {
            for &w in &grid {
                for &i in &grid {
                    let current = score(e, w, i);
                    assert!((MIN_SERVICE_SCORE..=MAX_SERVICE_SCORE).contains(&current));
                    assert_eq!(current, score(e, w, i), "scoring is deterministic");
                    assert!(score(e + step, w, i) <= current, "electricity raised ({e}, {w}, {i})");
                    assert!(score(e, w + step, i) <= current, "water raised ({e}, {w}, {i})");
                    assert!(score(e, w, i + step) <= current, "internet raised ({e}, {w}, {i})");
                }
            }
        }
    }

    #[test]
    fn negative_and_non_finite_costs_are_rejected() {
        assert_eq!(
            calculate_service_score(-1.0, 0.0, 0.0),
            Err(InvalidArgument::Cost {
                utility: "electricity",
                value: -1.0
            })
        );
        assert!(matches!(
            calculate_service_score(0.0, f64::INFINITY, 0.0),
            Err(InvalidArgument::Cost { utility: "water", .. })
        ));
        assert!(matches!(
            calculate_service_score(0.0, 0.0, f64::NAN),
            Err(InvalidArgument::Cost {
                utility: "internet",
                ..
            })
        ));
    }

    #[test]
    fn missing_costs_normalise_to_zero() {
        let costs = CostProfile::normalized(Some(130.0), None, None).expect("valid");
        assert_eq!(costs.water(), 0.0);
        assert_eq!(costs.service_score().value(), 95);
    }
}
