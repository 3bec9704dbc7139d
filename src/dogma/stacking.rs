//! Per-attribute accumulation of modifier contributions and their composition onto a base
//! value, including the diminishing-returns stacking penalty.

use std::collections::BTreeMap;

use crate::constants::PENALTY_FACTOR;
use crate::dogma::model::Operator;

/// One linearized contribution to an attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackContribution {
    pub operator: Operator,
    /// Linear form of the source value (see [`Operator::linearize`]).
    pub value: f64,
    pub penalized: bool,
}

impl StackContribution {
    pub fn new(operator: Operator, raw: f64, penalized: bool) -> Self {
        Self {
            operator,
            value: operator.linearize(raw),
            penalized,
        }
    }
}

/// Contributions for one operator. Penalties only bite on the multiplicative family, so
/// everything else lands in `unpenalized`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorTotals {
    pub unpenalized: Vec<f64>,
    pub bonuses: Vec<f64>,
    pub maluses: Vec<f64>,
}

impl OperatorTotals {
    pub fn push(&mut self, operator: Operator, value: f64, penalized: bool) {
        if penalized && operator.is_multiplicative() {
            if value > 0.0 {
                self.bonuses.push(value);
            } else if value < 0.0 {
                self.maluses.push(value);
            }
        } else {
            self.unpenalized.push(value);
        }
    }

    /// Apply this operator's contributions to `current`.
    pub fn apply(&self, operator: Operator, current: f64, high_is_good: bool) -> f64 {
        if operator.is_assign() {
            return assigned_value(&self.unpenalized, high_is_good).unwrap_or(current);
        }
        if operator.is_additive() {
            return current + self.unpenalized.iter().sum::<f64>();
        }

        let mut value = self
            .unpenalized
            .iter()
            .fold(current, |acc, v| acc * (1.0 + v));
        for bucket in [&self.bonuses, &self.maluses] {
            let mut sorted = bucket.clone();
            sorted.sort_by(|a, b| b.abs().total_cmp(&a.abs()));
            for (rank, v) in sorted.into_iter().enumerate() {
                value *= 1.0 + v * penalty_multiplier(rank);
            }
        }
        value
    }
}

/// Weight of the `rank`-th strongest penalized contribution (0-based).
pub fn penalty_multiplier(rank: usize) -> f64 {
    let exponent = i32::try_from(rank * rank).unwrap_or(i32::MAX);
    PENALTY_FACTOR.powi(exponent)
}

/// Largest magnitude wins. Between equal magnitudes of opposite sign, the larger signed
/// value wins for high-is-good attributes and the smaller one otherwise.
fn assigned_value(values: &[f64], high_is_good: bool) -> Option<f64> {
    values.iter().copied().reduce(|best, candidate| {
        match candidate.abs().total_cmp(&best.abs()) {
            std::cmp::Ordering::Greater => candidate,
            std::cmp::Ordering::Less => best,
            std::cmp::Ordering::Equal if high_is_good => best.max(candidate),
            std::cmp::Ordering::Equal => best.min(candidate),
        }
    })
}

/// All contributions to one attribute, grouped by operator in application order.
#[derive(Debug, Clone, Default)]
pub struct StatStacking {
    totals: BTreeMap<Operator, OperatorTotals>,
}

impl StatStacking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, contribution: StackContribution) {
        self.totals.entry(contribution.operator).or_default().push(
            contribution.operator,
            contribution.value,
            contribution.penalized,
        );
    }

    pub fn add_many<I>(&mut self, contributions: I)
    where
        I: IntoIterator<Item = StackContribution>,
    {
        for contribution in contributions {
            self.add(contribution);
        }
    }

    /// Fold every operator onto `base` in [`Operator::ORDER`].
    pub fn compose(&self, base: f64, high_is_good: bool) -> f64 {
        self.totals
            .iter()
            .fold(base, |value, (&operator, totals)| {
                totals.apply(operator, value, high_is_good)
            })
    }
}
