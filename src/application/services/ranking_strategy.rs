//! # Ranking Strategy
//!
//! Strategies for ranking candidate shipping methods.
//!
//! This module provides the [`MethodRankingStrategy`] trait, one
//! implementation per [`RankingPolicy`], and the policy enum selected from
//! store settings.
//!
//! All strategies sort stably: candidates with equal prices keep the order
//! the quote provider returned them in.

use crate::domain::entities::CandidateMethod;
use crate::domain::value_objects::MethodCode;
use crate::infrastructure::config::StoreSettings;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

/// A candidate method with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMethod {
    /// The method being ranked.
    pub method: CandidateMethod,
    /// The rank (1 = best).
    pub rank: usize,
}

impl RankedMethod {
    /// Creates a new ranked method.
    #[must_use]
    pub fn new(method: CandidateMethod, rank: usize) -> Self {
        Self { method, rank }
    }

    /// Returns true if this method is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankedMethod(#{} {})", self.rank, self.method)
    }
}

/// Trait for ranking strategies.
pub trait MethodRankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks `methods`, best first.
    ///
    /// `current` is the method already selected on the cart, if any.
    fn rank(&self, methods: &[CandidateMethod], current: Option<&MethodCode>)
    -> Vec<RankedMethod>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

fn into_ranked(methods: Vec<&CandidateMethod>) -> Vec<RankedMethod> {
    methods
        .into_iter()
        .enumerate()
        .map(|(i, m)| RankedMethod::new(m.clone(), i + 1))
        .collect()
}

/// Cheapest tax-inclusive price first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestPriceStrategy;

impl MethodRankingStrategy for LowestPriceStrategy {
    fn rank(&self, methods: &[CandidateMethod], _current: Option<&MethodCode>) -> Vec<RankedMethod> {
        let mut sorted: Vec<&CandidateMethod> = methods.iter().collect();
        sorted.sort_by_key(|m| m.price_incl_tax());
        into_ranked(sorted)
    }

    fn name(&self) -> &'static str {
        "LowestPrice"
    }
}

/// Most expensive tax-inclusive price first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestPriceStrategy;

impl MethodRankingStrategy for HighestPriceStrategy {
    fn rank(&self, methods: &[CandidateMethod], _current: Option<&MethodCode>) -> Vec<RankedMethod> {
        let mut sorted: Vec<&CandidateMethod> = methods.iter().collect();
        sorted.sort_by_key(|m| Reverse(m.price_incl_tax()));
        into_ranked(sorted)
    }

    fn name(&self) -> &'static str {
        "HighestPrice"
    }
}

/// Keeps the current method when it is still offered; otherwise cheapest
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepExistingOrLowestStrategy;

impl MethodRankingStrategy for KeepExistingOrLowestStrategy {
    fn rank(&self, methods: &[CandidateMethod], current: Option<&MethodCode>) -> Vec<RankedMethod> {
        let mut sorted: Vec<&CandidateMethod> = methods.iter().collect();
        sorted.sort_by_key(|m| m.price_incl_tax());
        let kept = current.and_then(|code| sorted.iter().position(|m| m.matches(code)));
        if let Some(pos) = kept {
            let method = sorted.remove(pos);
            sorted.insert(0, method);
        }
        into_ranked(sorted)
    }

    fn name(&self) -> &'static str {
        "KeepExistingOrLowest"
    }
}

/// Policy choosing the winning candidate method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Cheapest method.
    #[default]
    Lowest,
    /// Most expensive method.
    Highest,
    /// The already-selected method when still offered, else the cheapest.
    KeepExistingOrLowest,
}

impl RankingPolicy {
    /// Derives the policy from store settings.
    ///
    /// `keep_existing` wins over `use_lowest`.
    #[must_use]
    pub fn from_settings(settings: &StoreSettings) -> Self {
        if settings.keep_existing {
            Self::KeepExistingOrLowest
        } else if settings.use_lowest {
            Self::Lowest
        } else {
            Self::Highest
        }
    }

    /// Returns the strategy implementing this policy.
    #[must_use]
    pub fn strategy(self) -> &'static dyn MethodRankingStrategy {
        match self {
            Self::Lowest => &LowestPriceStrategy,
            Self::Highest => &HighestPriceStrategy,
            Self::KeepExistingOrLowest => &KeepExistingOrLowestStrategy,
        }
    }

    /// Returns the best of `methods` under this policy.
    #[must_use]
    pub fn best(
        self,
        methods: &[CandidateMethod],
        current: Option<&MethodCode>,
    ) -> Option<CandidateMethod> {
        self.strategy()
            .rank(methods, current)
            .into_iter()
            .next()
            .map(|ranked| ranked.method)
    }
}

impl fmt::Display for RankingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}
