use serde::{Deserialize, Serialize};

use super::super::domain::NameMatching;

/// Meaning of a zero cap on a percentage offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncappedPercentage {
    /// A percentage offer without an "up to" ceiling grants nothing.
    #[default]
    CapAtZero,
    /// A zero cap means the percentage applies in full.
    Unbounded,
}

/// Knobs for discount evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationConfig {
    #[serde(default)]
    pub uncapped_percentage: UncappedPercentage,
    #[serde(default)]
    pub name_matching: NameMatching,
}
