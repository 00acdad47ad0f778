//! Typed set prescriptions produced by the parser.
//!
//! A [`Prescription`] is only built by [`crate::parse_set_line`] and is fully
//! validated at construction. Percentage notations stay unresolved until a
//! one-rep max is applied, which yields a [`ResolvedPrescription`].

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

// ──────────────────────────────────────────────
// Notation payloads
// ──────────────────────────────────────────────

/// One set of a wave: its rep count at the shared weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavePhase {
    pub reps: u32,
    pub weight: Decimal,
}

/// One exercise of a circuit. `reps` is empty when only a name was given
/// and may hold a split count such as `10/12`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitItem {
    pub reps: String,
    pub name: String,
}

/// The closed set of notations a line can decode into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notation {
    Standard {
        sets: u32,
        reps: u32,
        weight: Decimal,
    },
    Compound {
        sets: u32,
        reps_parts: Vec<u32>,
        weight: Decimal,
    },
    MultiWeight {
        sets: u32,
        reps: u32,
        weights: Vec<Decimal>,
    },
    WeightRange {
        sets: u32,
        reps: u32,
        weight_min: Decimal,
        weight_max: Decimal,
    },
    PercentageSingle {
        sets: u32,
        reps: u32,
        percentage: Decimal,
    },
    PercentageRange {
        sets: u32,
        reps: u32,
        percentage_min: Decimal,
        percentage_max: Decimal,
    },
    CompoundPercentage {
        sets: u32,
        reps_parts: Vec<u32>,
        percentage: Decimal,
    },
    Wave {
        phases: Vec<WavePhase>,
    },
    Circuit {
        sets: u32,
        items: Vec<CircuitItem>,
    },
    RmBuild {
        target_rm: u32,
    },
    RirOnly {
        sets: u32,
        reps: u32,
        rir_min: u32,
        rir_max: u32,
    },
    RirWithWeight {
        sets: u32,
        reps: u32,
        weight: Decimal,
        rir_min: u32,
        rir_max: u32,
    },
}

/// Payload-free tag for each [`Notation`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotationKind {
    Standard,
    Compound,
    MultiWeight,
    WeightRange,
    PercentageSingle,
    PercentageRange,
    CompoundPercentage,
    Wave,
    Circuit,
    RmBuild,
    RirOnly,
    RirWithWeight,
}

impl fmt::Display for NotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotationKind::Standard => "standard",
            NotationKind::Compound => "compound",
            NotationKind::MultiWeight => "multi_weight",
            NotationKind::WeightRange => "weight_range",
            NotationKind::PercentageSingle => "percentage_single",
            NotationKind::PercentageRange => "percentage_range",
            NotationKind::CompoundPercentage => "compound_percentage",
            NotationKind::Wave => "wave",
            NotationKind::Circuit => "circuit",
            NotationKind::RmBuild => "rm_build",
            NotationKind::RirOnly => "rir_only",
            NotationKind::RirWithWeight => "rir_with_weight",
        };
        f.write_str(s)
    }
}

impl Notation {
    pub fn kind(&self) -> NotationKind {
        match self {
            Notation::Standard { .. } => NotationKind::Standard,
            Notation::Compound { .. } => NotationKind::Compound,
            Notation::MultiWeight { .. } => NotationKind::MultiWeight,
            Notation::WeightRange { .. } => NotationKind::WeightRange,
            Notation::PercentageSingle { .. } => NotationKind::PercentageSingle,
            Notation::PercentageRange { .. } => NotationKind::PercentageRange,
            Notation::CompoundPercentage { .. } => NotationKind::CompoundPercentage,
            Notation::Wave { .. } => NotationKind::Wave,
            Notation::Circuit { .. } => NotationKind::Circuit,
            Notation::RmBuild { .. } => NotationKind::RmBuild,
            Notation::RirOnly { .. } => NotationKind::RirOnly,
            Notation::RirWithWeight { .. } => NotationKind::RirWithWeight,
        }
    }
}

/// Percentage of a one-rep max, as written by the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PercentageSpec {
    Single { percentage: Decimal },
    Range { min: Decimal, max: Decimal },
}

// ──────────────────────────────────────────────
// Prescription
// ──────────────────────────────────────────────

/// A validated set line: one notation plus an optional rest time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prescription {
    #[serde(flatten)]
    notation: Notation,
    #[serde(skip_serializing_if = "Option::is_none")]
    rest_time_seconds: Option<u32>,
}

impl Prescription {
    pub(crate) fn new(notation: Notation, rest_time_seconds: Option<u32>) -> Self {
        Prescription {
            notation,
            rest_time_seconds,
        }
    }

    pub fn notation(&self) -> &Notation {
        &self.notation
    }

    pub fn kind(&self) -> NotationKind {
        self.notation.kind()
    }

    pub fn rest_time_seconds(&self) -> Option<u32> {
        self.rest_time_seconds
    }

    /// True when the weight must come from a one-rep max lookup.
    pub fn needs_rm_lookup(&self) -> bool {
        self.percentage().is_some()
    }

    pub fn percentage(&self) -> Option<PercentageSpec> {
        match &self.notation {
            Notation::PercentageSingle { percentage, .. }
            | Notation::CompoundPercentage { percentage, .. } => Some(PercentageSpec::Single {
                percentage: *percentage,
            }),
            Notation::PercentageRange {
                percentage_min,
                percentage_max,
                ..
            } => Some(PercentageSpec::Range {
                min: *percentage_min,
                max: *percentage_max,
            }),
            _ => None,
        }
    }

    /// Hand over a prescription that needs no lookup.
    ///
    /// Percentage notations are returned unchanged in `Err`.
    pub fn into_resolved(self) -> Result<ResolvedPrescription, Prescription> {
        if self.needs_rm_lookup() {
            return Err(self);
        }
        Ok(ResolvedPrescription {
            prescription: self,
            source_percentage: None,
        })
    }

    /// Replace every percentage with `round(one_rep_max * p / 100)`.
    ///
    /// PercentageSingle becomes Standard, PercentageRange becomes
    /// WeightRange and CompoundPercentage becomes Compound. Notations without
    /// a percentage pass through untouched.
    pub fn apply_one_rep_max(
        &self,
        one_rep_max: Decimal,
    ) -> Result<ResolvedPrescription, ParseError> {
        if one_rep_max <= Decimal::ZERO {
            return Err(ParseError::out_of_range(
                "one-rep max",
                "must be greater than 0",
            ));
        }
        let notation = match &self.notation {
            Notation::PercentageSingle {
                sets,
                reps,
                percentage,
            } => Notation::Standard {
                sets: *sets,
                reps: *reps,
                weight: percent_of(one_rep_max, *percentage)?,
            },
            Notation::PercentageRange {
                sets,
                reps,
                percentage_min,
                percentage_max,
            } => Notation::WeightRange {
                sets: *sets,
                reps: *reps,
                weight_min: percent_of(one_rep_max, *percentage_min)?,
                weight_max: percent_of(one_rep_max, *percentage_max)?,
            },
            Notation::CompoundPercentage {
                sets,
                reps_parts,
                percentage,
            } => Notation::Compound {
                sets: *sets,
                reps_parts: reps_parts.clone(),
                weight: percent_of(one_rep_max, *percentage)?,
            },
            other => other.clone(),
        };
        Ok(ResolvedPrescription {
            prescription: Prescription::new(notation, self.rest_time_seconds),
            source_percentage: self.percentage(),
        })
    }

    /// Flat view of the prescription.
    pub fn summary(&self) -> SetSummary {
        let mut s = SetSummary {
            rest_time_seconds: self.rest_time_seconds,
            needs_rm_lookup: self.needs_rm_lookup(),
            ..SetSummary::default()
        };
        match &self.notation {
            Notation::Standard { sets, reps, weight } => {
                s.sets = *sets;
                s.reps = *reps;
                s.weight = *weight;
            }
            Notation::Compound {
                sets,
                reps_parts,
                weight,
            } => {
                s.sets = *sets;
                s.reps = total_reps(reps_parts);
                s.weight = *weight;
                s.compound_reps = Some(reps_parts.clone());
            }
            Notation::MultiWeight {
                sets,
                reps,
                weights,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.weight = weights.first().copied().unwrap_or_default();
                s.weights = Some(weights.clone());
            }
            Notation::WeightRange {
                sets,
                reps,
                weight_min,
                weight_max,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.weight = *weight_min;
                s.weight_min = Some(*weight_min);
                s.weight_max = Some(*weight_max);
            }
            Notation::PercentageSingle {
                sets,
                reps,
                percentage,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.weight_percentage = Some(*percentage);
            }
            Notation::PercentageRange {
                sets,
                reps,
                percentage_min,
                percentage_max,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.percentage_min = Some(*percentage_min);
                s.percentage_max = Some(*percentage_max);
            }
            Notation::CompoundPercentage {
                sets,
                reps_parts,
                percentage,
            } => {
                s.sets = *sets;
                s.reps = total_reps(reps_parts);
                s.compound_reps = Some(reps_parts.clone());
                s.weight_percentage = Some(*percentage);
            }
            Notation::Wave { phases } => {
                s.sets = phases.len() as u32;
                s.reps = phases.first().map_or(0, |p| p.reps);
                s.weight = phases.first().map_or(Decimal::ZERO, |p| p.weight);
                s.wave_phases = Some(phases.clone());
            }
            Notation::Circuit { sets, items } => {
                s.sets = *sets;
                s.circuit_exercises = Some(items.clone());
            }
            Notation::RmBuild { target_rm } => {
                s.sets = 1;
                s.reps = *target_rm;
                s.target_rm = Some(*target_rm);
            }
            Notation::RirOnly {
                sets,
                reps,
                rir_min,
                rir_max,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.rir_min = Some(*rir_min);
                s.rir_max = Some(*rir_max);
            }
            Notation::RirWithWeight {
                sets,
                reps,
                weight,
                rir_min,
                rir_max,
            } => {
                s.sets = *sets;
                s.reps = *reps;
                s.weight = *weight;
                s.rir_min = Some(*rir_min);
                s.rir_max = Some(*rir_max);
            }
        }
        s
    }
}

/// Sum of compound rep parts. The parser rejects totals that overflow, so
/// saturation only matters for hand-built values.
pub(crate) fn total_reps(parts: &[u32]) -> u32 {
    parts.iter().fold(0u32, |total, r| total.saturating_add(*r))
}

fn percent_of(one_rep_max: Decimal, percentage: Decimal) -> Result<Decimal, ParseError> {
    let weight = one_rep_max
        .checked_mul(percentage)
        .and_then(|w| w.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| ParseError::out_of_range("resolved weight", "is too large"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if weight <= Decimal::ZERO {
        return Err(ParseError::out_of_range(
            "resolved weight",
            format!("rounds to 0 at {}%", percentage.normalize()),
        ));
    }
    Ok(weight)
}

/// Flattened prescription fields, the shape a form or table row expects.
///
/// Fields that a notation does not use stay at their defaults; percentage
/// notations report `weight = 0` together with `needs_rm_lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetSummary {
    pub sets: u32,
    pub reps: u32,
    pub weight: Decimal,
    pub needs_rm_lookup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_reps: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_phases: Option<Vec<WavePhase>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_exercises: Option<Vec<CircuitItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_rm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rir_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rir_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time_seconds: Option<u32>,
}

// ──────────────────────────────────────────────
// ResolvedPrescription
// ──────────────────────────────────────────────

/// A prescription whose weights are all absolute.
///
/// Keeps the percentage it was derived from, if any, so a stored record can
/// be re-edited in its original form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrescription {
    prescription: Prescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_percentage: Option<PercentageSpec>,
}

impl ResolvedPrescription {
    pub fn prescription(&self) -> &Prescription {
        &self.prescription
    }

    pub fn notation(&self) -> &Notation {
        &self.prescription.notation
    }

    pub fn rest_time_seconds(&self) -> Option<u32> {
        self.prescription.rest_time_seconds
    }

    pub fn source_percentage(&self) -> Option<PercentageSpec> {
        self.source_percentage
    }
}
