//! Decomposed, storage-shaped phase records.
//!
//! A resolved prescription is flattened into one or more [`PhaseRecord`]s,
//! the row shape a persistence store keeps. Waves become one record per
//! phase; every other notation becomes a single record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::notation::{total_reps, CircuitItem, Notation, PercentageSpec, ResolvedPrescription};

/// Storage tag for the notation a record came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    Standard,
    Compound,
    MultiWeight,
    WeightRange,
    Wave,
    Circuit,
    RmBuild,
    Rir,
}

/// One stored exercise phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub sets: u32,
    pub repetitions: u32,
    pub weight: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Decimal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_reps: Option<Vec<u32>>,
    #[serde(default)]
    pub exercise_type: ExerciseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rir_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_exercises: Option<Vec<CircuitItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_max: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time_seconds: Option<u32>,
    /// Percentage the weight was resolved from, kept for lossless re-editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_percentage: Option<PercentageSpec>,
}

impl PhaseRecord {
    fn base(exercise_type: ExerciseType, sets: u32, repetitions: u32, weight: Decimal) -> Self {
        PhaseRecord {
            sets,
            repetitions,
            weight,
            exercise_type,
            ..PhaseRecord::default()
        }
    }
}

/// Flatten a resolved prescription into its storage records.
pub fn decompose(resolved: &ResolvedPrescription) -> Vec<PhaseRecord> {
    let mut records = match resolved.notation() {
        Notation::Standard { sets, reps, weight } => {
            vec![PhaseRecord::base(ExerciseType::Standard, *sets, *reps, *weight)]
        }
        Notation::Compound {
            sets,
            reps_parts,
            weight,
        } => vec![PhaseRecord {
            compound_reps: Some(reps_parts.clone()),
            ..PhaseRecord::base(
                ExerciseType::Compound,
                *sets,
                total_reps(reps_parts),
                *weight,
            )
        }],
        Notation::MultiWeight {
            sets,
            reps,
            weights,
        } => vec![PhaseRecord {
            weights: Some(weights.clone()),
            ..PhaseRecord::base(
                ExerciseType::MultiWeight,
                *sets,
                *reps,
                weights.first().copied().unwrap_or_default(),
            )
        }],
        Notation::WeightRange {
            sets,
            reps,
            weight_min,
            weight_max,
        } => vec![PhaseRecord {
            weight_min: Some(*weight_min),
            weight_max: Some(*weight_max),
            ..PhaseRecord::base(ExerciseType::WeightRange, *sets, *reps, *weight_min)
        }],
        Notation::Wave { phases } => phases
            .iter()
            .map(|phase| PhaseRecord::base(ExerciseType::Wave, 1, phase.reps, phase.weight))
            .collect(),
        Notation::Circuit { sets, items } => vec![PhaseRecord {
            circuit_exercises: Some(items.clone()),
            ..PhaseRecord::base(ExerciseType::Circuit, *sets, 0, Decimal::ZERO)
        }],
        Notation::RmBuild { target_rm } => vec![PhaseRecord {
            target_rm: Some(*target_rm),
            ..PhaseRecord::base(ExerciseType::RmBuild, 1, *target_rm, Decimal::ZERO)
        }],
        Notation::RirOnly {
            sets,
            reps,
            rir_min,
            rir_max,
        } => vec![PhaseRecord {
            rir_min: Some(*rir_min),
            rir_max: Some(*rir_max),
            ..PhaseRecord::base(ExerciseType::Rir, *sets, *reps, Decimal::ZERO)
        }],
        Notation::RirWithWeight {
            sets,
            reps,
            weight,
            rir_min,
            rir_max,
        } => vec![PhaseRecord {
            rir_min: Some(*rir_min),
            rir_max: Some(*rir_max),
            ..PhaseRecord::base(ExerciseType::Rir, *sets, *reps, *weight)
        }],
        // A ResolvedPrescription never holds a percentage notation.
        Notation::PercentageSingle { .. }
        | Notation::PercentageRange { .. }
        | Notation::CompoundPercentage { .. } => Vec::new(),
    };
    for record in &mut records {
        record.rest_time_seconds = resolved.rest_time_seconds();
        record.source_percentage = resolved.source_percentage();
    }
    records
}
