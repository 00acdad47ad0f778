//! repline-core: set-line notation parser and formatter.
//!
//! Decodes one free-text line such as `4 x 3 @50kg`, `3-2-1-1-1 65` or
//! `Build to 8RM` into a validated [`Prescription`], and turns stored
//! [`PhaseRecord`]s back into editable text.
//!
//! # Public API
//!
//! - [`parse_set_line()`] -- normalize, lex and dispatch a raw line
//! - [`Prescription`] / [`Notation`] -- the typed result
//! - [`Prescription::apply_one_rep_max`] -- resolve percentage notations
//! - [`decompose()`] -- flatten a resolved prescription into records
//! - [`format_record()`] -- the inverse of the parser
//! - [`ParseError`] -- typed rejection carrying the accepted forms
//!
//! Everything here is pure: no I/O and no shared state.

pub mod error;
pub mod format;
pub mod lexer;
pub mod normalize;
pub mod notation;
pub mod parser;
pub mod record;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{ErrorKind, ParseError, ACCEPTED_FORMS};
pub use format::{FormatOptions, Style};
pub use notation::{
    CircuitItem, Notation, NotationKind, PercentageSpec, Prescription, ResolvedPrescription,
    SetSummary, WavePhase,
};
pub use record::{ExerciseType, PhaseRecord};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use format::{format_record, format_record_with};
pub use normalize::normalize;
pub use parser::{parse_notation, parse_set_line, rule_order};
pub use record::decompose;
