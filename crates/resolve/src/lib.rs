//! repline-resolve: turn parsed set lines into stored phases.
//!
//! Percentage notations need the athlete's latest one-rep max before they
//! can be stored. A [`OneRepMaxProvider`] supplies it; [`resolve()`] applies
//! it; [`submit_line()`] and [`edit_phase()`] run the whole
//! parse, resolve, decompose and store sequence against a
//! [`TrainingStore`](repline_storage::TrainingStore).

pub mod error;
pub mod provider;
pub mod resolve;
pub mod workflow;

pub use error::{ProviderError, ResolveError, SubmitError};
pub use provider::{OneRepMaxProvider, StaticOneRepMaxProvider, StoreOneRepMaxProvider};
pub use resolve::resolve;
pub use workflow::{edit_phase, edit_text, submit_line};
