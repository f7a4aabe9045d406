//! Error Types for Thermistor Model and Table Construction Failures
//!
//! ## Design Philosophy
//!
//! The error system follows the same rules as the rest of the crate:
//!
//! 1. **Small Size**: Every variant carries at most one scalar of context, so
//!    the enum stays register-sized and cheap to return from hot paths.
//!
//! 2. **No Heap Allocation**: Only `&'static str` messages and inline scalars.
//!    Deterministic memory usage on `no_std` targets.
//!
//! 3. **Copy Semantics**: Errors implement Copy for efficient return from
//!    functions without move semantics complications.
//!
//! 4. **Actionable Information**: Each variant tells the caller which knob to
//!    turn: fix the configuration, fix the input, or rebuild the table with
//!    different sampling parameters.
//!
//! ## Error Categories
//!
//! ### Construction-Time
//! - `Configuration`: a parameter fails validation before any math runs
//!   (inverted temperature range, non-positive reference voltage, datapoint
//!   count below two, calibration point outside the physical domain)
//! - `NonMonotonic`: the sampled table is not strictly descending; the
//!   model/transform combination inverts ordering over the requested range
//! - `OverSampled`: adjacent table entries collide; the value resolution
//!   cannot distinguish neighbouring temperature steps
//!
//! ### Evaluation-Time
//! - `Domain`: the Steinhart-Hart equations received a non-physical value
//!   (zero or negative resistance, zero or negative absolute temperature)
//!
//! Table queries never produce an error: any reading is classified as either
//! in-range or saturated by [`NtcTable::lookup`](crate::table::NtcTable::lookup).
//!
//! ## Error Handling Strategy
//!
//! Every error is surfaced synchronously at the failing call; nothing is
//! retried internally, because a retry would need different parameters and
//! that is a caller decision. Construction is all-or-nothing: a failed build
//! leaves no partially valid table behind.

use thiserror_no_std::Error;

/// Result type for thermistor operations
pub type ThermistorResult<T> = Result<T, ThermistorError>;

/// Thermistor errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ThermistorError {
    /// Construction parameter failed validation
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// What was wrong with the parameter
        reason: &'static str,
    },

    /// Model evaluation received a value outside the physical domain
    #[error("Value {value} outside physical domain (must be > 0)")]
    Domain {
        /// The offending resistance or absolute temperature
        value: f64,
    },

    /// Built table is not strictly descending
    #[error("Table not strictly descending at index {index}: model or circuit inverts ordering")]
    NonMonotonic {
        /// Index of the first entry that is greater than its predecessor
        index: usize,
    },

    /// Built table contains equal adjacent entries
    #[error("Adjacent table entries equal at index {index}: decrease datapoint count or widen the table value type")]
    OverSampled {
        /// Index of the first entry that duplicates its predecessor
        index: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThermistorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Configuration { reason } =>
                defmt::write!(fmt, "Invalid configuration: {}", reason),
            Self::Domain { value } =>
                defmt::write!(fmt, "Value {} outside physical domain", value),
            Self::NonMonotonic { index } =>
                defmt::write!(fmt, "Table not descending at index {}", index),
            Self::OverSampled { index } =>
                defmt::write!(fmt, "Table over-sampled at index {}", index),
        }
    }
}
