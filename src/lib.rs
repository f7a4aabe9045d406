//! NTC thermistor lookup tables for embedded firmware
//!
//! Solves the Steinhart-Hart resistance/temperature model once, at
//! initialization, and materializes it into a fixed-size monotonic table in
//! the same domain as the raw sensor reading (ohms, divider voltage, or ADC
//! code). Runtime queries are a binary search plus one linear interpolation,
//! with no transcendental math and no allocation.
//!
//! Key constraints:
//! - `no_std` by default, no heap anywhere
//! - Construction is all-or-nothing: a table that exists is valid
//! - Query never fails: readings are in-range or saturated, never errors
//!
//! ```no_run
//! use thermistor_lut::{Datapoint, NtcTable, Steinhart, TempRange};
//!
//! // B25 = 3950, 10 kΩ at 25 °C, straight off the datasheet
//! let nominal = Datapoint { temperature: 25.0, resistance: 10_000.0 };
//! let model = Steinhart::from_beta(nominal, 3950.0)?;
//!
//! let range = TempRange::new(-50.0, 150.0)?;
//! let table: NtcTable<f64, 201> = NtcTable::build(&model, range, 201)?;
//!
//! // One resistance reading in, Celsius out
//! let sample = table.lookup(10_000.0);
//! assert!(!sample.saturated);
//! # Ok::<(), thermistor_lut::ThermistorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod circuit;
pub mod constants;
pub mod errors;
pub mod steinhart;
pub mod table;

// Public API
pub use circuit::{Adc, Circuit, Direct, HalfBridge};
pub use errors::{ThermistorError, ThermistorResult};
pub use steinhart::{BetaPoint, Datapoint, Steinhart};
pub use table::{NtcTable, Sample, TableValue, TempRange};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
