//! Pre-Computed Thermistor Lookup Tables
//!
//! ## Motivation
//!
//! Embedded processors often lack hardware floating-point units, and the
//! Steinhart-Hart inverse costs an `exp`, a `sqrt` and two cube roots per
//! evaluation, thousands of cycles in software floating point. This module
//! spends that cost exactly once, at initialization: the model is sampled
//! over an evenly spaced temperature range into a fixed-size table, and every
//! reading afterwards is a binary search plus one linear interpolation.
//!
//! ```text
//! calibration ──▶ Steinhart ──▶ build ──▶ NtcTable ──▶ lookup(reading)
//!                               (once)   (immutable)   (O(log n), no alloc)
//! ```
//!
//! ## Table Shape
//!
//! Entry `i` holds the transformed resistance at temperature
//! `min + i·delta`, so temperature ascends with index while the stored value
//! (resistance, divider voltage or ADC code, all falling with temperature on
//! an NTC) strictly descends:
//!
//! ```text
//! index:  0        1        2       ...      n-1
//! temp:   min      min+Δ    min+2Δ  ...      max        (ascending)
//! value:  32768 ▶  29211 ▶  26076   ...  ▶   411        (descending)
//!         coldest                            hottest
//! ```
//!
//! Strict descent is the invariant that makes binary search valid, so it is
//! checked once, over the whole table, before a table can be observed at all.
//! A build that fails returns an error and nothing else; there is no
//! partially valid table state.
//!
//! ## Storage
//!
//! Backing storage is a `heapless::Vec` inline in the table: capacity `N` is
//! a compile-time constant, the populated length is the runtime-validated
//! datapoint count. No heap is touched at any point, and a built table is
//! immutable, so sharing `&NtcTable` across threads needs no locking.

use heapless::Vec;

use crate::{
    circuit::{Circuit, Direct},
    constants::KELVIN_OFFSET,
    errors::{ThermistorError, ThermistorResult},
    steinhart::Steinhart,
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// The temperature span a table is sampled over, in Celsius.
///
/// Bounds are validated once at construction; a `TempRange` that exists is
/// always well-ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempRange {
    min: f64,
    max: f64,
}

impl TempRange {
    /// Create a range; `min` must be strictly less than `max`.
    pub fn new(min: f64, max: f64) -> ThermistorResult<Self> {
        if !(min < max) {
            return Err(ThermistorError::Configuration {
                reason: "temperature range min must be less than max",
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (°C)
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (°C)
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the range (°C)
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Element type a table can store.
///
/// Integral types quantize on store (round half away from zero), matching
/// what a real register read would hold; float types store the sample
/// exactly. Interpolation arithmetic widens through `f64` either way.
pub trait TableValue: Copy + PartialOrd {
    /// Quantize a raw sample into this type.
    fn from_raw(raw: f64) -> Self;
    /// Widen to `f64` for interpolation arithmetic.
    fn into_f64(self) -> f64;
}

macro_rules! integral_table_value {
    ($($ty:ty),*) => {$(
        impl TableValue for $ty {
            #[inline]
            fn from_raw(raw: f64) -> Self {
                libm::round(raw) as $ty
            }
            #[inline]
            fn into_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

integral_table_value!(u8, u16, u32, u64);

impl TableValue for f32 {
    #[inline]
    fn from_raw(raw: f64) -> Self {
        raw as f32
    }
    #[inline]
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl TableValue for f64 {
    #[inline]
    fn from_raw(raw: f64) -> Self {
        raw
    }
    #[inline]
    fn into_f64(self) -> f64 {
        self
    }
}

/// Result of a table lookup: interpolated temperature plus whether the
/// reading fell outside the calibrated range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Interpolated temperature (°C), clamped to the table range
    pub temperature: f64,
    /// True when the reading was outside the table and the temperature is a
    /// clamped boundary value rather than an interpolation
    pub saturated: bool,
}

/// An immutable NTC lookup table over `V` values with capacity `N`.
///
/// Built once from a [`Steinhart`] model (optionally through a
/// [`Circuit`] transform), validated for strict descent, then read-only for
/// its whole lifetime. `N` bounds the datapoint count; the actual count is a
/// runtime parameter validated during the build.
#[derive(Debug, Clone)]
pub struct NtcTable<V: TableValue, const N: usize> {
    values: Vec<V, N>,
    range: TempRange,
    delta: f64,
}

impl<V: TableValue, const N: usize> NtcTable<V, N> {
    /// Build a table of raw resistances (identity transform).
    pub fn build(model: &Steinhart, range: TempRange, datapoints: usize) -> ThermistorResult<Self> {
        Self::build_with(model, range, datapoints, &Direct)
    }

    /// Build a table, mapping every sampled resistance through `circuit`.
    ///
    /// Samples `datapoints` evenly spaced temperatures across `range`
    /// (endpoints included), evaluates the model at each, transforms, and
    /// quantizes into `V`. The finished table is checked for strict descent
    /// before it is returned; on any failure no table exists.
    pub fn build_with<C: Circuit>(
        model: &Steinhart,
        range: TempRange,
        datapoints: usize,
        circuit: &C,
    ) -> ThermistorResult<Self> {
        if datapoints < 2 {
            return Err(ThermistorError::Configuration {
                reason: "table needs at least two datapoints",
            });
        }
        if datapoints > N {
            return Err(ThermistorError::Configuration {
                reason: "datapoint count exceeds table capacity",
            });
        }

        let delta = range.span() / (datapoints - 1) as f64;

        let mut values: Vec<V, N> = Vec::new();
        for i in 0..datapoints {
            let kelvin = range.min() + i as f64 * delta + KELVIN_OFFSET;
            let resistance = model.resistance(kelvin)?;
            let raw = circuit.transform(resistance);
            if !raw.is_finite() {
                return Err(ThermistorError::Domain { value: raw });
            }
            values
                .push(V::from_raw(raw))
                .map_err(|_| ThermistorError::Configuration {
                    reason: "datapoint count exceeds table capacity",
                })?;
        }

        Self::check_descending(&values)?;

        Ok(Self { values, range, delta })
    }

    /// Verify strict descent over the whole table.
    ///
    /// Duplicates take precedence over inversions in the report: a duplicate
    /// means the sampling is too fine for the value resolution (actionable by
    /// rebuilding with fewer datapoints or a wider type), while an inversion
    /// means the model/circuit combination itself is wrong for this range.
    fn check_descending(values: &[V]) -> ThermistorResult<()> {
        let mut inverted = None;
        for (i, pair) in values.windows(2).enumerate() {
            if pair[1] == pair[0] {
                return Err(ThermistorError::OverSampled { index: i + 1 });
            }
            if pair[1] > pair[0] && inverted.is_none() {
                inverted = Some(i + 1);
            }
        }
        match inverted {
            Some(index) => Err(ThermistorError::NonMonotonic { index }),
            None => Ok(()),
        }
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a built table (length is at least two)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The stored values, coldest (largest) first
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Entry at `index`, if in bounds
    #[inline]
    pub fn get(&self, index: usize) -> Option<V> {
        self.values.get(index).copied()
    }

    /// Temperature range the table was sampled over
    #[inline]
    pub fn range(&self) -> TempRange {
        self.range
    }

    /// Temperature step between adjacent entries (°C)
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Temperature (°C) of the entry at `index`
    #[inline]
    pub fn temperature_at(&self, index: usize) -> f64 {
        self.range.min() + index as f64 * self.delta
    }

    /// Look up the temperature for a reading in the table's value domain.
    ///
    /// Never fails: any reading is classified as either in-range or
    /// saturated. An exact match on either boundary entry is in-range
    /// (`saturated == false`); only readings strictly beyond a boundary
    /// saturate, clamped to that boundary's temperature. Interior readings
    /// interpolate linearly between the bracketing entries, with the stored
    /// values as the independent axis.
    pub fn lookup(&self, value: V) -> Sample {
        let n = self.values.len();

        // Values descend, so this is the first index holding <= value.
        let k = self.values.partition_point(|v| *v > value);

        if k == n {
            // Reading below the hottest stored value
            log_warn!(
                "thermistor lookup saturated hot: reading {} below table minimum",
                value.into_f64()
            );
            return Sample {
                temperature: self.range.max(),
                saturated: true,
            };
        }

        if self.values[k] == value {
            return Sample {
                temperature: self.temperature_at(k),
                saturated: false,
            };
        }

        if k == 0 {
            // Reading above the coldest stored value
            log_warn!(
                "thermistor lookup saturated cold: reading {} above table maximum",
                value.into_f64()
            );
            return Sample {
                temperature: self.range.min(),
                saturated: true,
            };
        }

        // Bracketed: values[k-1] > value > values[k]
        let cold_v = self.values[k - 1].into_f64();
        let hot_v = self.values[k].into_f64();
        let cold_t = self.temperature_at(k - 1);
        let hot_t = self.temperature_at(k);
        let q = value.into_f64();

        Sample {
            temperature: cold_t + (cold_v - q) * (hot_t - cold_t) / (cold_v - hot_v),
            saturated: false,
        }
    }
}
