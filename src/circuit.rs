//! Circuit Transforms: Resistance to Measurable Domain
//!
//! ## Motivation
//!
//! Firmware never reads a resistance directly. The thermistor sits in a
//! measurement circuit, and what the code actually sees is a divided voltage
//! or a raw ADC code. A lookup table is only usable if it stores values in
//! the *same domain the query arrives in*, so table construction applies one
//! of these transforms to every sample:
//!
//! ```text
//! Direct:      R ──────────────────────────▶ R            (table in Ω)
//! HalfBridge:  R ──▶ divider ──▶ voltage ──▶ ADC code     (table in counts)
//! ```
//!
//! ## Half-Bridge Topology
//!
//! The modeled wiring places the thermistor between the ADC input node and
//! ground, in series with a known pull-up resistor:
//!
//! ```text
//!        supply
//!          │
//!         ┌┴┐
//!         │ │ r1 (fixed)
//!         └┬┘
//!          ├────────▶ ADC input (impedance Z)
//!         ┌┴┐
//!         │ │ r2 (thermistor)
//!         └┬┘
//!          │
//!         GND
//! ```
//!
//! When the ADC input impedance is finite it loads the lower leg, so the
//! thermistor is first combined with `Z` as a parallel pair before the
//! divider voltage is computed.
//!
//! Transforms are pure functions of their fixed parameters, with no state
//! and no allocation, so applying one per sample during construction is the
//! only cost they ever incur.

use libm::floor;

use crate::errors::{ThermistorError, ThermistorResult};

/// Widest ADC modeled; also keeps `2^n − 1` exactly representable in `f64`.
const MAX_ADC_RESOLUTION: u8 = 24;

/// A pure transform from thermistor resistance to the table's value domain.
///
/// Table construction applies one transform uniformly to every sampled
/// resistance, which keeps the stored table and the runtime query value in
/// the same domain.
pub trait Circuit {
    /// Map a physical resistance (Ω) to the value the table should store.
    fn transform(&self, resistance: f64) -> f64;
}

/// Identity transform: the table stores raw resistance in ohms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Circuit for Direct {
    #[inline]
    fn transform(&self, resistance: f64) -> f64 {
        resistance
    }
}

/// An N-bit ADC quantizer with optional finite input impedance.
///
/// Not a [`Circuit`] on its own: an ADC converts voltage, not resistance.
/// It plugs into [`HalfBridge`], which owns the resistance-to-voltage step.
#[derive(Debug, Clone, Copy)]
pub struct Adc {
    reference: f64,
    impedance: Option<f64>,
    resolution: u8,
}

impl Adc {
    /// Create an ideal ADC (infinite input impedance).
    pub fn new(resolution: u8, reference: f64) -> ThermistorResult<Self> {
        Self::build(resolution, reference, None)
    }

    /// Create an ADC whose input loads the measurement node.
    pub fn with_impedance(resolution: u8, reference: f64, impedance: f64) -> ThermistorResult<Self> {
        if impedance <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "ADC input impedance must be greater than zero",
            });
        }
        Self::build(resolution, reference, Some(impedance))
    }

    fn build(resolution: u8, reference: f64, impedance: Option<f64>) -> ThermistorResult<Self> {
        if reference <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "ADC reference voltage must be greater than zero",
            });
        }
        if resolution == 0 || resolution > MAX_ADC_RESOLUTION {
            return Err(ThermistorError::Configuration {
                reason: "ADC resolution must be between 1 and 24 bits",
            });
        }
        Ok(Self {
            reference,
            impedance,
            resolution,
        })
    }

    /// Quantize a voltage to an ADC code.
    ///
    /// The ratio against the reference is clamped to `[0, 1]`, so inputs
    /// outside the conversion range rail at code 0 or full scale.
    pub fn convert(&self, voltage: f64) -> f64 {
        let mut ratio = voltage / self.reference;
        if ratio > 1.0 {
            ratio = 1.0;
        } else if ratio < 0.0 {
            ratio = 0.0;
        }
        floor(ratio * self.max_code())
    }

    /// Full-scale code: `2^resolution − 1`
    #[inline]
    pub fn max_code(&self) -> f64 {
        ((1u64 << self.resolution) - 1) as f64
    }

    /// Input impedance (Ω), `None` for an ideal input
    #[inline]
    pub fn impedance(&self) -> Option<f64> {
        self.impedance
    }
}

/// Resistive half-bridge feeding an [`Adc`]: the table stores ADC codes.
#[derive(Debug, Clone, Copy)]
pub struct HalfBridge {
    adc: Adc,
    supply: f64,
    bridge: f64,
}

impl HalfBridge {
    /// Create a half-bridge with the given supply voltage and fixed pull-up
    /// resistor `r1`.
    pub fn new(adc: Adc, supply: f64, r1: f64) -> ThermistorResult<Self> {
        if supply <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "supply voltage must be greater than zero",
            });
        }
        if r1 <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "bridge resistor must be greater than zero",
            });
        }
        Ok(Self { adc, supply, bridge: r1 })
    }
}

impl Circuit for HalfBridge {
    fn transform(&self, resistance: f64) -> f64 {
        // Finite ADC impedance sits in parallel with the thermistor leg.
        let r2 = match self.adc.impedance {
            Some(z) => (z * resistance) / (z + resistance),
            None => resistance,
        };
        self.adc.convert((self.supply * r2) / (self.bridge + r2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_is_identity() {
        let circuit = Direct;
        for value in [0.001, 1.0, 330.0, 10_000.0, 1.0e7] {
            assert_eq!(circuit.transform(value), value);
        }
    }

    #[test]
    fn adc_rejects_bad_parameters() {
        assert!(matches!(
            Adc::new(12, 0.0),
            Err(ThermistorError::Configuration { .. })
        ));
        assert!(matches!(
            Adc::new(12, -3.3),
            Err(ThermistorError::Configuration { .. })
        ));
        assert!(matches!(
            Adc::new(0, 3.3),
            Err(ThermistorError::Configuration { .. })
        ));
        assert!(matches!(
            Adc::new(32, 3.3),
            Err(ThermistorError::Configuration { .. })
        ));
        assert!(matches!(
            Adc::with_impedance(12, 3.3, 0.0),
            Err(ThermistorError::Configuration { .. })
        ));
    }

    #[test]
    fn impedance_reflects_construction() {
        assert_eq!(Adc::new(12, 5.0).unwrap().impedance(), None);
        assert_eq!(
            Adc::with_impedance(16, 5.0, 10_000.0).unwrap().impedance(),
            Some(10_000.0)
        );
    }

    #[test]
    fn adc_conversion_clamps_and_floors() {
        let adc = Adc::new(12, 3.3).unwrap();

        assert_eq!(adc.convert(0.0), 0.0);
        assert_eq!(adc.convert(-1.0), 0.0);
        assert_eq!(adc.convert(3.3), 4095.0);
        assert_eq!(adc.convert(5.0), 4095.0);

        // Mid-scale: 1.65/3.3 * 4095 = 2047.5, floored
        assert_eq!(adc.convert(1.65), 2047.0);
    }

    #[test]
    fn half_bridge_matches_divider_formula() {
        let adc = Adc::new(12, 3.3).unwrap();
        let bridge = HalfBridge::new(adc, 3.3, 3000.0).unwrap();

        for r2 in [100.0, 1000.0, 3000.0, 10_000.0, 100_000.0] {
            let voltage = (3.3 * r2) / (3000.0 + r2);
            let expected = libm::floor(voltage / 3.3 * 4095.0);
            assert_eq!(bridge.transform(r2), expected);
        }

        // Equal legs sit at half scale
        assert_eq!(bridge.transform(3000.0), 2047.0);
    }

    #[test]
    fn finite_impedance_loads_the_bridge() {
        let ideal = HalfBridge::new(Adc::new(12, 3.3).unwrap(), 3.3, 3000.0).unwrap();
        let loaded =
            HalfBridge::new(Adc::with_impedance(12, 3.3, 10_000.0).unwrap(), 3.3, 3000.0).unwrap();

        // Loading pulls the measured node toward ground, so codes drop.
        assert!(loaded.transform(10_000.0) < ideal.transform(10_000.0));

        // Parallel combination: 10k ∥ 10k = 5k
        let voltage = (3.3 * 5000.0) / (3000.0 + 5000.0);
        let expected = libm::floor(voltage / 3.3 * 4095.0);
        assert_eq!(loaded.transform(10_000.0), expected);
    }
}
