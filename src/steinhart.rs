//! Steinhart-Hart Equation Solver for NTC Thermistors
//!
//! ## Physics Background
//!
//! An NTC thermistor's resistance falls as temperature rises, following an
//! empirical cubic relationship between the logarithm of resistance and the
//! reciprocal of absolute temperature:
//!
//! ```text
//! 1/T = a + b·ln(R) + c·ln(R)³
//!
//! Where:
//! - T = absolute temperature (K)
//! - R = resistance (Ω)
//! - a, b, c = device-specific coefficients
//! ```
//!
//! Manufacturers rarely publish `a`, `b`, `c` directly. Datasheets instead
//! give a nominal point (typically 10 kΩ at 25 °C) plus one or two *beta*
//! constants: the slope of `ln(R)` against `1/T` between the nominal point
//! and a second temperature. This module derives the full coefficient set
//! from whichever calibration data is available:
//!
//! - **Direct**: the caller already has `(a, b, c)`.
//! - **Single beta**: nominal point + one beta. Fixes `c = 0`, which is the
//!   classic beta model and accurate to roughly ±1 °C over a narrow range.
//! - **Three datapoints**: exact interpolating fit through three measured
//!   `(T, R)` pairs, not a least-squares regression.
//! - **Double beta**: nominal point + two betas. Each beta is first converted
//!   to the resistance it implies at its stated temperature, then the three
//!   resulting points go through the three-datapoint fit. Uses the full cubic
//!   and typically tracks the device much closer than either beta alone.
//!
//! ## Numerical Notes
//!
//! Coefficients live at very different scales (`a` ~1e-3, `b` ~1e-4,
//! `c` ~1e-7), and the fit subtracts nearly equal reciprocals, so everything
//! here is `f64`. The inverse (temperature → resistance) has two branches:
//! the general cubic inverse divides by `c`, which explodes when `c` is zero
//! or nearly so (the beta-model case), so `c == 0` takes a closed-form
//! exponential instead.
//!
//! All transcendental math goes through `libm` for `no_std` compatibility.

use libm::{cbrt, exp, log, sqrt};

use crate::{
    constants::celsius_to_kelvin,
    errors::{ThermistorError, ThermistorResult},
};

/// A measured calibration point: temperature in Celsius, resistance in ohms.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datapoint {
    /// Temperature at which the resistance was measured (°C)
    pub temperature: f64,
    /// Measured resistance (Ω)
    pub resistance: f64,
}

impl Datapoint {
    /// Temperature of this point in Kelvin
    #[inline]
    pub fn kelvin(&self) -> f64 {
        celsius_to_kelvin(self.temperature)
    }

    /// Validate the point and return its absolute temperature.
    ///
    /// Calibration points must sit in the physical domain: strictly positive
    /// resistance and strictly positive absolute temperature.
    fn check(&self) -> ThermistorResult<f64> {
        if self.resistance <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "calibration resistance must be greater than zero",
            });
        }
        let kelvin = self.kelvin();
        if kelvin <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "calibration temperature must be above absolute zero",
            });
        }
        Ok(kelvin)
    }
}

/// A secondary calibration point expressed as a beta constant.
///
/// Datasheets quote betas as e.g. "B25/50 = 3950": the beta constant relating
/// the nominal 25 °C point to the resistance at 50 °C. The `temperature` here
/// is that second temperature; the nominal point is supplied separately.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BetaPoint {
    /// Temperature the beta constant is quoted against (°C)
    pub temperature: f64,
    /// Beta constant (K)
    pub beta: f64,
}

impl BetaPoint {
    fn check(&self) -> ThermistorResult<f64> {
        if self.beta <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "beta constant must be greater than zero",
            });
        }
        let kelvin = celsius_to_kelvin(self.temperature);
        if kelvin <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "beta temperature must be above absolute zero",
            });
        }
        Ok(kelvin)
    }

    /// Resistance this beta implies at its stated temperature, relative to
    /// the nominal point: `R = R_nom · exp(beta·(1/T − 1/T_nom))`.
    fn implied_datapoint(&self, nominal: &Datapoint, nominal_kelvin: f64) -> ThermistorResult<Datapoint> {
        let kelvin = self.check()?;
        let resistance = nominal.resistance * exp(self.beta * (1.0 / kelvin - 1.0 / nominal_kelvin));
        Ok(Datapoint {
            temperature: self.temperature,
            resistance,
        })
    }
}

/// Steinhart-Hart coefficients, immutable once derived.
///
/// Evaluation is always in absolute temperature: [`Steinhart::temperature`]
/// returns Kelvin and [`Steinhart::resistance`] expects Kelvin. Callers
/// working in Celsius convert at the boundary with
/// [`celsius_to_kelvin`](crate::constants::celsius_to_kelvin).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steinhart {
    a: f64,
    b: f64,
    c: f64,
}

impl Steinhart {
    /// Use coefficients taken directly from a datasheet or external fit.
    pub const fn from_coefficients(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Derive coefficients from a nominal point and a single beta constant.
    ///
    /// This is the classic beta model: `b = 1/beta`,
    /// `a = 1/T_nom − b·ln(R_nom)`, `c = 0`.
    pub fn from_beta(nominal: Datapoint, beta: f64) -> ThermistorResult<Self> {
        let nominal_kelvin = nominal.check()?;
        if beta <= 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "beta constant must be greater than zero",
            });
        }
        let b = 1.0 / beta;
        let a = 1.0 / nominal_kelvin - b * log(nominal.resistance);
        Ok(Self { a, b, c: 0.0 })
    }

    /// Derive coefficients from a nominal point and two beta constants.
    ///
    /// Each beta is converted to the datapoint it implies via the reverse
    /// beta relation, then the nominal point and the two implied points are
    /// fit exactly with [`Steinhart::from_datapoints`].
    pub fn from_betas(nominal: Datapoint, first: BetaPoint, second: BetaPoint) -> ThermistorResult<Self> {
        let nominal_kelvin = nominal.check()?;
        let one = first.implied_datapoint(&nominal, nominal_kelvin)?;
        let two = second.implied_datapoint(&nominal, nominal_kelvin)?;
        Self::from_datapoints([nominal, one, two])
    }

    /// Derive coefficients by fitting the cubic exactly through three points.
    ///
    /// The three `(ln R, 1/T)` pairs pin down `a`, `b`, `c` via the pairwise
    /// slopes and algebraic back-substitution. This interpolating fit passes
    /// through all three points exactly.
    pub fn from_datapoints(points: [Datapoint; 3]) -> ThermistorResult<Self> {
        let mut x = [0.0; 3];
        let mut y = [0.0; 3];
        for (i, point) in points.iter().enumerate() {
            let kelvin = point.check()?;
            x[i] = log(point.resistance);
            y[i] = 1.0 / kelvin;
        }

        let denom = (x[2] - x[0]) * (x[0] + x[1] + x[2]);
        if x[0] == x[1] || x[1] == x[2] || x[0] == x[2] || denom == 0.0 {
            return Err(ThermistorError::Configuration {
                reason: "calibration points must have distinct resistances",
            });
        }

        let p1 = (y[1] - y[0]) / (x[1] - x[0]);
        let p2 = (y[2] - y[1]) / (x[2] - x[1]);

        let c = (p2 - p1) / denom;
        let b = p1 - c * (x[0] * x[0] + x[0] * x[1] + x[1] * x[1]);
        let a = y[0] - b * x[0] - c * x[0] * x[0] * x[0];

        Ok(Self { a, b, c })
    }

    /// Absolute temperature (K) at the given resistance (Ω).
    pub fn temperature(&self, resistance: f64) -> ThermistorResult<f64> {
        if resistance <= 0.0 {
            return Err(ThermistorError::Domain { value: resistance });
        }
        let ln_r = log(resistance);
        Ok(1.0 / (self.a + self.b * ln_r + self.c * ln_r * ln_r * ln_r))
    }

    /// Resistance (Ω) at the given absolute temperature (K).
    ///
    /// `c == 0` (the beta model) takes the closed-form exponential inverse;
    /// the general cubic inverse divides by `c` and is numerically unstable
    /// near zero.
    pub fn resistance(&self, temperature: f64) -> ThermistorResult<f64> {
        if temperature <= 0.0 {
            return Err(ThermistorError::Domain { value: temperature });
        }

        if self.c == 0.0 {
            return Ok(exp((1.0 / temperature - self.a) / self.b));
        }

        let y = (self.a - 1.0 / temperature) / (2.0 * self.c);
        let k = self.b / (3.0 * self.c);
        let x = sqrt(k * k * k + y * y);
        Ok(exp(cbrt(x - y) - cbrt(x + y)))
    }

    /// Coefficient `a`
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Coefficient `b`
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Coefficient `c`
    pub fn c(&self) -> f64 {
        self.c
    }
}
