//! Integration tests for end-to-end table construction and lookup
//!
//! Exercises the full path a firmware integration takes: datasheet
//! calibration → Steinhart-Hart coefficients → (optional circuit transform)
//! → built table → interpolated lookups, including the saturation and
//! failure behavior at each stage.

use thermistor_lut::{
    Adc, BetaPoint, Circuit, Datapoint, HalfBridge, NtcTable, Steinhart, TempRange,
    ThermistorError,
    constants::celsius_to_kelvin,
};

use proptest::prelude::*;

/// Typical 3k thermistor from its manufacturer curve fit
const TYPICAL: Steinhart = Steinhart::from_coefficients(1.4e-3, 2.37e-4, 9.9e-8);

fn ten_k_beta_model() -> Steinhart {
    let nominal = Datapoint { temperature: 25.0, resistance: 10_000.0 };
    Steinhart::from_beta(nominal, 3950.0).unwrap()
}

#[test]
fn single_beta_ten_k_thermistor() {
    // 10 kΩ @ 25 °C, B = 3950, table over [-50, 150] with 201 points
    let model = ten_k_beta_model();
    let range = TempRange::new(-50.0, 150.0).unwrap();
    let table: NtcTable<f64, 201> = NtcTable::build(&model, range, 201).unwrap();

    assert_eq!(table.len(), 201);
    assert_eq!(table.delta(), 1.0);

    // The model must hit the nominal point exactly
    let at_nominal = model.resistance(celsius_to_kelvin(25.0)).unwrap();
    assert!((at_nominal - 10_000.0).abs() < 1e-6);

    // And looking the nominal resistance back up must give 25 °C, in range
    let sample = table.lookup(10_000.0);
    assert!(!sample.saturated);
    assert!((sample.temperature - 25.0).abs() < 1e-6);
}

#[test]
fn oversampling_fails_construction() {
    // 5000 steps over 60 °C through an 8-bit ADC: at most 256 distinct
    // codes, so adjacent entries must collide
    let model = ten_k_beta_model();
    let range = TempRange::new(-10.0, 50.0).unwrap();
    let adc = Adc::new(8, 3.3).unwrap();
    let bridge = HalfBridge::new(adc, 3.3, 10_000.0).unwrap();

    let result = NtcTable::<u8, 5000>::build_with(&model, range, 5000, &bridge);
    assert!(matches!(result, Err(ThermistorError::OverSampled { .. })));
}

#[test]
fn half_bridge_table_matches_closed_form() {
    // 3.3 V supply, 3 kΩ pull-up, ideal 12-bit ADC: every stored code must
    // equal floor(((3.3·r2)/(3000+r2))·4095/3.3) for the sampled resistance
    let adc = Adc::new(12, 3.3).unwrap();
    let bridge = HalfBridge::new(adc, 3.3, 3000.0).unwrap();
    let range = TempRange::new(-10.0, 110.0).unwrap();
    let table: NtcTable<u16, 121> = NtcTable::build_with(&TYPICAL, range, 121, &bridge).unwrap();

    for i in 0..table.len() {
        let kelvin = celsius_to_kelvin(table.temperature_at(i));
        let r2 = TYPICAL.resistance(kelvin).unwrap();
        let voltage = (3.3 * r2) / (3000.0 + r2);
        let expected = ((voltage / 3.3) * 4095.0).floor() as u16;
        assert_eq!(table.get(i).unwrap(), expected, "mismatch at index {i}");
    }
}

#[test]
fn reading_beyond_hot_end_saturates_to_max_temperature() {
    // Table over [0, 10]; a reading below the hottest stored value clamps
    // to the hot boundary
    let model = ten_k_beta_model();
    let range = TempRange::new(0.0, 10.0).unwrap();
    let table: NtcTable<f64, 11> = NtcTable::build(&model, range, 11).unwrap();

    let hottest = table.get(10).unwrap();
    let sample = table.lookup(hottest - 500.0);
    assert_eq!(sample.temperature, 10.0);
    assert!(sample.saturated);
}

#[test]
fn boundary_entries_are_in_range() {
    let model = ten_k_beta_model();
    let range = TempRange::new(0.0, 10.0).unwrap();
    let table: NtcTable<f64, 11> = NtcTable::build(&model, range, 11).unwrap();

    let cold = table.lookup(table.get(0).unwrap());
    assert!(!cold.saturated);
    assert!((cold.temperature - 0.0).abs() < 1e-9);

    let hot = table.lookup(table.get(10).unwrap());
    assert!(!hot.saturated);
    assert!((hot.temperature - 10.0).abs() < 1e-9);
}

#[test]
fn double_beta_tracks_full_cubic_closer_than_single_beta() {
    // The typical curve plays the role of the real device; fit beta models
    // against it and compare table error. Not guaranteed for arbitrary
    // calibration triples, so this validates this dataset only.
    let nominal_res = TYPICAL.resistance(celsius_to_kelvin(25.0)).unwrap();
    let nominal = Datapoint { temperature: 25.0, resistance: nominal_res };

    let beta_between = |t1: f64, t2: f64| -> f64 {
        let r1 = TYPICAL.resistance(celsius_to_kelvin(t1)).unwrap();
        let r2 = TYPICAL.resistance(celsius_to_kelvin(t2)).unwrap();
        (r1 / r2).ln() / (1.0 / celsius_to_kelvin(t1) - 1.0 / celsius_to_kelvin(t2))
    };

    let single = Steinhart::from_beta(nominal, beta_between(25.0, 50.0)).unwrap();
    let double = Steinhart::from_betas(
        nominal,
        BetaPoint { temperature: 50.0, beta: beta_between(25.0, 50.0) },
        BetaPoint { temperature: 85.0, beta: beta_between(25.0, 85.0) },
    )
    .unwrap();

    let mse = |model: &Steinhart| -> f64 {
        let mut acc = 0.0;
        for i in 0..=120 {
            let kelvin = celsius_to_kelvin(-10.0 + i as f64);
            let err = model.resistance(kelvin).unwrap() - TYPICAL.resistance(kelvin).unwrap();
            acc += err * err;
        }
        acc / 121.0
    };

    assert!(mse(&double) < mse(&single));
}

#[test]
fn shared_reference_lookup_is_thread_safe() {
    // Immutable after build: concurrent readers need no locking
    let model = ten_k_beta_model();
    let range = TempRange::new(-20.0, 80.0).unwrap();
    let table: NtcTable<u32, 101> = NtcTable::build(&model, range, 101).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0..table.len() {
                    let sample = table.lookup(table.get(i).unwrap());
                    assert!(!sample.saturated);
                }
            });
        }
    });
}

proptest! {
    #[test]
    fn round_trip_through_the_model(kelvin in 210.0f64..420.0) {
        let resistance = TYPICAL.resistance(kelvin).unwrap();
        let back = TYPICAL.temperature(resistance).unwrap();
        prop_assert!((back - kelvin).abs() / kelvin < 1e-9);
    }

    #[test]
    fn built_tables_descend_strictly(
        min in -50.0f64..20.0,
        span in 10.0f64..120.0,
        datapoints in 2usize..=256,
    ) {
        let model = ten_k_beta_model();
        let range = TempRange::new(min, min + span).unwrap();
        let table: NtcTable<f64, 256> = NtcTable::build(&model, range, datapoints).unwrap();

        for pair in table.values().windows(2) {
            prop_assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn interior_queries_interpolate_linearly(
        index in 0usize..200,
        frac in 0.0001f64..0.9999,
    ) {
        let model = ten_k_beta_model();
        let range = TempRange::new(-50.0, 150.0).unwrap();
        let table: NtcTable<f64, 201> = NtcTable::build(&model, range, 201).unwrap();

        let cold = table.get(index).unwrap();
        let hot = table.get(index + 1).unwrap();
        let query = cold - frac * (cold - hot);

        let sample = table.lookup(query);
        prop_assert!(!sample.saturated);

        let expected = table.temperature_at(index) + frac * table.delta();
        prop_assert!((sample.temperature - expected).abs() < 1e-9);
    }

    #[test]
    fn adc_table_lookups_never_panic(query in proptest::num::u16::ANY) {
        let adc = Adc::new(12, 3.3).unwrap();
        let bridge = HalfBridge::new(adc, 3.3, 3000.0).unwrap();
        let range = TempRange::new(-10.0, 110.0).unwrap();
        let table: NtcTable<u16, 121> =
            NtcTable::build_with(&TYPICAL, range, 121, &bridge).unwrap();

        let sample = table.lookup(query);
        let within = table.range().min() <= sample.temperature
            && sample.temperature <= table.range().max();
        prop_assert!(within);
    }
}

#[test]
fn adc_transform_agrees_with_standalone_conversion() {
    let adc = Adc::new(10, 5.0).unwrap();
    let bridge = HalfBridge::new(adc, 5.0, 10_000.0).unwrap();

    // At r2 == r1 the divider sits at half supply
    let mid = bridge.transform(10_000.0);
    assert_eq!(mid, adc.convert(2.5));
    assert_eq!(mid, 511.0);
}
