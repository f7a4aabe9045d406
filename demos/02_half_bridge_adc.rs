//! Half-Bridge ADC Example
//!
//! Real firmware doesn't read ohms, it reads an ADC register. This example
//! models the usual wiring (thermistor to ground, fixed pull-up to the
//! supply, 12-bit ADC on the midpoint) so the table stores ADC codes and the
//! raw register value can be queried directly.
//!
//! ## What You'll Learn
//!
//! - Composing a divider and ADC quantizer into table construction
//! - The effect of finite ADC input impedance on the stored codes
//! - Why an oversampled table is rejected at build time
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_half_bridge_adc
//! ```

use thermistor_lut::{
    Adc, Datapoint, HalfBridge, NtcTable, Steinhart, TempRange, ThermistorError,
};

fn main() -> Result<(), ThermistorError> {
    println!("thermistor-lut Half-Bridge ADC Example");
    println!("======================================\n");

    let nominal = Datapoint { temperature: 25.0, resistance: 10_000.0 };
    let model = Steinhart::from_beta(nominal, 3950.0)?;
    let range = TempRange::new(-20.0, 100.0)?;

    // 3.3 V rail, 10 kΩ pull-up, ideal 12-bit ADC
    let adc = Adc::new(12, 3.3)?;
    let bridge = HalfBridge::new(adc, 3.3, 10_000.0)?;
    let table: NtcTable<u16, 121> = NtcTable::build_with(&model, range, 121, &bridge)?;

    println!("Table stores 12-bit codes, one per degree:");
    for i in [0, 45, 60, 90, 120] {
        println!(
            "  {:>6.1} °C -> code {:>4}",
            table.temperature_at(i),
            table.get(i).unwrap()
        );
    }

    println!("\nQuerying raw register values:");
    for code in [3500u16, 2048, 1024, 200] {
        let sample = table.lookup(code);
        println!(
            "  code {:>4} -> {:>7.2} °C{}",
            code,
            sample.temperature,
            if sample.saturated { "  (saturated)" } else { "" }
        );
    }

    // A real front-end loads the bridge: finite input impedance shifts
    // every code down a little
    let loaded_adc = Adc::with_impedance(12, 3.3, 100_000.0)?;
    let loaded = HalfBridge::new(loaded_adc, 3.3, 10_000.0)?;
    let loaded_table: NtcTable<u16, 121> = NtcTable::build_with(&model, range, 121, &loaded)?;
    println!(
        "\nWith {} Ω input impedance, code at 25 °C: {} vs ideal {}",
        loaded_adc.impedance().unwrap(),
        loaded_table.get(45).unwrap(),
        table.get(45).unwrap()
    );

    // Asking for finer steps than 12 bits can resolve fails the build
    let too_fine = NtcTable::<u16, 4000>::build_with(&model, range, 4000, &bridge);
    match too_fine {
        Err(e) => println!("\n4000-point build rejected as expected: {e}"),
        Ok(_) => println!("\nunexpected: oversampled build succeeded"),
    }

    Ok(())
}
