//! Resistance Lookup Example
//!
//! This example builds a lookup table for the most common hobbyist part: a
//! 10 kΩ NTC thermistor with B25/50 = 3950, measured directly in ohms.
//!
//! ## What You'll Learn
//!
//! - Deriving Steinhart-Hart coefficients from a datasheet beta constant
//! - Building a table over a temperature range
//! - Interpolated queries and the saturation flag
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_resistance_lookup
//! ```

use thermistor_lut::{
    constants::{celsius_to_kelvin, kelvin_to_celsius},
    Datapoint, NtcTable, Steinhart, TempRange, ThermistorError,
};

fn main() -> Result<(), ThermistorError> {
    println!("thermistor-lut Resistance Lookup Example");
    println!("========================================\n");

    // Straight off the datasheet: 10 kΩ at 25 °C, B = 3950
    let nominal = Datapoint { temperature: 25.0, resistance: 10_000.0 };
    let model = Steinhart::from_beta(nominal, 3950.0)?;

    println!("Coefficients from single beta:");
    println!("  a = {:e}", model.a());
    println!("  b = {:e}", model.b());
    println!("  c = {:e}\n", model.c());

    // The model itself answers in Kelvin; the table layer converts for us
    let kelvin = model.temperature(4_700.0)?;
    println!(
        "Direct model query: 4700.0 Ω -> {:.2} K ({:.2} °C)",
        kelvin,
        kelvin_to_celsius(kelvin)
    );
    println!(
        "Inverse at 25 °C:   {:.1} Ω\n",
        model.resistance(celsius_to_kelvin(25.0))?
    );

    // One table entry per degree from -50 to 150 °C
    let range = TempRange::new(-50.0, 150.0)?;
    let table: NtcTable<f64, 201> = NtcTable::build(&model, range, 201)?;

    println!(
        "Built {} entries over [{}, {}] °C (step {} °C)\n",
        table.len(),
        table.range().min(),
        table.range().max(),
        table.delta()
    );

    println!("Sample of the table:");
    for i in [0, 50, 75, 100, 150, 200] {
        println!(
            "  {:>6.1} °C -> {:>10.1} Ω",
            table.temperature_at(i),
            table.get(i).unwrap()
        );
    }

    println!("\nQueries:");
    for reading in [250_000.0, 25_000.0, 10_000.0, 1_000.0, 100.0] {
        let sample = table.lookup(reading);
        println!(
            "  {:>9.1} Ω -> {:>7.2} °C{}",
            reading,
            sample.temperature,
            if sample.saturated { "  (saturated)" } else { "" }
        );
    }

    Ok(())
}
