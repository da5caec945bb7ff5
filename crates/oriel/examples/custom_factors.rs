//! Authoring custom windowed factors and running them through the
//! reference pipeline.
//!
//! Run with: `cargo run --example custom_factors`

use oriel::factors::{MeanDifferenceFactor, MomentumFactor, StdDevFactor};
use oriel::pipeline::{MemorySource, Pipeline};
use oriel::primitives::{Date, EntityId, Field};
use oriel::traits::FnFactor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calendar: Vec<Date> = (1..=15)
        .filter_map(|day| Date::from_ymd_opt(2024, 4, day))
        .collect();
    let universe = vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)];

    let mut source = MemorySource::new(calendar.clone(), universe);

    // Deterministic synthetic prices: a flat name, a trending name, and a
    // choppy one.
    let days = calendar.len();
    let flat: Vec<f64> = vec![100.0; days];
    let trending: Vec<f64> = (0..days).map(|d| 50.0 + 2.0 * d as f64).collect();
    let choppy: Vec<f64> =
        (0..days).map(|d| 30.0 + if d % 2 == 0 { 3.0 } else { -3.0 }).collect();

    for (entity, closes) in
        [(EntityId::new(1), flat), (EntityId::new(2), trending), (EntityId::new(3), choppy)]
    {
        let opens: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();
        source.insert_series(Field::close(), entity, closes)?;
        source.insert_series(Field::open(), entity, opens)?;
    }

    // A one-off factor written as a closure: the midpoint of the trailing
    // five-day high-low range of closes.
    let range_midpoint =
        FnFactor::new("range_midpoint", vec![Field::close()], 5, |_, _, inputs, mut out| {
            for (slot, column) in out.iter_mut().zip(inputs[0].columns()) {
                let lo = column.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                *slot = (lo + hi) / 2.0;
            }
            Ok(())
        })?;

    // Screen: only names whose latest close clears 40.
    let liquid = FnFactor::new("liquid", vec![Field::close()], 1, |_, _, inputs, mut out| {
        for (slot, &close) in out.iter_mut().zip(inputs[0].row(0)) {
            *slot = if close > 40.0 { 1.0 } else { 0.0 };
        }
        Ok(())
    })?;

    let table = Pipeline::new()
        .add_factor(StdDevFactor::new())
        .add_factor(MeanDifferenceFactor::new())
        .add_factor(MomentumFactor::over(Field::close(), 10)?)
        .add_factor(range_midpoint)
        .with_screen(liquid)
        .run(&source, calendar[10], calendar[14])?;

    println!("{table}");
    Ok(())
}
