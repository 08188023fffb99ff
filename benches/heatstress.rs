use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heatstress::{
    interpolate, linear_trend, seasonal_calendar, to_yearly, DailySeries, HumidityRow,
    IntensityGrid, LookupTable, WorkIntensity,
};

fn synthetic_table() -> LookupTable {
    let mut grid = IntensityGrid::new();
    for t in 20..=55 {
        let row: HumidityRow = (10..=100)
            .map(|rh| (rh, t as f64 + rh as f64 * 0.08))
            .collect();
        grid.insert(t, row);
    }
    LookupTable::from_grids(WorkIntensity::ALL.map(|level| (level, grid.clone())))
}

/// Seventy years of daily values with a seasonal cycle and a slow warming.
fn synthetic_series() -> DailySeries {
    let mut series = DailySeries::default();
    for year in 1954..2024 {
        for month in 1..=12u32 {
            for day in 1..=28u32 {
                let seasonal = 12.0 * (((month as f64) - 1.0) / 12.0 * std::f64::consts::TAU).cos();
                let t = 28.0 - seasonal + (year - 1954) as f64 * 0.02 + (day % 5) as f64;
                series.time.push(format!("{year}-{month:02}-{day:02}"));
                series.temperature_2m_max.push(Some(t));
                series.apparent_temperature_max.push(Some(t + 3.0));
            }
        }
    }
    series
}

fn bench_heatstress(c: &mut Criterion) {
    let table = synthetic_table();
    c.bench_function("interpolate", |b| {
        b.iter(|| {
            interpolate(
                black_box(&table),
                black_box(36.4),
                black_box(47.0),
                WorkIntensity::Moderate,
            )
        })
    });

    let series = synthetic_series();
    c.bench_function("to_yearly_and_trend", |b| {
        b.iter(|| {
            let yearly = to_yearly(black_box(&series.time), black_box(&series.temperature_2m_max))
                .unwrap();
            linear_trend(&yearly).unwrap()
        })
    });
    c.bench_function("seasonal_calendar", |b| {
        b.iter(|| seasonal_calendar(black_box(&series)))
    });
}

criterion_group!(benches, bench_heatstress);
criterion_main!(benches);
