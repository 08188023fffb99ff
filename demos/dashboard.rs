//! Runs the full dashboard for one city and prints every region as a JSON line.

use heatstress::{HeatStressDashboard, HeatStressError, JsonLinesRenderer, LatLon, Region};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), HeatStressError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dashboard = HeatStressDashboard::builder()
        .location(LatLon(37.3891, -5.9845))
        .name("Seville")
        .mount("heat-panel")
        .build()?;

    let renderer = JsonLinesRenderer::new(std::io::stdout());
    let report = dashboard.run(&renderer).await;

    for region in Region::ALL {
        eprintln!("{:>16}: {:?}", region.to_string(), report.status(region));
    }
    eprintln!("lookup table: {:?}", report.table);

    Ok(())
}
