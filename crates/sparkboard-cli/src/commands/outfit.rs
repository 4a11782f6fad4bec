use clap::Args;
use sparkboard_core::advisor::{Coordinates, FixedLocation};
use sparkboard_core::{Activity, Config, ForecastClient, OutfitAdvisor};

use super::{print_json, CmdResult};

#[derive(Args)]
pub struct OutfitArgs {
    /// school, church, date or casual
    #[arg(long, short)]
    activity: Option<Activity>,
    /// Latitude, overriding `location.latitude`
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude, overriding `location.longitude`
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

pub async fn run(args: OutfitArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let location = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => FixedLocation::new(Some(Coordinates::new(lat, lon))),
        _ => FixedLocation::from_config(&config),
    };
    let source = ForecastClient::from_config(&config.forecast)?;
    let report = OutfitAdvisor::new(location, source)
        .report(args.activity)
        .await;

    if json {
        return print_json(&report);
    }

    if let Some(error) = &report.error {
        println!("{error}");
    }
    if let Some(forecast) = &report.forecast {
        println!("Forecast for {}:", forecast.city);
        for sample in &forecast.timeline {
            let local = sample.time.with_timezone(&chrono::Local);
            println!(
                "  {:>5}  {:>4}°F  {}",
                local.format("%-I %p").to_string(),
                sample.temp.round() as i64,
                sample.condition
            );
        }
    }
    println!("{}", report.advice);
    Ok(())
}
