use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use parklot::clock::{Clock, ManualClock, SystemClock};
use parklot::config::{load_config, LotConfig};
use parklot::export::{export_csv, export_json};
use parklot::model::{SizeClass, Vehicle};

#[derive(Parser, Debug)]
#[command(name = "parklot")]
#[command(about = "Parking lot simulation - park, bill and release vehicles")]
#[command(version)]
struct Args {
    /// Lot topology as JSON (one floor of 5 car and 5 bike spots by default)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hourly rate, overriding the configured one
    #[arg(long, value_name = "N")]
    rate: Option<u64>,

    /// Vehicle to park, as PLATE:CLASS (class is bike, car or truck)
    #[arg(long = "park", value_name = "PLATE:CLASS", value_parser = parse_vehicle)]
    vehicles: Vec<Vehicle>,

    /// Simulated length of every stay in seconds
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 2,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    stay: i64,

    /// Export the occupied lot to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export the occupied lot to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn parse_vehicle(s: &str) -> Result<Vehicle, String> {
    let (plate, class) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected PLATE:CLASS, got '{s}'"))?;
    let class = class.parse::<SizeClass>().map_err(|e| e.to_string())?;
    Vehicle::new(plate, class).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => LotConfig::default(),
    };
    if let Some(rate) = args.rate {
        config.rate_per_hour = rate;
    }
    let processor = config.processor();

    let vehicles = if args.vehicles.is_empty() {
        vec![Vehicle::new("ABC123", SizeClass::Car)?]
    } else {
        args.vehicles
    };

    let clock = ManualClock::starting_at(SystemClock.now());
    let mut lot = config.build_lot_with_clock(clock.clone())?;

    for floor in lot.floors() {
        println!("{floor}");
    }

    let mut tickets = Vec::new();
    for vehicle in vehicles {
        let label = vehicle.to_string();
        match lot.park(vehicle) {
            Ok(id) => {
                if let Some(ticket) = lot.ticket(id) {
                    println!("Vehicle {label} parked at {}. Ticket: {id}", ticket.location);
                }
                tickets.push(id);
            }
            Err(err) => println!("Could not park {label}: {err}"),
        }
    }

    if let Some(csv_path) = &args.csv {
        export_csv(&lot.status(), csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&lot.status(), json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    clock.advance(args.stay);

    for id in tickets {
        let receipt = lot.bill(id, &processor)?;
        println!(
            "Payment of ${} processed for Ticket {id} ({}h).",
            receipt.amount, receipt.billed_hours
        );
        let retired = lot.remove(id)?;
        println!("Vehicle {} removed from {}.", retired.vehicle, retired.location);
    }

    Ok(())
}
