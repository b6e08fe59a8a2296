//! # vehicle-report CLI
//!
//! Usage:
//!   vehicle-report report.json -o report.pdf
//!   echo '{ ... }' | vehicle-report -o report.pdf
//!   vehicle-report --example > report.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vehicle_report::{Report, RenderConfig, ReportError};

#[derive(Parser)]
#[command(name = "vehicle-report")]
#[command(about = "Render a vehicle history report as a PDF")]
struct Cli {
    /// Report JSON file. Read from stdin when omitted.
    input: Option<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, default_value = "report.pdf")]
    output: PathBuf,

    /// Render options JSON (page geometry, palette, branding)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Print a sample report JSON and exit
    #[arg(long)]
    example: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    if cli.example {
        print!("{}", example_report_json());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let config = match &cli.options {
        Some(path) => RenderConfig::from_json(&fs::read_to_string(path)?)?,
        None => RenderConfig::default(),
    };

    let report: Report = serde_json::from_str(&input)?;
    let pdf = vehicle_report::render(&report, &config);
    fs::write(&cli.output, &pdf)?;
    tracing::info!(
        bytes = pdf.len(),
        output = %cli.output.display(),
        "report written"
    );
    Ok(())
}

fn example_report_json() -> &'static str {
    r##"{
  "generatedOn": "2026-03-09",
  "vehicle": {
    "registration": "AB12 CDE",
    "make": "FORD",
    "model": "FOCUS",
    "colour": "BLUE",
    "fuelType": "PETROL",
    "yearOfManufacture": 2012,
    "engineCapacity": 1596,
    "co2Emissions": 139,
    "euroStatus": "Euro 5",
    "firstRegistered": "2012-03-28",
    "bodyType": "HATCHBACK",
    "transmission": "MANUAL",
    "taxStatus": "Taxed",
    "taxDueDate": "2026-09-01",
    "motStatus": "Valid",
    "motExpiryDate": "2026-11-14",
    "markedForExport": false,
    "dateOfLastV5c": "2021-06-02"
  },
  "motTests": [
    {
      "completedDate": "2025-11-10",
      "testResult": "PASSED",
      "odometerValue": 87412,
      "odometerUnit": "mi",
      "testNumber": "5931 2210 4471",
      "expiryDate": "2026-11-14",
      "items": [
        { "text": "Nearside front tyre worn close to legal limit", "type": "ADVISORY" },
        { "text": "Brake pipe corroded, covered in grease or other material", "type": "ADVISORY" }
      ]
    },
    {
      "completedDate": "2024-11-02",
      "testResult": "FAILED",
      "odometerValue": 79050,
      "testNumber": "4120 9934 1182",
      "items": [
        { "text": "Offside headlamp aim too high", "type": "MAJOR" },
        { "text": "Brake pipe corroded, covered in grease or other material.", "type": "ADVISORY" }
      ]
    },
    {
      "completedDate": "2024-11-04",
      "testResult": "PASSED",
      "odometerValue": 79061,
      "testNumber": "4120 9934 1190",
      "expiryDate": "2025-11-14",
      "items": []
    },
    {
      "completedDate": "2023-10-28",
      "testResult": "PASSED",
      "odometerValue": 70110,
      "testNumber": "3301 5520 9023",
      "items": [
        { "text": "Nearside front tyre worn close to legal limit", "type": "ADVISORY" }
      ]
    }
  ],
  "healthScore": {
    "score": 72,
    "grade": "B",
    "summary": "A well used but generally sound car. Recurring brake pipe corrosion is the main concern.",
    "categories": [
      { "name": "MOT history", "score": 19, "max": 25, "note": "One failure in the last three tests" },
      { "name": "Mileage", "score": 20, "max": 25, "note": "Above average annual mileage" },
      { "name": "Advisories", "score": 14, "max": 25, "note": "Two advisories have recurred" },
      { "name": "Age", "score": 19, "max": 25 }
    ]
  },
  "motReadiness": {
    "status": "amber",
    "score": 64,
    "summary": "Two areas are likely to need work before the next MOT.",
    "risks": [
      {
        "category": "Brakes",
        "description": "Brake pipe corrosion has been noted at two consecutive tests.",
        "likelihood": "red",
        "costMin": 150,
        "costMax": 400
      },
      {
        "category": "Tyres",
        "description": "Front tyre close to the legal limit.",
        "likelihood": "amber",
        "costMin": 60,
        "costMax": 120
      }
    ]
  },
  "recalls": [],
  "emissionsZones": {
    "status": "compliant",
    "summary": "Petrol, Euro 5: no charge in any current UK clean air zone.",
    "zones": [
      { "name": "London ULEZ", "compliant": true, "dailyCharge": 12.5 },
      { "name": "Birmingham CAZ", "compliant": true, "dailyCharge": 8 }
    ]
  },
  "valuation": {
    "trade": 2650,
    "low": 3100,
    "mid": 3450,
    "high": 3900,
    "confidence": "medium",
    "market": { "listings": 412, "averagePrice": 3520, "averageMileage": 82000, "averageDaysToSell": 31 },
    "note": "Based on private and dealer listings for the same model, year and similar mileage."
  },
  "runningCosts": {
    "annualTotal": 2740,
    "items": [
      { "label": "Fuel", "annual": 1480, "note": "10,000 miles at 42 mpg" },
      { "label": "Insurance", "annual": 620 },
      { "label": "Road tax", "annual": 200 },
      { "label": "Servicing and repairs", "annual": 440, "note": "Includes likely brake work" }
    ],
    "assumptions": "Estimates assume 10,000 miles a year and average UK fuel prices."
  },
  "negotiation": {
    "openingOffer": 3000,
    "targetPrice": 3250,
    "walkAway": 3600,
    "points": [
      "Brake pipe corrosion has been advised twice and will need replacing soon.",
      "Front tyre is close to the legal limit.",
      "Mileage is above average for the age."
    ]
  },
  "roadTax": { "band": "F", "annual": 200, "sixMonth": 110 },
  "safetyRating": { "stars": 5, "yearTested": 2012, "adultOccupant": 92, "childOccupant": 82, "pedestrian": 72, "safetyAssist": 71 },
  "rarity": { "registeredCount": 214000, "onRoad": 176500, "label": "Very common" },
  "colourPopularity": { "colour": "BLUE", "sharePercent": 17.4, "rank": 3 },
  "tyres": { "front": "205/55 R16", "rear": "205/55 R16", "pressureFront": "33 psi", "pressureRear": "30 psi" },
  "dimensions": { "lengthMm": 4358, "widthMm": 1823, "heightMm": 1484, "wheelbaseMm": 2648, "kerbWeightKg": 1276, "bootLitres": 316 }
}
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_is_a_valid_report() {
        let report: Report = serde_json::from_str(example_report_json()).unwrap();
        assert_eq!(report.mot_tests.len(), 4);
        assert!(report.recalls.as_ref().is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn cli_parses_arguments() {
        let cli = Cli::parse_from(["vehicle-report", "in.json", "-o", "out.pdf", "--options", "opts.json"]);
        assert_eq!(cli.input, Some(PathBuf::from("in.json")));
        assert_eq!(cli.output, PathBuf::from("out.pdf"));
        assert_eq!(cli.options, Some(PathBuf::from("opts.json")));
        assert!(!cli.example);
    }
}
