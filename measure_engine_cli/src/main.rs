use clap::{Parser, Subcommand};
use log::debug;
use measure_engine::{
    config::read_config_json, units, EngineConfig, MeasureResult, Measurement, MeasurementEngine,
    MeasurementKind, Point3, Unit,
};
use std::io;

mod script;

fn read_points_csv_3d(path: &str) -> io::Result<Vec<Point3>> {
    let contents = std::fs::read_to_string(path)?;
    let mut pts = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 3 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: expected x,y,z", idx + 1),
            ));
        }
        let mut coords = [0.0; 3];
        for (c, part) in coords.iter_mut().zip(&parts) {
            *c = part.trim().parse::<f64>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: {}", idx + 1, e),
                )
            })?;
        }
        pts.push(Point3::from(coords));
    }
    Ok(pts)
}

fn print_measurement(m: &Measurement) {
    println!("#{} {}: {}", m.id(), m.kind(), m.formatted_value());
}

/// Picks every point in turn and returns the measurement they complete.
fn measure(
    engine: &mut MeasurementEngine,
    kind: MeasurementKind,
    points: &[Point3],
) -> MeasureResult<Option<Measurement>> {
    engine.select_tool(kind);
    let mut done = None;
    for p in points {
        done = engine.submit_point(*p)?;
    }
    Ok(done)
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}

/// Command line front end for the interactive measurement engine.
#[derive(Parser)]
#[command(name = "measure_engine_cli", version)]
struct Cli {
    /// JSON file with engine settings
    #[arg(long, global = true)]
    config: Option<String>,
    /// Unit for reported lengths and areas (m, cm, mm, ft, in)
    #[arg(long, global = true)]
    unit: Option<Unit>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance between two 3D points.
    #[command(allow_negative_numbers = true)]
    Distance {
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
    },
    /// Planar (XY) area of a polygon read from a CSV file of x,y,z lines.
    Area { path: String },
    /// Angle at the middle point of three 3D points.
    #[command(allow_negative_numbers = true)]
    Angle {
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
        x3: f64,
        y3: f64,
        z3: f64,
    },
    /// Convert a length (or area with --area) between units.
    #[command(allow_negative_numbers = true)]
    Convert {
        value: f64,
        from: Unit,
        to: Unit,
        #[arg(long)]
        area: bool,
    },
    /// Replay a session script of tool, point, undo, ... lines.
    Replay {
        path: String,
        /// Print the final measurement list as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match read_config_json(path) {
            Ok(cfg) => cfg,
            Err(e) => fail(format!("Error reading {}: {}", path, e)),
        },
        None => EngineConfig::default(),
    };
    if let Some(unit) = cli.unit {
        config.default_unit = unit;
    }
    debug!("Engine configuration: {:?}", config);
    let mut engine = MeasurementEngine::with_config(config);

    match cli.command {
        Commands::Distance {
            x1,
            y1,
            z1,
            x2,
            y2,
            z2,
        } => {
            let pts = [Point3::new(x1, y1, z1), Point3::new(x2, y2, z2)];
            match measure(&mut engine, MeasurementKind::Distance, &pts) {
                Ok(Some(m)) => println!("Distance: {}", m.formatted_value()),
                Ok(None) => fail("Distance did not complete"),
                Err(e) => fail(e),
            }
        }
        Commands::Area { path } => match read_points_csv_3d(&path) {
            Ok(pts) => match engine.area_from_points(&pts) {
                Ok(Some(m)) => println!("Area: {}", m.formatted_value()),
                Ok(None) => fail(format!("{}: an area needs at least 3 points", path)),
                Err(e) => fail(e),
            },
            Err(e) => fail(format!("Error reading {}: {}", path, e)),
        },
        Commands::Angle {
            x1,
            y1,
            z1,
            x2,
            y2,
            z2,
            x3,
            y3,
            z3,
        } => {
            let pts = [
                Point3::new(x1, y1, z1),
                Point3::new(x2, y2, z2),
                Point3::new(x3, y3, z3),
            ];
            match measure(&mut engine, MeasurementKind::Angle, &pts) {
                Ok(Some(m)) => println!("Angle: {}", m.formatted_value()),
                Ok(None) => fail("Angle did not complete"),
                Err(e) => fail(e),
            }
        }
        Commands::Convert {
            value,
            from,
            to,
            area,
        } => {
            if area {
                println!("{:.6} {}²", units::convert_area(value, from, to), to);
            } else {
                println!("{:.6} {}", units::convert(value, from, to), to);
            }
        }
        Commands::Replay { path, json } => {
            let source = match std::fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => fail(format!("Error reading {}: {}", path, e)),
            };
            if !json {
                engine.on_measurement_complete(print_measurement);
            }
            if let Err(e) = script::run_script(&mut engine, &source) {
                fail(format!("{}: {}", path, e));
            }
            if json {
                match serde_json::to_string_pretty(&engine.list_measurements()) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(e),
                }
            } else {
                println!("{} measurement(s)", engine.list_measurements().len());
            }
        }
    }
}
