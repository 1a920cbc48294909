//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_entry, output_exit, output_history, output_status};
use parking_app::app::query_service::{lot_status, vehicle_history};
use parking_app::app::shell::run_shell;
use parking_app::app::ParkingService;
use parking_app::config::Config;
use parking_app::repository::{open_database, open_seeded_database};
use parking_infra::input::{ConsoleInputReader, PresetInputReader};
use parking_infra::layout_loader::SpotLayout;
use parking_types::{Error, OutputFormat, ParkingType, Result};
use std::io::{self, BufReader, Stdin, Write};
use std::path::PathBuf;

/// Terminal stream that interactive prompts are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptTarget {
    Stdout,
    Stderr,
}

impl PromptTarget {
    /// JSON output owns stdout, so prompts move to stderr
    fn for_format(output_format: OutputFormat) -> Self {
        match output_format {
            OutputFormat::Table => PromptTarget::Stdout,
            OutputFormat::Json => PromptTarget::Stderr,
        }
    }

    fn writer(self) -> Box<dyn Write> {
        match self {
            PromptTarget::Stdout => Box::new(io::stdout()),
            PromptTarget::Stderr => Box::new(io::stderr()),
        }
    }
}

/// Terminal reader for answers not given as flags
fn terminal_reader(
    output_format: OutputFormat,
) -> ConsoleInputReader<BufReader<Stdin>, Box<dyn Write>> {
    let prompt = PromptTarget::for_format(output_format).writer();
    ConsoleInputReader::new(BufReader::new(io::stdin()), prompt)
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref db) = cli.db {
        config.database_path = Some(db.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Init { layout, reset } => cmd_init(&config, layout, reset),

        Commands::Enter { vehicle_type, plate } => {
            cmd_enter(&config, vehicle_type, plate, output_format)
        }

        Commands::Exit { plate } => cmd_exit(&config, plate, output_format),

        Commands::Shell => cmd_shell(&config),

        Commands::Status => cmd_status(&config, output_format),

        Commands::History { plate } => cmd_history(&config, &plate, output_format),

        Commands::Config {
            show,
            set_db,
            set_car_rate,
            set_bike_rate,
            set_free_minutes,
            set_output,
            reset,
        } => cmd_config(
            show,
            set_db,
            set_car_rate,
            set_bike_rate,
            set_free_minutes,
            set_output,
            reset,
        ),
    }
}

fn cmd_init(config: &Config, layout: Option<PathBuf>, reset: bool) -> Result<()> {
    let layout = match layout {
        Some(path) => SpotLayout::load_from_file(&path)?,
        None => SpotLayout::default(),
    };

    let db = open_database(config)?;
    let inserted = db.seed_inventory(&layout)?;
    if inserted > 0 {
        println!(
            "Created {} spots ({} car, {} bike)",
            inserted,
            layout.count(ParkingType::Car),
            layout.count(ParkingType::Bike)
        );
    } else {
        println!("Spot inventory already present");
    }

    if reset {
        db.clear_entries()?;
        println!("All tickets deleted and spots released");
    }

    println!("Database: {}", config.database_path()?.display());
    Ok(())
}

fn cmd_enter(
    config: &Config,
    vehicle_type: Option<ParkingType>,
    plate: Option<String>,
    output_format: OutputFormat,
) -> Result<()> {
    let db = open_seeded_database(config, &SpotLayout::default())?;
    let input = PresetInputReader::new(
        vehicle_type.map(ParkingType::selection),
        plate,
        terminal_reader(output_format),
    );
    let mut service = ParkingService::new(input, db.spot_repository(), db.ticket_repository())
        .with_fare_schedule(config.fare_schedule()?);

    let receipt = service.process_incoming_vehicle().map_err(|e| {
        Error::TransactionFailed(format!("Unable to process incoming vehicle: {}", e))
    })?;

    output_entry(output_format, receipt.as_ref())
}

fn cmd_exit(config: &Config, plate: Option<String>, output_format: OutputFormat) -> Result<()> {
    let db = open_seeded_database(config, &SpotLayout::default())?;
    let input = PresetInputReader::new(None, plate, terminal_reader(output_format));
    let mut service = ParkingService::new(input, db.spot_repository(), db.ticket_repository())
        .with_fare_schedule(config.fare_schedule()?);

    let receipt = service.process_exiting_vehicle().map_err(|e| {
        Error::TransactionFailed(format!("Unable to process exiting vehicle: {}", e))
    })?;

    output_exit(output_format, &receipt)
}

fn cmd_shell(config: &Config) -> Result<()> {
    let db = open_seeded_database(config, &SpotLayout::default())?;
    let mut service = ParkingService::new(
        ConsoleInputReader::stdio(),
        db.spot_repository(),
        db.ticket_repository(),
    )
    .with_fare_schedule(config.fare_schedule()?);

    run_shell(&mut service, &mut std::io::stdout())
}

fn cmd_status(config: &Config, output_format: OutputFormat) -> Result<()> {
    let db = open_seeded_database(config, &SpotLayout::default())?;
    let status = lot_status(&db.spot_repository())?;
    output_status(output_format, &status)
}

fn cmd_history(config: &Config, plate: &str, output_format: OutputFormat) -> Result<()> {
    let db = open_seeded_database(config, &SpotLayout::default())?;
    let tickets = vehicle_history(&db.ticket_repository(), plate)?;
    output_history(output_format, plate, &tickets)
}

fn cmd_config(
    show: bool,
    set_db: Option<PathBuf>,
    set_car_rate: Option<f64>,
    set_bike_rate: Option<f64>,
    set_free_minutes: Option<u32>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_db {
        config.database_path = Some(path);
        modified = true;
    }

    if let Some(rate) = set_car_rate {
        config.car_rate_per_hour = rate;
        modified = true;
    }

    if let Some(rate) = set_bike_rate {
        config.bike_rate_per_hour = rate;
        modified = true;
    }

    if let Some(minutes) = set_free_minutes {
        config.free_minutes = minutes;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        // Refuse to persist a schedule that cannot be charged
        config.fare_schedule()?;
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
