//! CLI definition using clap

use clap::{Parser, Subcommand};
use parking_types::{OutputFormat, ParkingType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parking-system")]
#[command(version)]
#[command(about = "Parking lot management: spot allocation, tickets and fares")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file. Uses config value if not specified.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and the spot inventory
    Init {
        /// TOML file describing the spots ([[spot]] id / type)
        #[arg(long, short = 'l')]
        layout: Option<PathBuf>,

        /// Delete all tickets and release every spot
        #[arg(long)]
        reset: bool,
    },

    /// Register a vehicle entering the lot
    Enter {
        /// Vehicle type. Prompted for if not specified.
        #[arg(long = "type", short = 't', value_enum)]
        vehicle_type: Option<ParkingType>,

        /// Vehicle registration number. Prompted for if not specified.
        #[arg(long, short = 'p')]
        plate: Option<String>,
    },

    /// Register a vehicle leaving the lot and charge its fare
    Exit {
        /// Vehicle registration number. Prompted for if not specified.
        #[arg(long, short = 'p')]
        plate: Option<String>,
    },

    /// Interactive operator menu
    Shell,

    /// Show spot availability
    Status,

    /// Show the tickets of a vehicle
    History {
        /// Vehicle registration number
        plate: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the default database file
        #[arg(long)]
        set_db: Option<PathBuf>,

        /// Set the hourly car rate
        #[arg(long)]
        set_car_rate: Option<f64>,

        /// Set the hourly bike rate
        #[arg(long)]
        set_bike_rate: Option<f64>,

        /// Set the free period in minutes
        #[arg(long)]
        set_free_minutes: Option<u32>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
