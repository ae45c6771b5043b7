use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::store::DEFAULT_KEY;

const DEFAULT_DB: &str = "trailog.sqlite3";

#[derive(Parser, Debug)]
#[command(
    name = "trailog",
    about = "Log running and cycling sessions at a map location and keep them across runs"
)]
pub struct Cli {
    /// SQLite file that holds the stored workouts.
    #[arg(long, global = true, env = "TRAILOG_DB", default_value = DEFAULT_DB)]
    pub db: PathBuf,

    /// Storage key the workout list is kept under.
    #[arg(long, global = true, default_value = DEFAULT_KEY)]
    pub key: String,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Where the session happened.
#[derive(clap::Args, Debug)]
pub struct Location {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log a run.
    Run {
        #[command(flatten)]
        at: Location,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute.
        #[arg(long, allow_hyphen_values = true)]
        cadence: String,
    },

    /// Log a ride.
    Ride {
        #[command(flatten)]
        at: Location,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Elevation gain in meters.
        #[arg(long, allow_hyphen_values = true)]
        elevation: String,
    },

    /// Print stored workouts, oldest first.
    List {
        /// One tab-separated row per workout with id, type, date and coordinates.
        #[arg(long)]
        details: bool,
    },

    /// Print one workout by id.
    Show {
        id: String,
    },

    /// Remove the stored workout list.
    Reset {
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },
}
