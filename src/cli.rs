use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::DEFAULT_WATERING_INTERVAL_DAYS;

#[derive(Parser, Debug)]
#[command(name = "plantitas")]
#[command(about = "Una CLI para llevar el riego de mis plantas de interior")]
pub struct Cli {
    /// Plant record file (overrides PLANTITAS_FILE and the config file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Print debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a config file
    Init {
        /// Plant record file to store in the config
        #[arg(long)]
        data_file: Option<PathBuf>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Plants(PlantCommands),
}

/// Subcommands that work on the plant record file.
#[derive(Subcommand, Debug)]
pub enum PlantCommands {
    /// List plants
    List {
        /// Only plants that need watering
        #[arg(long)]
        due: bool,
        /// Order of the listing
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Only print index and name
        #[arg(long)]
        ids: bool,
    },
    /// Show one plant and its watering status
    Show {
        /// Position of the plant (see `list --ids`)
        index: usize,
    },
    /// Add a new plant
    Add(AddArgs),
    /// Record a watering today
    Water {
        /// Position of the plant
        #[arg(required_unless_present = "all_due", conflicts_with = "all_due")]
        index: Option<usize>,
        /// Water every plant that is due
        #[arg(long)]
        all_due: bool,
    },
    /// Correct a plant's attributes
    Update(UpdateArgs),
    /// Remove a plant
    Remove {
        /// Position of the plant
        index: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical by name
    Name,
    /// Earliest last watering first
    Watered,
    /// Shortest watering interval first
    Interval,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the plant
    #[arg(short = 'n', long = "name")]
    pub name: String,
    /// Days between waterings
    #[arg(short = 'i', long = "interval", default_value_t = DEFAULT_WATERING_INTERVAL_DAYS, allow_negative_numbers = true)]
    pub interval: i64,
    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Planted date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub planted: Option<NaiveDate>,
    /// Last watering date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub last_watered: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Position of the plant
    pub index: usize,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New watering interval in days
    #[arg(short, long, allow_negative_numbers = true)]
    pub interval: Option<i64>,
    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
    /// New planted date, YYYY-MM-DD
    #[arg(long)]
    pub planted: Option<NaiveDate>,
    /// New last watering date, YYYY-MM-DD
    #[arg(long)]
    pub last_watered: Option<NaiveDate>,
}

impl UpdateArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.interval.is_none()
            && self.notes.is_none()
            && self.planted.is_none()
            && self.last_watered.is_none()
    }
}
