#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
// No public repository to point `repository` at.
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use anyhow::{Context, Result};
use clap::Parser;
use trailog::{
    Coords, SqliteStorage, SystemClock, WorkoutFactory, WorkoutKind, WorkoutStore, cli, render,
    utils,
};

#[macro_use]
extern crate trailog;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let storage = SqliteStorage::open(&cli.db)?;
    let mut store = WorkoutStore::open(storage, cli.key.as_str())?;
    dlog!(
        "db={} key={} loaded={}",
        cli.db.display(),
        store.key(),
        store.len()
    );

    match cli.cmd {
        cli::Cmd::Run {
            at,
            distance,
            duration,
            cadence,
        } => log_workout(
            &mut store,
            WorkoutKind::Running,
            Coords::new(at.lat, at.lng),
            &distance,
            &duration,
            &cadence,
        ),
        cli::Cmd::Ride {
            at,
            distance,
            duration,
            elevation,
        } => log_workout(
            &mut store,
            WorkoutKind::Cycling,
            Coords::new(at.lat, at.lng),
            &distance,
            &duration,
            &elevation,
        ),
        cli::Cmd::List { details } => {
            if store.is_empty() {
                tracing::info!("no workouts stored yet");
            }
            for (i, w) in store.workouts().iter().enumerate() {
                if details {
                    println!("{}", render::details_line(i + 1, w));
                } else {
                    println!("{}", render::summary_line(w));
                }
            }
            if store.has_persisted_entries()? {
                dlog!("stored entries present; `trailog reset --yes` clears them");
            }
            Ok(())
        }
        cli::Cmd::Show { id } => {
            let w = store
                .find_by_id(&id)
                .with_context(|| format!("No workout with id {id}"))?;
            println!("{}", render::details_line(1, w));
            Ok(())
        }
        cli::Cmd::Reset { yes } => {
            if !yes {
                anyhow::bail!(
                    "Refusing to reset {} workouts without --yes",
                    store.len()
                );
            }
            store.clear()?;
            println!("Cleared stored workouts under key {:?}", store.key());
            Ok(())
        }
    }
}

fn log_workout(
    store: &mut WorkoutStore<SqliteStorage>,
    kind: WorkoutKind,
    coords: Coords,
    distance: &str,
    duration: &str,
    extra: &str,
) -> Result<()> {
    let workout =
        WorkoutFactory::new(SystemClock).create(kind, coords, distance, duration, extra)?;
    let line = render::summary_line(&workout);
    let id = workout.id.clone();
    store.add(workout)?;
    println!("{id}\t{line}");
    Ok(())
}
