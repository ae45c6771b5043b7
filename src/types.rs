use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WorkoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// Capitalised form used at the start of a description.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(WorkoutError::UnknownKind(other.to_string())),
        }
    }
}

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

/// Variant-specific fields. The derived metric is stored, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetail {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        /// meters
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl WorkoutDetail {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// One logged session. Restored records are the same plain data as freshly
/// built ones: every accessor only reads stored fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// minutes
    pub duration: f64,
    pub description: String,
    #[serde(flatten)]
    pub detail: WorkoutDetail,
}

impl Workout {
    pub fn running(
        id: String,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let detail = WorkoutDetail::Running {
            cadence,
            pace: pace(distance, duration),
        };
        Self::build(id, date, coords, distance, duration, detail)
    }

    pub fn cycling(
        id: String,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let detail = WorkoutDetail::Cycling {
            elevation_gain,
            speed: speed(distance, duration),
        };
        Self::build(id, date, coords, distance, duration, detail)
    }

    fn build(
        id: String,
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        detail: WorkoutDetail,
    ) -> Self {
        Self {
            id,
            date,
            coords,
            distance,
            duration,
            description: describe(detail.kind(), date),
            detail,
        }
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.detail.kind()
    }

    pub const fn pace(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => Some(pace),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub const fn cadence(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { cadence, .. } => Some(cadence),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub const fn speed(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { speed, .. } => Some(speed),
            WorkoutDetail::Running { .. } => None,
        }
    }

    pub const fn elevation_gain(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetail::Running { .. } => None,
        }
    }

    /// Pace for running, speed for cycling.
    pub const fn metric(&self) -> f64 {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => pace,
            WorkoutDetail::Cycling { speed, .. } => speed,
        }
    }
}

/// Minutes per kilometer.
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Kilometers per hour.
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// `"Running on October 14, 2026"`.
///
/// The calendar date is read in UTC, not the host's local zone, so a session
/// logged late in the evening west of UTC carries the next day's date.
pub fn describe(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), date.format("%B %-d, %Y"))
}
