use chrono::{DateTime, Utc};

use crate::dlog;
use crate::error::WorkoutError;
use crate::types::{Coords, Workout, WorkoutKind, pace, speed};
use crate::validation::{RawNumber, are_all_positive, are_finite};

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const ID_MODULUS: i64 = 10_000_000_000;

/// Validates raw form input and builds the matching workout variant.
#[derive(Debug)]
pub struct WorkoutFactory<C = SystemClock> {
    clock: C,
    last_tick: Option<i64>,
}

impl<C: Clock> WorkoutFactory<C> {
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            last_tick: None,
        }
    }

    /// Check-then-construct: either a fully valid workout or an error,
    /// never a partial one.
    ///
    /// `extra` is cadence for running and elevation gain for cycling. Elevation
    /// gain only has to be finite; it may be zero or negative. Inputs whose
    /// pace or speed would not be a finite number are rejected as well.
    pub fn create(
        &mut self,
        kind: WorkoutKind,
        coords: Coords,
        distance: impl Into<RawNumber>,
        duration: impl Into<RawNumber>,
        extra: impl Into<RawNumber>,
    ) -> Result<Workout, WorkoutError> {
        if !are_finite(&[coords.lat, coords.lng]) {
            return Err(WorkoutError::InvalidCoords);
        }

        let distance = distance.into().coerce();
        let duration = duration.into().coerce();
        let extra = extra.into().coerce();

        let finite = are_finite(&[distance, duration, extra]);
        let positive = match kind {
            WorkoutKind::Running => are_all_positive(&[distance, duration, extra]),
            WorkoutKind::Cycling => are_all_positive(&[distance, duration]),
        };
        if !finite || !positive {
            dlog!("rejected kind={kind} distance={distance} duration={duration} extra={extra}");
            return Err(WorkoutError::Validation);
        }

        let metric = match kind {
            WorkoutKind::Running => pace(distance, duration),
            WorkoutKind::Cycling => speed(distance, duration),
        };
        // Tiny but positive inputs can overflow the metric, which JSON cannot hold.
        if !metric.is_finite() {
            dlog!("rejected kind={kind} distance={distance} duration={duration} metric={metric}");
            return Err(WorkoutError::Validation);
        }

        let date = self.clock.now();
        let id = self.next_id(date);
        let workout = match kind {
            WorkoutKind::Running => Workout::running(id, date, coords, distance, duration, extra),
            WorkoutKind::Cycling => Workout::cycling(id, date, coords, distance, duration, extra),
        };
        tracing::debug!(id = %workout.id, kind = %kind, "workout created");
        Ok(workout)
    }

    /// Same as [`create`](Self::create) with the discriminant still as text.
    pub fn create_from_str(
        &mut self,
        kind: &str,
        coords: Coords,
        distance: impl Into<RawNumber>,
        duration: impl Into<RawNumber>,
        extra: impl Into<RawNumber>,
    ) -> Result<Workout, WorkoutError> {
        let kind = kind.parse::<WorkoutKind>()?;
        self.create(kind, coords, distance, duration, extra)
    }

    /// Last 10 digits of the millisecond timestamp, bumped past the previous
    /// tick when the clock has not moved.
    fn next_id(&mut self, date: DateTime<Utc>) -> String {
        let mut tick = date.timestamp_millis();
        if let Some(last) = self.last_tick
            && tick <= last
        {
            tick = last + 1;
        }
        self.last_tick = Some(tick);
        format!("{:010}", tick.rem_euclid(ID_MODULUS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn factory() -> WorkoutFactory<FixedClock> {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();
        WorkoutFactory::new(FixedClock(at))
    }

    const HERE: Coords = Coords::new(12.0, 18.0);

    #[test]
    fn test_running_scenario() {
        let w = factory().create(WorkoutKind::Running, HERE, 8, 15, 32).unwrap();
        assert_eq!(w.pace(), Some(1.875));
        assert_eq!(w.cadence(), Some(32.0));
        assert!(w.description.contains("Running"));
        assert!(w.description.ends_with("March 7, 2024"));
    }

    #[test]
    fn test_cycling_scenario() {
        let w = factory().create(WorkoutKind::Cycling, HERE, 15, 10, 52).unwrap();
        assert_eq!(w.speed(), Some(90.0));
        assert!(w.description.contains("Cycling"));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let err = factory()
            .create(WorkoutKind::Running, Coords::new(0.0, 0.0), -3, 10, 30)
            .unwrap_err();
        assert_eq!(err, WorkoutError::Validation);
        assert_eq!(err.to_string(), "Input has to be a Positive Number!");
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut f = factory();
        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
            assert!(f.create(kind, HERE, f64::NAN, 10, 30).is_err());
            assert!(f.create(kind, HERE, 5, f64::INFINITY, 30).is_err());
            assert!(f.create(kind, HERE, 5, 10, "abc").is_err());
            assert!(f.create(kind, HERE, "five", 10, 30).is_err());
            assert!(f.create(kind, HERE, 0, 10, 30).is_err());
            assert!(f.create(kind, HERE, 5, 0, 30).is_err());
        }
    }

    #[test]
    fn test_cadence_must_be_positive() {
        let mut f = factory();
        assert!(f.create(WorkoutKind::Running, HERE, 5, 10, 0).is_err());
        assert!(f.create(WorkoutKind::Running, HERE, 5, 10, -1).is_err());
    }

    #[test]
    fn test_cycling_accepts_non_positive_elevation() {
        let mut f = factory();
        let w = f.create(WorkoutKind::Cycling, HERE, 20, 60, -5).unwrap();
        assert_eq!(w.elevation_gain(), Some(-5.0));
        assert_eq!(w.speed(), Some(20.0));
        // A blank field coerces to zero and is accepted too.
        let w = f.create(WorkoutKind::Cycling, HERE, 20, 60, "").unwrap();
        assert_eq!(w.elevation_gain(), Some(0.0));
    }

    #[test]
    fn test_text_inputs_are_coerced() {
        let w = factory().create(WorkoutKind::Running, HERE, " 8", "15 ", "32").unwrap();
        assert_eq!(w.distance, 8.0);
        assert_eq!(w.pace(), Some(1.875));
    }

    #[test]
    fn test_invalid_coords() {
        let err = factory()
            .create(WorkoutKind::Running, Coords::new(f64::NAN, 0.0), 8, 15, 32)
            .unwrap_err();
        assert_eq!(err, WorkoutError::InvalidCoords);
    }

    #[test]
    fn test_unknown_kind() {
        let err = factory().create_from_str("swimming", HERE, 1, 1, 1).unwrap_err();
        assert_eq!(err, WorkoutError::UnknownKind("swimming".into()));
        assert!(factory().create_from_str("cycling", HERE, 1, 1, 1).is_ok());
    }

    #[test]
    fn test_id_is_timestamp_tail() {
        let at = Utc.timestamp_millis_opt(1_709_803_800_123).unwrap();
        let w = WorkoutFactory::new(FixedClock(at))
            .create(WorkoutKind::Running, HERE, 1, 1, 1)
            .unwrap();
        assert_eq!(w.id, "9803800123");
        assert_eq!(w.date, at);
    }

    #[test]
    fn test_ids_distinct_within_same_millisecond() {
        let mut f = factory();
        let a = f.create(WorkoutKind::Running, HERE, 1, 1, 1).unwrap();
        let b = f.create(WorkoutKind::Cycling, HERE, 1, 1, 1).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.date, b.date);
        assert_eq!(a.id.len(), 10);
        assert_eq!(b.id.len(), 10);
    }

    #[test]
    fn test_failed_create_does_not_consume_id() {
        let mut f = factory();
        assert!(f.create(WorkoutKind::Running, HERE, -1, 1, 1).is_err());
        let w = f.create(WorkoutKind::Running, HERE, 1, 1, 1).unwrap();
        let expected = factory().create(WorkoutKind::Running, HERE, 1, 1, 1).unwrap();
        assert_eq!(w.id, expected.id);
    }

    #[test]
    fn test_overflowing_metric_rejected() {
        let mut f = factory();
        let err = f.create(WorkoutKind::Cycling, HERE, "15", "1e-310", "0").unwrap_err();
        assert_eq!(err, WorkoutError::Validation);
        let err = f.create(WorkoutKind::Running, HERE, 1e-320, 15, 32).unwrap_err();
        assert_eq!(err, WorkoutError::Validation);

        // Small inputs whose metric stays finite are still accepted.
        let w = f.create(WorkoutKind::Cycling, HERE, 15, 1e-9, 0).unwrap();
        assert!(w.speed().is_some_and(f64::is_finite));
    }
}
