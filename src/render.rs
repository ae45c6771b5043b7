use crate::types::{Workout, WorkoutDetail};

/// One-line list entry: description, distance, duration, metric, extra field.
pub fn summary_line(w: &Workout) -> String {
    let tail = match w.detail {
        WorkoutDetail::Running { cadence, pace } => format!("{pace:.1} min/km | {cadence} spm"),
        WorkoutDetail::Cycling {
            elevation_gain,
            speed,
        } => format!("{speed:.1} km/h | {elevation_gain} m"),
    };
    format!(
        "{} | {} km | {} min | {tail}",
        w.description, w.distance, w.duration
    )
}

/// Tab-separated row with the identifying fields up front.
pub fn details_line(index: usize, w: &Workout) -> String {
    format!(
        "{index}\t{}\t{}\t{}\t{},{}\t{}",
        w.id,
        w.kind(),
        w.date.to_rfc3339(),
        w.coords.lat,
        w.coords.lng,
        summary_line(w)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coords;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_lines() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();
        let run = Workout::running("1".into(), at, Coords::new(12.0, 18.0), 8.0, 15.0, 32.0);
        assert_eq!(
            summary_line(&run),
            "Running on March 7, 2024 | 8 km | 15 min | 1.9 min/km | 32 spm"
        );

        let ride = Workout::cycling("2".into(), at, Coords::new(12.0, 18.0), 15.0, 10.0, -5.0);
        assert_eq!(
            summary_line(&ride),
            "Cycling on March 7, 2024 | 15 km | 10 min | 90.0 km/h | -5 m"
        );
    }

    #[test]
    fn test_details_line() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap();
        let run = Workout::running(
            "0123456789".into(),
            at,
            Coords::new(12.5, 18.0),
            8.0,
            15.0,
            32.0,
        );
        let line = details_line(1, &run);
        assert!(line.starts_with("1\t0123456789\trunning\t2024-03-07T09:30:00+00:00\t12.5,18\t"));
    }
}
