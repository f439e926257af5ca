/*! Human-readable summaries and persistence of a simulation result. */

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::TimeZone;

use crate::time::{datetime_at, Instant, DAY};

/// The timestamp layout used for the persisted event list: a naive
/// local calendar time with microsecond precision, one per line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Count/rate summary of one simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub commit_count: usize,
    pub simulated_days: f64,
    pub mean_per_day: f64,
}

impl Report {
    pub fn new(events: &[Instant], start: Instant, end: Instant) -> Report {
        let simulated_days = (end - start) / DAY;
        Report {
            commit_count: events.len(),
            simulated_days,
            mean_per_day: events.len() as f64 / simulated_days,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:=^80}", " REPORT ")?;
        writeln!(f, "COMMIT COUNT         : {} commits", self.commit_count)?;
        writeln!(f, "TOTAL SIMULATION DAY : {} DAY", self.simulated_days)?;
        write!(f, "MEAN                 : {:.2} commits per day", self.mean_per_day)
    }
}

/// Persist the event sequence, one naive-local timestamp per line, no
/// header, newline-terminated. Parent directories are created as
/// needed.
pub fn write_timestamps<Tz: TimeZone>(
    path: &Path,
    events: &[Instant],
    tz: &Tz,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    for &t in events {
        let line = datetime_at(t, tz).naive_local().format(TIMESTAMP_FORMAT);
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    #[test]
    fn report_summarizes_counts_and_rates() {
        let events = vec![10.0, 20.0, 30.0];
        let report = Report::new(&events, 0.0, 2.0 * DAY);
        assert_eq!(report.commit_count, 3);
        assert_eq!(report.simulated_days, 2.0);
        assert_eq!(report.mean_per_day, 1.5);
        let rendered = report.to_string();
        assert!(rendered.contains("3 commits"));
        assert!(rendered.contains("1.50 commits per day"));
    }

    #[test]
    fn written_timestamps_parse_back_line_by_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("events.txt");
        let events = vec![0.5, 86_400.25, 172_800.125];

        write_timestamps(&path, &events, &Utc).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), events.len());
        for (line, &t) in lines.iter().zip(&events) {
            let parsed = NaiveDateTime::parse_from_str(line, TIMESTAMP_FORMAT).unwrap();
            let roundtrip = parsed.and_utc().timestamp_micros() as f64 / 1e6;
            assert!((roundtrip - t).abs() < 1e-6);
        }
    }
}
