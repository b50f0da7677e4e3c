//! CSV export of a sample log snapshot

use super::error::{TrackerError, TrackerResult};
use super::sample_log::Sample;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// First column of the exported table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeColumn {
    /// `Time (s)`: seconds since session start
    #[default]
    Elapsed,

    /// `Timestamp`: RFC 3339 UTC, session start plus elapsed
    WallClock { session_start: DateTime<Utc> },
}

/// Write the header and one row per sample, in order
///
/// Refuses an empty slice with [`TrackerError::EmptyExport`] before writing
/// anything.
pub fn write_csv<W: Write>(
    samples: &[Sample],
    mut writer: W,
    column: TimeColumn,
) -> TrackerResult<()> {
    if samples.is_empty() {
        return Err(TrackerError::EmptyExport);
    }

    match column {
        TimeColumn::Elapsed => {
            writeln!(writer, "Time (s),Frequency (Hz)")?;
            for s in samples {
                writeln!(writer, "{},{}", s.elapsed_seconds, s.frequency_hz)?;
            }
        }
        TimeColumn::WallClock { session_start } => {
            writeln!(writer, "Timestamp,Frequency")?;
            for s in samples {
                let offset =
                    ChronoDuration::microseconds((s.elapsed_seconds * 1e6).round() as i64);
                let timestamp =
                    (session_start + offset).to_rfc3339_opts(SecondsFormat::Millis, true);
                writeln!(writer, "{},{}", timestamp, s.frequency_hz)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Render the table to a string
pub fn to_csv_string(samples: &[Sample], column: TimeColumn) -> TrackerResult<String> {
    let mut buf = Vec::new();
    write_csv(samples, &mut buf, column)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Export to `path`. An empty log is refused and no file is created.
pub fn export_csv_file(samples: &[Sample], path: &Path, column: TimeColumn) -> TrackerResult<()> {
    if samples.is_empty() {
        return Err(TrackerError::EmptyExport);
    }

    let file = File::create(path)?;
    write_csv(samples, BufWriter::new(file), column)?;
    info!("Exported {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// `frequency_data_<timestamp>.csv`, with characters that are awkward in
/// file names replaced
pub fn default_file_name(now: DateTime<Utc>) -> String {
    format!("frequency_data_{}.csv", now.format("%Y-%m-%dT%H-%M-%S%.3fZ"))
}

/// Live readout text for the latest peak
pub fn peak_label(frequency_hz: f64) -> String {
    format!("Peak Frequency: {:.2} Hz", frequency_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scenario() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 100.0),
            Sample::new(0.5, 200.0),
            Sample::new(1.0, 150.0),
        ]
    }

    #[test]
    fn test_elapsed_csv_format() {
        let csv = to_csv_string(&scenario(), TimeColumn::Elapsed).unwrap();
        assert_eq!(csv, "Time (s),Frequency (Hz)\n0,100\n0.5,200\n1,150\n");
    }

    #[test]
    fn test_fractional_values_round_trip() {
        let samples = [Sample::new(0.016, 11025.0), Sample::new(1.25, 21.533203125)];
        let csv = to_csv_string(&samples, TimeColumn::Elapsed).unwrap();
        assert_eq!(csv, "Time (s),Frequency (Hz)\n0.016,11025\n1.25,21.533203125\n");
    }

    #[test]
    fn test_wall_clock_csv_format() {
        let session_start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let csv = to_csv_string(&scenario(), TimeColumn::WallClock { session_start }).unwrap();

        assert_eq!(
            csv,
            "Timestamp,Frequency\n\
             2024-03-01T12:00:00.000Z,100\n\
             2024-03-01T12:00:00.500Z,200\n\
             2024-03-01T12:00:01.000Z,150\n"
        );
    }

    #[test]
    fn test_empty_export_refused() {
        let mut buf = Vec::new();
        let err = write_csv(&[], &mut buf, TimeColumn::Elapsed).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyExport));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_export_creates_no_file() {
        let path = std::env::temp_dir()
            .join(format!("peak_tracker_empty_{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let err = export_csv_file(&[], &path, TimeColumn::Elapsed).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyExport));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_file_written() {
        let path = std::env::temp_dir()
            .join(format!("peak_tracker_export_{}.csv", std::process::id()));

        export_csv_file(&scenario(), &path, TimeColumn::Elapsed).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(contents.starts_with("Time (s),Frequency (Hz)\n"));
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn test_default_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(default_file_name(now), "frequency_data_2024-03-01T09-05-07.000Z.csv");
    }

    #[test]
    fn test_peak_label() {
        assert_eq!(peak_label(440.0), "Peak Frequency: 440.00 Hz");
        assert_eq!(peak_label(21.533203125), "Peak Frequency: 21.53 Hz");
    }
}
