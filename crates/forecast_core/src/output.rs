//! Forecast log sink: one self-contained JSON record per line, appended to a
//! configurable file.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::aggregate::Forecast;

/// Log sink configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct ForecastLogConfig {
    pub path: PathBuf,
}

impl Default for ForecastLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("forecast_log.jsonl"),
        }
    }
}

/// Append-only JSONL writer for forecasts.
pub struct ForecastLog {
    writer: BufWriter<File>,
}

impl ForecastLog {
    /// Open (or create) the destination file in append mode.
    pub fn open(config: &ForecastLogConfig) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Write one forecast as a single JSON line and flush it, so records are
    /// durable per event rather than per process exit.
    pub fn append(&mut self, forecast: &Forecast) -> Result<(), Box<dyn Error>> {
        serde_json::to_writer(&mut self.writer, forecast)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, CombinePolicy};
    use crate::behavior::EvenSplit;
    use crate::simulation::simulate;
    use crate::test_helpers::{disruption_on, test_world, SEG_A, SEG_ISOLATED};
    use tempfile::NamedTempFile;

    fn sample_forecast(displaced: i64, segment: crate::network::SegmentId) -> Forecast {
        let world = test_world();
        let result = simulate(&world, &disruption_on(segment, displaced), &EvenSplit).unwrap();
        aggregate(&[result], &CombinePolicy::Mean).unwrap()
    }

    #[test]
    fn append_writes_one_json_line_per_forecast() {
        let file = NamedTempFile::new().unwrap();
        let config = ForecastLogConfig {
            path: file.path().to_path_buf(),
        };

        let mut log = ForecastLog::open(&config).unwrap();
        log.append(&sample_forecast(20, SEG_A)).unwrap();
        log.append(&sample_forecast(5, SEG_ISOLATED)).unwrap();
        drop(log);

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let parsed: Forecast = serde_json::from_str(line).unwrap();
            assert!(parsed.trials >= 1);
        }
    }

    #[test]
    fn reopening_appends_rather_than_truncates() {
        let file = NamedTempFile::new().unwrap();
        let config = ForecastLogConfig {
            path: file.path().to_path_buf(),
        };

        {
            let mut log = ForecastLog::open(&config).unwrap();
            log.append(&sample_forecast(20, SEG_A)).unwrap();
        }
        {
            let mut log = ForecastLog::open(&config).unwrap();
            log.append(&sample_forecast(20, SEG_A)).unwrap();
        }

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn default_config_points_at_jsonl_file() {
        assert_eq!(
            ForecastLogConfig::default().path,
            PathBuf::from("forecast_log.jsonl")
        );
    }
}
