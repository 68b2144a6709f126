//! Dataset statistics.
//!
//! Statistics are always recomputed on demand from a built index, never
//! cached: the numbers reflect exactly what the catalog holds. The
//! persisted `metadata/statistics.json` is treated as a claim to be checked
//! against, not a source of truth (see [`drift`]).

mod drift;

pub use drift::{diff_statistics, DriftEntry, StatsDrift};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TcasError;
use crate::index::DatasetIndex;

/// Aggregate counts over a dataset split.
///
/// Matches the schema of `metadata/statistics.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_videos: u64,
    pub total_frames: u64,
    pub crash_videos: u64,
    pub normal_videos: u64,

    /// Crash videos per crash type, keyed by wire name (e.g. "rear-end").
    #[serde(default)]
    pub crash_types: BTreeMap<String, u64>,

    /// Videos per annotated weather condition.
    #[serde(default)]
    pub weather_distribution: BTreeMap<String, u64>,

    /// Mean video duration in seconds (0 for an empty catalog).
    pub avg_duration: f64,

    /// Summed duration of all videos, in hours.
    pub total_duration_hours: f64,
}

impl std::fmt::Display for DatasetStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Videos:       {} total", self.total_videos)?;
        writeln!(
            f,
            "Categories:   {} crash, {} normal",
            self.crash_videos, self.normal_videos
        )?;
        writeln!(f, "Frames:       {} annotated", self.total_frames)?;
        writeln!(
            f,
            "Duration:     {:.1}s average, {:.2}h total",
            self.avg_duration, self.total_duration_hours
        )?;

        if !self.crash_types.is_empty() {
            writeln!(f)?;
            writeln!(f, "Crash types:")?;
            for (crash_type, count) in &self.crash_types {
                writeln!(f, "  {:<16} {}", crash_type, count)?;
            }
        }

        if !self.weather_distribution.is_empty() {
            writeln!(f)?;
            writeln!(f, "Weather:")?;
            for (weather, count) in &self.weather_distribution {
                writeln!(f, "  {:<16} {}", weather, count)?;
            }
        }

        Ok(())
    }
}

/// Computes statistics from the catalog.
pub fn compute_statistics(index: &DatasetIndex) -> DatasetStatistics {
    let mut stats = DatasetStatistics::default();
    let mut total_duration = 0.0f64;

    for record in index.records() {
        stats.total_videos += 1;
        stats.total_frames += record.frames.len() as u64;
        total_duration += record.duration;

        if record.is_crash() {
            stats.crash_videos += 1;
        } else {
            stats.normal_videos += 1;
        }

        if let Some(crash_type) = record.crash_type {
            *stats
                .crash_types
                .entry(crash_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        if let Some(weather) = record.weather {
            *stats
                .weather_distribution
                .entry(weather.as_str().to_string())
                .or_insert(0) += 1;
        }
    }

    if stats.total_videos > 0 {
        stats.avg_duration = total_duration / stats.total_videos as f64;
    }
    stats.total_duration_hours = total_duration / 3600.0;

    stats
}

/// Path of the persisted statistics file under the dataset root.
pub fn statistics_path(root: &Path) -> PathBuf {
    root.join("metadata").join("statistics.json")
}

/// Reads the persisted statistics file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_statistics(path: &Path) -> Result<DatasetStatistics, TcasError> {
    let file = File::open(path).map_err(TcasError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TcasError::StatisticsParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SplitName;
    use crate::model::{Category, CrashType, FrameRecord, VideoRecord, Weather};

    fn sample_index() -> DatasetIndex {
        DatasetIndex::from_records(
            SplitName::Train,
            vec![
                VideoRecord::new("crash_001", 30, 120.0, Category::Crash)
                    .with_crash(3450, CrashType::RearEnd)
                    .with_weather(Weather::Clear)
                    .with_frames(vec![
                        FrameRecord::new(3400, 113.33),
                        FrameRecord::new(3450, 115.0),
                    ]),
                VideoRecord::new("crash_002", 25, 60.0, Category::Crash)
                    .with_crash(900, CrashType::SideImpact)
                    .with_weather(Weather::Rainy),
                VideoRecord::new("normal_001", 30, 60.0, Category::Normal)
                    .with_weather(Weather::Clear)
                    .with_frames(vec![FrameRecord::new(0, 0.0)]),
            ],
        )
    }

    #[test]
    fn test_compute_statistics() {
        let stats = compute_statistics(&sample_index());

        assert_eq!(stats.total_videos, 3);
        assert_eq!(stats.total_frames, 3);
        assert_eq!(stats.crash_videos, 2);
        assert_eq!(stats.normal_videos, 1);
        assert_eq!(stats.crash_types.get("rear-end"), Some(&1));
        assert_eq!(stats.crash_types.get("side-impact"), Some(&1));
        assert_eq!(stats.weather_distribution.get("clear"), Some(&2));
        assert_eq!(stats.weather_distribution.get("rainy"), Some(&1));
        assert!((stats.avg_duration - 80.0).abs() < 1e-9);
        assert!((stats.total_duration_hours - 240.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog_statistics() {
        let index = DatasetIndex::from_records(SplitName::Test, vec![]);
        let stats = compute_statistics(&index);

        assert_eq!(stats.total_videos, 0);
        assert_eq!(stats.avg_duration, 0.0);
        assert_eq!(stats.total_duration_hours, 0.0);
    }

    #[test]
    fn test_statistics_json_roundtrip() {
        let stats = compute_statistics(&sample_index());
        let json = serde_json::to_string_pretty(&stats).expect("serialize stats");

        assert!(json.contains("\"total_videos\""));
        assert!(json.contains("\"weather_distribution\""));

        let restored: DatasetStatistics = serde_json::from_str(&json).expect("parse stats");
        assert_eq!(stats, restored);
    }
}
