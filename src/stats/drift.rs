//! Drift detection between computed and persisted statistics.
//!
//! The persisted `statistics.json` goes stale when annotations change
//! without regenerating it. Comparing it field by field against a fresh
//! computation turns silent staleness into an actionable report.

use std::collections::BTreeSet;
use std::fmt;

use super::DatasetStatistics;

/// Tolerance for comparing floating-point aggregate fields.
const FLOAT_TOLERANCE: f64 = 1e-6;

/// One field whose persisted value disagrees with the computed one.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftEntry {
    /// Dotted field path (e.g. `crash_types.rear-end`).
    pub field: String,
    /// Value recomputed from the catalog.
    pub computed: String,
    /// Value found in the persisted file.
    pub persisted: String,
}

/// All discrepancies between computed and persisted statistics.
#[derive(Clone, Debug, Default)]
pub struct StatsDrift {
    pub entries: Vec<DriftEntry>,
}

impl StatsDrift {
    /// Returns true if the persisted copy matches the computed statistics.
    pub fn is_in_sync(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of drifted fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields drifted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StatsDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "Statistics in sync: no drift detected");
        }

        writeln!(f, "Statistics drift in {} field(s):", self.entries.len())?;
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {}: persisted {} but computed {}",
                entry.field, entry.persisted, entry.computed
            )?;
        }
        Ok(())
    }
}

/// Compares computed statistics against a persisted copy.
pub fn diff_statistics(
    computed: &DatasetStatistics,
    persisted: &DatasetStatistics,
) -> StatsDrift {
    let mut drift = StatsDrift::default();

    diff_count(&mut drift, "total_videos", computed.total_videos, persisted.total_videos);
    diff_count(&mut drift, "total_frames", computed.total_frames, persisted.total_frames);
    diff_count(&mut drift, "crash_videos", computed.crash_videos, persisted.crash_videos);
    diff_count(&mut drift, "normal_videos", computed.normal_videos, persisted.normal_videos);

    diff_map(&mut drift, "crash_types", &computed.crash_types, &persisted.crash_types);
    diff_map(
        &mut drift,
        "weather_distribution",
        &computed.weather_distribution,
        &persisted.weather_distribution,
    );

    diff_float(&mut drift, "avg_duration", computed.avg_duration, persisted.avg_duration);
    diff_float(
        &mut drift,
        "total_duration_hours",
        computed.total_duration_hours,
        persisted.total_duration_hours,
    );

    drift
}

fn diff_count(drift: &mut StatsDrift, field: &str, computed: u64, persisted: u64) {
    if computed != persisted {
        drift.entries.push(DriftEntry {
            field: field.to_string(),
            computed: computed.to_string(),
            persisted: persisted.to_string(),
        });
    }
}

fn diff_float(drift: &mut StatsDrift, field: &str, computed: f64, persisted: f64) {
    if (computed - persisted).abs() > FLOAT_TOLERANCE {
        drift.entries.push(DriftEntry {
            field: field.to_string(),
            computed: format!("{:.6}", computed),
            persisted: format!("{:.6}", persisted),
        });
    }
}

fn diff_map(
    drift: &mut StatsDrift,
    field: &str,
    computed: &std::collections::BTreeMap<String, u64>,
    persisted: &std::collections::BTreeMap<String, u64>,
) {
    let keys: BTreeSet<&String> = computed.keys().chain(persisted.keys()).collect();

    for key in keys {
        let c = computed.get(key).copied().unwrap_or(0);
        let p = persisted.get(key).copied().unwrap_or(0);
        if c != p {
            drift.entries.push(DriftEntry {
                field: format!("{}.{}", field, key),
                computed: c.to_string(),
                persisted: p.to_string(),
            });
        }
    }
}
