//! Build report: user-facing summary of an index build.
//!
//! Every video id excluded from the catalog appears here with its reason;
//! exclusions are never silent.

use std::fmt;

use super::{BuildFailure, DatasetIndex, FailureReason, SplitName};

/// Summary of one index build: loaded count plus every exclusion.
#[derive(Clone, Debug)]
pub struct BuildReport {
    pub split: SplitName,
    pub loaded: usize,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    /// Builds the report from a finished index.
    pub fn from_index(index: &DatasetIndex) -> Self {
        Self {
            split: index.split(),
            loaded: index.len(),
            failures: index.failures().to_vec(),
        }
    }

    /// Number of excluded videos.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Total ids considered (loaded plus excluded).
    pub fn total(&self) -> usize {
        self.loaded + self.failures.len()
    }

    /// Returns true if every listed video made it into the catalog.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Build report for split '{}': {} loaded, {} excluded",
            self.split,
            self.loaded,
            self.failed()
        )?;

        if self.failures.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        for failure in &self.failures {
            writeln!(f, "  EXCLUDED {}: {}", failure.video_id, failure.reason)?;
            if let FailureReason::Invalid(report) = &failure.reason {
                for issue in &report.issues {
                    writeln!(f, "    {}", issue)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FailureReason;
    use crate::model::VideoId;

    #[test]
    fn test_report_display_lists_exclusions() {
        let report = BuildReport {
            split: SplitName::Train,
            loaded: 3,
            failures: vec![BuildFailure {
                video_id: VideoId::new("crash_002"),
                reason: FailureReason::AnnotationNotFound {
                    path: "annotations/crash/crash_002.json".into(),
                },
            }],
        };

        let text = report.to_string();
        assert!(text.contains("3 loaded, 1 excluded"));
        assert!(text.contains("EXCLUDED crash_002"));
        assert!(text.contains("annotation file not found"));
    }

    #[test]
    fn test_complete_report() {
        let report = BuildReport {
            split: SplitName::Val,
            loaded: 2,
            failures: vec![],
        };

        assert!(report.is_complete());
        assert_eq!(report.total(), 2);
        assert!(report.to_string().contains("2 loaded, 0 excluded"));
    }
}
