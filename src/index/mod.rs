//! Index builder for the TCAS dataset layout.
//!
//! A build scans one split file, loads and validates the paired annotation
//! for every listed video id, and produces a [`DatasetIndex`]: the catalog
//! of validated records in split-file order, plus the ordered list of
//! per-video failures. Per-video problems never abort the build; only
//! whole-dataset structural failures (missing split file, unreadable root)
//! are fatal.

mod report;

pub use report::BuildReport;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TcasError;
use crate::model::raw::read_annotation;
use crate::model::{VideoId, VideoRecord};
use crate::validation::{validate_annotation, ValidationReport};

/// A named partition of the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitName {
    Train,
    Val,
    Test,
}

impl SplitName {
    /// All splits, in canonical order.
    pub const ALL: [SplitName; 3] = [SplitName::Train, SplitName::Val, SplitName::Test];

    /// Parses a split name; `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "train" => Some(Self::Train),
            "val" => Some(Self::Val),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Returns the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }

    /// Returns the split file path under the dataset root.
    pub fn file_path(&self, root: &Path) -> PathBuf {
        root.join("metadata")
            .join(format!("{}_split.txt", self.as_str()))
    }
}

impl fmt::Display for SplitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a video id listed in the split was excluded from the catalog.
#[derive(Clone, Debug)]
pub enum FailureReason {
    /// The id appears more than once in the split file.
    DuplicateVideoId { occurrences: usize },
    /// No annotation file exists at the expected path.
    AnnotationNotFound { path: PathBuf },
    /// The annotation file is not well-formed JSON.
    AnnotationParse { message: String },
    /// The payload video_id disagrees with the filename-derived id.
    IdMismatch { found: String },
    /// The annotation failed schema validation.
    Invalid(ValidationReport),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::DuplicateVideoId { occurrences } => {
                write!(f, "listed {} times in the split file", occurrences)
            }
            FailureReason::AnnotationNotFound { path } => {
                write!(f, "annotation file not found: {}", path.display())
            }
            FailureReason::AnnotationParse { message } => {
                write!(f, "annotation JSON parse failed: {}", message)
            }
            FailureReason::IdMismatch { found } => {
                write!(f, "payload video_id '{}' does not match filename", found)
            }
            FailureReason::Invalid(report) => {
                write!(
                    f,
                    "validation failed with {} error(s)",
                    report.error_count()
                )
            }
        }
    }
}

/// One excluded video with its reason, in split-file order.
#[derive(Clone, Debug)]
pub struct BuildFailure {
    pub video_id: VideoId,
    pub reason: FailureReason,
}

/// An immutable, queryable catalog of one split's validated annotations.
///
/// Construction goes through [`build`] (or [`DatasetIndex::from_records`]
/// for in-memory use). Records iterate in split-file order; the failure
/// list is ordered the same way. Once built, the index is read-only and
/// safe to share across threads.
#[derive(Clone, Debug)]
pub struct DatasetIndex {
    split: SplitName,
    records: Vec<VideoRecord>,
    by_id: HashMap<VideoId, usize>,
    failures: Vec<BuildFailure>,
}

impl DatasetIndex {
    /// Constructs an index from already-validated records.
    ///
    /// Records keep the given order; a later record with a repeated id is
    /// unreachable by lookup and should not occur.
    pub fn from_records(split: SplitName, records: Vec<VideoRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.video_id.clone(), idx))
            .collect();
        Self {
            split,
            records,
            by_id,
            failures: Vec::new(),
        }
    }

    /// The split this index was built from.
    pub fn split(&self) -> SplitName {
        self.split
    }

    /// Number of videos in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no videos.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validated records, in split-file order.
    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    /// Excluded videos with reasons, in split-file order.
    pub fn failures(&self) -> &[BuildFailure] {
        &self.failures
    }

    /// Produces the user-facing build report.
    pub fn report(&self) -> BuildReport {
        BuildReport::from_index(self)
    }

    pub(crate) fn lookup(&self, video_id: &VideoId) -> Option<usize> {
        self.by_id.get(video_id).copied()
    }
}

/// Builds the index for one split of the dataset.
///
/// Reads `metadata/{split}_split.txt`, then loads and validates
/// `annotations/{crash|normal}/{id}.json` for each listed id. A missing or
/// unreadable split file is fatal; every per-video problem is recorded in
/// the returned index and the id excluded from the catalog.
pub fn build(root: &Path, split: SplitName) -> Result<DatasetIndex, TcasError> {
    let ids = read_split(root, split)?;

    // Ids listed more than once are wholly excluded; one failure per id.
    let mut counts: HashMap<&VideoId, usize> = HashMap::new();
    for id in &ids {
        *counts.entry(id).or_insert(0) += 1;
    }

    let mut records = Vec::new();
    let mut by_id: HashMap<VideoId, usize> = HashMap::new();
    let mut failures = Vec::new();
    let mut reported: HashSet<&VideoId> = HashSet::new();

    for id in &ids {
        let occurrences = counts.get(id).copied().unwrap_or(1);
        if occurrences > 1 {
            if reported.insert(id) {
                failures.push(BuildFailure {
                    video_id: id.clone(),
                    reason: FailureReason::DuplicateVideoId { occurrences },
                });
            }
            continue;
        }

        match load_video(root, id) {
            Ok(record) => {
                by_id.insert(id.clone(), records.len());
                records.push(record);
            }
            Err(reason) => failures.push(BuildFailure {
                video_id: id.clone(),
                reason,
            }),
        }
    }

    Ok(DatasetIndex {
        split,
        records,
        by_id,
        failures,
    })
}

fn load_video(root: &Path, id: &VideoId) -> Result<VideoRecord, FailureReason> {
    let path = annotation_path(root, id);
    if !path.exists() {
        return Err(FailureReason::AnnotationNotFound { path });
    }

    let raw = match read_annotation(&path) {
        Ok(raw) => raw,
        Err(err) => {
            return Err(FailureReason::AnnotationParse {
                message: err.to_string(),
            })
        }
    };

    // The embedded id must agree with the filename stem. A missing payload
    // id falls through to validation, which reports it as a required field.
    if let Some(payload_id) = raw.video_id.as_deref() {
        if payload_id != id.as_str() {
            return Err(FailureReason::IdMismatch {
                found: payload_id.to_string(),
            });
        }
    }

    validate_annotation(&raw).map_err(FailureReason::Invalid)
}

/// Reads a split file into an ordered list of video ids.
///
/// Blank lines are ignored; surrounding whitespace is trimmed. A missing
/// split file is fatal.
pub fn read_split(root: &Path, split: SplitName) -> Result<Vec<VideoId>, TcasError> {
    let path = split.file_path(root);
    if !path.exists() {
        return Err(TcasError::SplitNotFound { path });
    }

    let contents = fs::read_to_string(&path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(VideoId::from)
        .collect())
}

/// Expected annotation path for a video id, by the dataset's path
/// convention (`annotations/{crash|normal}/{id}.json`).
pub fn annotation_path(root: &Path, id: &VideoId) -> PathBuf {
    root.join("annotations")
        .join(category_dir(id))
        .join(format!("{}.json", id))
}

/// Expected video media path for a video id
/// (`videos/{crash|normal}/{id}.mp4`). The media itself is opaque to this
/// crate; decoding is delegated to external tooling.
pub fn video_path(root: &Path, id: &VideoId) -> PathBuf {
    root.join("videos")
        .join(category_dir(id))
        .join(format!("{}.mp4", id))
}

fn category_dir(id: &VideoId) -> &'static str {
    if id.is_crash_prefixed() {
        "crash"
    } else {
        "normal"
    }
}

/// A video id listed in more than one split.
#[derive(Clone, Debug)]
pub struct SplitOverlap {
    pub video_id: VideoId,
    pub splits: Vec<SplitName>,
}

/// The result of auditing the three splits for cross-split leakage.
#[derive(Clone, Debug, Default)]
pub struct SplitAudit {
    /// Ids appearing in more than one split, in first-seen order.
    pub overlaps: Vec<SplitOverlap>,
}

impl SplitAudit {
    /// Returns true if the splits are pairwise disjoint.
    pub fn is_disjoint(&self) -> bool {
        self.overlaps.is_empty()
    }
}

impl fmt::Display for SplitAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overlaps.is_empty() {
            return writeln!(f, "Splits are disjoint: no leaked video ids");
        }

        writeln!(
            f,
            "Cross-split leakage: {} video id(s) appear in multiple splits:",
            self.overlaps.len()
        )?;
        writeln!(f)?;
        for overlap in &self.overlaps {
            let splits: Vec<&str> = overlap.splits.iter().map(|s| s.as_str()).collect();
            writeln!(f, "  {} in {}", overlap.video_id, splits.join(", "))?;
        }
        Ok(())
    }
}

/// Audits train/val/test for cross-split leakage.
///
/// Disjointness is a dataset invariant the file format cannot enforce; an
/// id listed in two splits is an evaluation-leakage bug worth surfacing.
pub fn audit_splits(root: &Path) -> Result<SplitAudit, TcasError> {
    let mut membership: Vec<(VideoId, Vec<SplitName>)> = Vec::new();
    let mut positions: HashMap<VideoId, usize> = HashMap::new();

    for split in SplitName::ALL {
        for id in read_split(root, split)? {
            match positions.get(&id) {
                Some(&pos) => {
                    let splits = &mut membership[pos].1;
                    if !splits.contains(&split) {
                        splits.push(split);
                    }
                }
                None => {
                    positions.insert(id.clone(), membership.len());
                    membership.push((id, vec![split]));
                }
            }
        }
    }

    let overlaps = membership
        .into_iter()
        .filter(|(_, splits)| splits.len() > 1)
        .map(|(video_id, splits)| SplitOverlap { video_id, splits })
        .collect();

    Ok(SplitAudit { overlaps })
}
