//! Validation report types for structured error reporting.
//!
//! A report collects every contract violation found in a single annotation,
//! so that authors can fix a file in one pass instead of replaying the
//! validator against one failure at a time.

use std::fmt;

/// The result of validating one annotation.
///
/// Contains all issues found, categorized by severity.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if the report contains an issue with the given code.
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Context about where in the annotation the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A warning that does not exclude the video from the catalog.
    Warning,
    /// An error that makes the annotation invalid.
    Error,
}

/// A stable code identifying the type of validation issue.
///
/// These codes can be used for filtering, ignoring specific issues,
/// or programmatic handling of validation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// One of video_id, fps, duration, category (or a required detection
    /// field) is absent.
    MissingRequiredField,
    /// An enum-typed field holds a value outside its declared set.
    InvalidEnum,
    /// crash_frame/crash_type present on a non-crash video, or absent on a
    /// crash video.
    ConditionalField,
    /// A bbox does not have exactly 4 numeric entries, is non-finite, or has
    /// non-positive width/height.
    BBoxShape,
    /// Frame ids are not strictly increasing, or timestamps regress.
    FrameOrder,
    /// A frame timestamp exceeds the video duration.
    TimestampBeyondDuration,
    /// Two detections in the same frame share an id.
    DuplicateDetectionId,
    /// A numeric field violates its sign constraint (fps, duration, speed,
    /// crash_frame, camera height, timestamps).
    NumericRange,
    /// The video id does not follow the `{category}_{seq:03}` convention.
    NamingConvention,
}

/// Context about where in the annotation a validation issue occurred.
///
/// Positions are list indices rather than annotated ids, since the ids
/// themselves may be the thing that is missing or malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueContext {
    /// Issue with the record as a whole.
    Record,
    /// Issue with the frame at the given index.
    Frame { index: usize },
    /// Issue with a vehicle detection.
    Vehicle { frame: usize, index: usize },
    /// Issue with a pedestrian detection.
    Pedestrian { frame: usize, index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Record => write!(f, "record"),
            IssueContext::Frame { index } => write!(f, "frames[{}]", index),
            IssueContext::Vehicle { frame, index } => {
                write!(f, "frames[{}].vehicles[{}]", frame, index)
            }
            IssueContext::Pedestrian { frame, index } => {
                write!(f, "frames[{}].pedestrians[{}]", frame, index)
            }
        }
    }
}
