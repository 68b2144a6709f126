//! Schema validation for per-video annotations.
//!
//! The validator is a pure function from the permissive raw wire form to a
//! checked [`VideoRecord`]. It collects *all* violations in one pass rather
//! than failing fast, checking:
//! - Required fields (video_id, fps, duration, category)
//! - Closed enum membership for every string-typed label
//! - The conditional crash contract (crash_frame/crash_type present iff
//!   category is crash)
//! - Bounding box shape (exactly 4 finite numbers, positive width/height)
//! - Frame ordering (strictly increasing frame ids, non-decreasing
//!   timestamps bounded by the video duration)
//! - Detection id uniqueness within a frame

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashSet;

use crate::model::raw::{RawAnnotation, RawFrame, RawPedestrian, RawVehicle};
use crate::model::{
    BBoxXYWH, Behavior, CameraInfo, Category, CrashType, FrameRecord, LocationType,
    PedestrianAction, PedestrianDetection, RiskLevel, TimeOfDay, VehicleDetection, VehicleType,
    VideoId, VideoRecord, Weather,
};

/// Validates a raw annotation into a [`VideoRecord`].
///
/// Returns the checked record when no errors were found (warnings are
/// allowed), otherwise the full report of everything wrong with the
/// annotation. The function is pure: no I/O, no mutation of the input.
pub fn validate_annotation(raw: &RawAnnotation) -> Result<VideoRecord, ValidationReport> {
    match check_annotation(raw) {
        (Some(record), _) => Ok(record),
        (None, report) => Err(report),
    }
}

/// Runs every check and returns the full report alongside the record.
///
/// Unlike [`validate_annotation`], the report is kept even on success, so
/// callers can surface warnings for annotations that are otherwise valid.
pub fn check_annotation(raw: &RawAnnotation) -> (Option<VideoRecord>, ValidationReport) {
    let mut report = ValidationReport::new();

    let video_id = check_video_id(raw, &mut report);
    let fps = check_fps(raw, &mut report);
    let duration = check_duration(raw, &mut report);
    let category = check_category(raw, &mut report);

    let (crash_frame, crash_type) = check_crash_fields(raw, category, &mut report);
    let weather = check_enum_field(raw.weather.as_deref(), "weather", Weather::parse, &mut report);
    let time_of_day = check_enum_field(
        raw.time_of_day.as_deref(),
        "time_of_day",
        TimeOfDay::parse,
        &mut report,
    );
    let camera_info = check_camera_info(raw, &mut report);

    let frames = check_frames(&raw.frames, duration, &mut report);

    if !report.is_ok() {
        return (None, report);
    }

    let record = match (video_id, fps, duration, category) {
        (Some(video_id), Some(fps), Some(duration), Some(category)) => Some(VideoRecord {
            video_id,
            fps,
            duration,
            category,
            crash_frame,
            crash_type,
            weather,
            time_of_day,
            camera_info,
            frames,
        }),
        // Unreachable when the report is clean of errors, but stay total.
        _ => None,
    };

    (record, report)
}

fn check_video_id(raw: &RawAnnotation, report: &mut ValidationReport) -> Option<VideoId> {
    match raw.video_id.as_deref() {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "video_id is required",
                IssueContext::Record,
            ));
            None
        }
        Some(id) => {
            let id = VideoId::new(id);
            if !id.follows_naming_convention() {
                report.add(ValidationIssue::warning(
                    IssueCode::NamingConvention,
                    format!(
                        "video_id '{}' does not follow the {{category}}_{{seq:03}} convention",
                        id
                    ),
                    IssueContext::Record,
                ));
            }
            Some(id)
        }
    }
}

fn check_fps(raw: &RawAnnotation, report: &mut ValidationReport) -> Option<u32> {
    match raw.fps {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "fps is required",
                IssueContext::Record,
            ));
            None
        }
        Some(fps) => {
            if fps.is_finite() && fps > 0.0 && fps.fract() == 0.0 && fps <= u32::MAX as f64 {
                Some(fps as u32)
            } else {
                report.add(ValidationIssue::error(
                    IssueCode::NumericRange,
                    format!("fps must be a positive integer, got {}", fps),
                    IssueContext::Record,
                ));
                None
            }
        }
    }
}

fn check_duration(raw: &RawAnnotation, report: &mut ValidationReport) -> Option<f64> {
    match raw.duration {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "duration is required",
                IssueContext::Record,
            ));
            None
        }
        Some(duration) => {
            if duration.is_finite() && duration > 0.0 {
                Some(duration)
            } else {
                report.add(ValidationIssue::error(
                    IssueCode::NumericRange,
                    format!("duration must be a positive number, got {}", duration),
                    IssueContext::Record,
                ));
                None
            }
        }
    }
}

fn check_category(raw: &RawAnnotation, report: &mut ValidationReport) -> Option<Category> {
    match raw.category.as_deref() {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "category is required",
                IssueContext::Record,
            ));
            None
        }
        Some(s) => match Category::parse(s) {
            Some(category) => Some(category),
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::InvalidEnum,
                    format!("unknown category '{}' (expected: crash, normal)", s),
                    IssueContext::Record,
                ));
                None
            }
        },
    }
}

/// Enforces the conditional crash contract.
///
/// crash_frame and crash_type are required for crash videos and forbidden
/// otherwise. When the category itself is missing or invalid, these checks
/// are skipped to avoid cascading noise.
fn check_crash_fields(
    raw: &RawAnnotation,
    category: Option<Category>,
    report: &mut ValidationReport,
) -> (Option<u64>, Option<CrashType>) {
    match category {
        Some(Category::Crash) => {
            let crash_frame = match raw.crash_frame {
                None => {
                    report.add(ValidationIssue::error(
                        IssueCode::ConditionalField,
                        "crash_frame is required for crash videos",
                        IssueContext::Record,
                    ));
                    None
                }
                Some(frame) if frame < 0 => {
                    report.add(ValidationIssue::error(
                        IssueCode::NumericRange,
                        format!("crash_frame must be non-negative, got {}", frame),
                        IssueContext::Record,
                    ));
                    None
                }
                Some(frame) => Some(frame as u64),
            };

            let crash_type = match raw.crash_type.as_deref() {
                None => {
                    report.add(ValidationIssue::error(
                        IssueCode::ConditionalField,
                        "crash_type is required for crash videos",
                        IssueContext::Record,
                    ));
                    None
                }
                Some(s) => {
                    let parsed = CrashType::parse(s);
                    if parsed.is_none() {
                        report.add(ValidationIssue::error(
                            IssueCode::InvalidEnum,
                            format!("unknown crash_type '{}'", s),
                            IssueContext::Record,
                        ));
                    }
                    parsed
                }
            };

            (crash_frame, crash_type)
        }
        Some(Category::Normal) => {
            if raw.crash_frame.is_some() {
                report.add(ValidationIssue::error(
                    IssueCode::ConditionalField,
                    "crash_frame must be absent for normal videos",
                    IssueContext::Record,
                ));
            }
            if raw.crash_type.is_some() {
                report.add(ValidationIssue::error(
                    IssueCode::ConditionalField,
                    "crash_type must be absent for normal videos",
                    IssueContext::Record,
                ));
            }
            (None, None)
        }
        None => (None, None),
    }
}

fn check_enum_field<T>(
    value: Option<&str>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    report: &mut ValidationReport,
) -> Option<T> {
    let s = value?;
    let parsed = parse(s);
    if parsed.is_none() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidEnum,
            format!("unknown {} '{}'", field, s),
            IssueContext::Record,
        ));
    }
    parsed
}

fn check_camera_info(raw: &RawAnnotation, report: &mut ValidationReport) -> Option<CameraInfo> {
    let info = raw.camera_info.as_ref()?;

    let height = match info.height {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "camera_info.height is required",
                IssueContext::Record,
            ));
            None
        }
        Some(h) if h.is_finite() && h > 0.0 => Some(h),
        Some(h) => {
            report.add(ValidationIssue::error(
                IssueCode::NumericRange,
                format!("camera_info.height must be positive, got {}", h),
                IssueContext::Record,
            ));
            None
        }
    };

    let angle = match info.angle {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "camera_info.angle is required",
                IssueContext::Record,
            ));
            None
        }
        Some(a) => Some(a),
    };

    let location_type = match info.location_type.as_deref() {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "camera_info.location_type is required",
                IssueContext::Record,
            ));
            None
        }
        Some(s) => check_enum_field(Some(s), "camera_info.location_type", LocationType::parse, report),
    };

    match (height, angle, location_type) {
        (Some(height), Some(angle), Some(location_type)) => Some(CameraInfo {
            height,
            angle,
            location_type,
        }),
        _ => None,
    }
}

fn check_frames(
    raw_frames: &[RawFrame],
    duration: Option<f64>,
    report: &mut ValidationReport,
) -> Vec<FrameRecord> {
    let mut frames = Vec::with_capacity(raw_frames.len());
    let mut prev_frame_id: Option<i64> = None;
    let mut prev_timestamp: Option<f64> = None;

    for (idx, raw) in raw_frames.iter().enumerate() {
        let ctx = IssueContext::Frame { index: idx };

        let frame_id = match raw.frame_id {
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::MissingRequiredField,
                    "frame_id is required",
                    ctx,
                ));
                None
            }
            Some(id) if id < 0 => {
                report.add(ValidationIssue::error(
                    IssueCode::NumericRange,
                    format!("frame_id must be non-negative, got {}", id),
                    ctx,
                ));
                None
            }
            Some(id) => {
                if let Some(prev) = prev_frame_id {
                    if id <= prev {
                        report.add(ValidationIssue::error(
                            IssueCode::FrameOrder,
                            format!("frame_id {} is not greater than previous {}", id, prev),
                            ctx,
                        ));
                    }
                }
                prev_frame_id = Some(id);
                Some(id as u64)
            }
        };

        let timestamp = match raw.timestamp {
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::MissingRequiredField,
                    "timestamp is required",
                    ctx,
                ));
                None
            }
            Some(ts) if !ts.is_finite() || ts < 0.0 => {
                report.add(ValidationIssue::error(
                    IssueCode::NumericRange,
                    format!("timestamp must be non-negative, got {}", ts),
                    ctx,
                ));
                None
            }
            Some(ts) => {
                if let Some(prev) = prev_timestamp {
                    if ts < prev {
                        report.add(ValidationIssue::error(
                            IssueCode::FrameOrder,
                            format!("timestamp {} regresses below previous {}", ts, prev),
                            ctx,
                        ));
                    }
                }
                if let Some(duration) = duration {
                    if ts > duration {
                        report.add(ValidationIssue::error(
                            IssueCode::TimestampBeyondDuration,
                            format!("timestamp {} exceeds video duration {}", ts, duration),
                            ctx,
                        ));
                    }
                }
                prev_timestamp = Some(ts);
                Some(ts)
            }
        };

        let risk_level = match raw.risk_level.as_deref() {
            None => None,
            Some(s) => {
                let parsed = RiskLevel::parse(s);
                if parsed.is_none() {
                    report.add(ValidationIssue::error(
                        IssueCode::InvalidEnum,
                        format!("unknown risk_level '{}'", s),
                        ctx,
                    ));
                }
                parsed
            }
        };

        let vehicles = check_vehicles(&raw.vehicles, idx, report);
        let pedestrians = check_pedestrians(&raw.pedestrians, idx, report);

        if let (Some(frame_id), Some(timestamp)) = (frame_id, timestamp) {
            frames.push(FrameRecord {
                frame_id,
                timestamp,
                risk_level,
                vehicles,
                pedestrians,
            });
        }
    }

    frames
}

fn check_vehicles(
    raw_vehicles: &[RawVehicle],
    frame: usize,
    report: &mut ValidationReport,
) -> Vec<VehicleDetection> {
    let mut vehicles = Vec::with_capacity(raw_vehicles.len());
    let mut seen_ids: HashSet<i64> = HashSet::new();

    for (idx, raw) in raw_vehicles.iter().enumerate() {
        let ctx = IssueContext::Vehicle { frame, index: idx };

        let vehicle_id = match raw.vehicle_id {
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::MissingRequiredField,
                    "vehicle_id is required",
                    ctx,
                ));
                None
            }
            Some(id) => {
                if !seen_ids.insert(id) {
                    report.add(ValidationIssue::error(
                        IssueCode::DuplicateDetectionId,
                        format!("duplicate vehicle_id {} within frame", id),
                        ctx,
                    ));
                }
                Some(id)
            }
        };

        let bbox = check_bbox(raw.bbox.as_deref(), ctx, report);
        let vehicle_type =
            check_required_enum(raw.vehicle_type.as_deref(), "type", VehicleType::parse, ctx, report);
        let behavior =
            check_required_enum(raw.behavior.as_deref(), "behavior", Behavior::parse, ctx, report);

        let speed = match raw.speed {
            Some(speed) if !speed.is_finite() || speed < 0.0 => {
                report.add(ValidationIssue::error(
                    IssueCode::NumericRange,
                    format!("speed must be non-negative, got {}", speed),
                    ctx,
                ));
                None
            }
            other => other,
        };

        if let (Some(vehicle_id), Some(bbox), Some(vehicle_type), Some(behavior)) =
            (vehicle_id, bbox, vehicle_type, behavior)
        {
            vehicles.push(VehicleDetection {
                vehicle_id,
                bbox,
                vehicle_type,
                behavior,
                speed,
            });
        }
    }

    vehicles
}

fn check_pedestrians(
    raw_pedestrians: &[RawPedestrian],
    frame: usize,
    report: &mut ValidationReport,
) -> Vec<PedestrianDetection> {
    let mut pedestrians = Vec::with_capacity(raw_pedestrians.len());
    let mut seen_ids: HashSet<i64> = HashSet::new();

    for (idx, raw) in raw_pedestrians.iter().enumerate() {
        let ctx = IssueContext::Pedestrian { frame, index: idx };

        let pedestrian_id = match raw.pedestrian_id {
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::MissingRequiredField,
                    "pedestrian_id is required",
                    ctx,
                ));
                None
            }
            Some(id) => {
                if !seen_ids.insert(id) {
                    report.add(ValidationIssue::error(
                        IssueCode::DuplicateDetectionId,
                        format!("duplicate pedestrian_id {} within frame", id),
                        ctx,
                    ));
                }
                Some(id)
            }
        };

        let bbox = check_bbox(raw.bbox.as_deref(), ctx, report);
        let action = check_required_enum(
            raw.action.as_deref(),
            "action",
            PedestrianAction::parse,
            ctx,
            report,
        );

        if let (Some(pedestrian_id), Some(bbox), Some(action)) = (pedestrian_id, bbox, action) {
            pedestrians.push(PedestrianDetection {
                pedestrian_id,
                bbox,
                action,
            });
        }
    }

    pedestrians
}

fn check_required_enum<T>(
    value: Option<&str>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    ctx: IssueContext,
    report: &mut ValidationReport,
) -> Option<T> {
    match value {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                format!("{} is required", field),
                ctx,
            ));
            None
        }
        Some(s) => {
            let parsed = parse(s);
            if parsed.is_none() {
                report.add(ValidationIssue::error(
                    IssueCode::InvalidEnum,
                    format!("unknown {} '{}'", field, s),
                    ctx,
                ));
            }
            parsed
        }
    }
}

/// Checks a raw bbox value: exactly 4 finite numeric entries with strictly
/// positive width and height.
fn check_bbox(
    bbox: Option<&[serde_json::Value]>,
    ctx: IssueContext,
    report: &mut ValidationReport,
) -> Option<BBoxXYWH> {
    let entries = match bbox {
        None => {
            report.add(ValidationIssue::error(
                IssueCode::MissingRequiredField,
                "bbox is required",
                ctx,
            ));
            return None;
        }
        Some(entries) => entries,
    };

    if entries.len() != 4 {
        report.add(ValidationIssue::error(
            IssueCode::BBoxShape,
            format!("bbox must have exactly 4 entries, got {}", entries.len()),
            ctx,
        ));
        return None;
    }

    let mut components = [0.0f64; 4];
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_f64() {
            Some(v) => components[i] = v,
            None => {
                report.add(ValidationIssue::error(
                    IssueCode::BBoxShape,
                    format!("bbox entry {} is not a number: {}", i, entry),
                    ctx,
                ));
                return None;
            }
        }
    }

    let [x, y, w, h] = components;
    let bbox = BBoxXYWH::new(x, y, w, h);

    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxShape,
            format!("bbox has non-finite components: {:?}", bbox),
            ctx,
        ));
        return None;
    }

    if !bbox.has_positive_size() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxShape,
            format!("bbox width/height must be positive, got w={} h={}", w, h),
            ctx,
        ));
        return None;
    }

    Some(bbox)
}
