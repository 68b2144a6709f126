//! Validated annotation records.
//!
//! These types are the schema-checked form of the per-video annotation JSON.
//! They are only constructed by the validator (or by hand in tests); once
//! built, every invariant of the annotation contract holds: required fields
//! present, enums closed, crash fields conditional on category, frames
//! strictly ordered by `frame_id` with non-decreasing timestamps.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYWH;
use super::enums::{
    Behavior, Category, CrashType, LocationType, PedestrianAction, RiskLevel, TimeOfDay,
    VehicleType, Weather,
};
use super::ids::VideoId;

/// One video's full, validated annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Unique identifier, matching the annotation filename stem.
    pub video_id: VideoId,

    /// Frames per second of the source video.
    pub fps: u32,

    /// Duration of the video in seconds.
    pub duration: f64,

    /// Whether the video contains a crash.
    pub category: Category,

    /// Frame at which the crash occurs. Present iff `category == Crash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_frame: Option<u64>,

    /// Kind of crash. Present iff `category == Crash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_type: Option<CrashType>,

    /// Weather conditions, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,

    /// Lighting conditions, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,

    /// Camera mounting metadata, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_info: Option<CameraInfo>,

    /// Frame-level annotations, strictly ordered by ascending `frame_id`.
    ///
    /// Annotation is sparse: not every frame of the video has an entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameRecord>,
}

impl VideoRecord {
    /// Creates a new record with the minimum required fields.
    pub fn new(video_id: impl Into<VideoId>, fps: u32, duration: f64, category: Category) -> Self {
        Self {
            video_id: video_id.into(),
            fps,
            duration,
            category,
            crash_frame: None,
            crash_type: None,
            weather: None,
            time_of_day: None,
            camera_info: None,
            frames: Vec::new(),
        }
    }

    /// Sets the crash frame and type (crash-category videos).
    pub fn with_crash(mut self, crash_frame: u64, crash_type: CrashType) -> Self {
        self.crash_frame = Some(crash_frame);
        self.crash_type = Some(crash_type);
        self
    }

    /// Sets the weather condition.
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Sets the time of day.
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Sets the camera metadata.
    pub fn with_camera_info(mut self, camera_info: CameraInfo) -> Self {
        self.camera_info = Some(camera_info);
        self
    }

    /// Appends the frame annotations.
    pub fn with_frames(mut self, frames: Vec<FrameRecord>) -> Self {
        self.frames = frames;
        self
    }

    /// Returns true if this is a crash-category video.
    #[inline]
    pub fn is_crash(&self) -> bool {
        self.category == Category::Crash
    }
}

/// One annotated instant within a video.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame number, unique within the video's frame list.
    pub frame_id: u64,

    /// Timestamp in seconds, non-decreasing along the frame list and never
    /// beyond the video's duration.
    pub timestamp: f64,

    /// Risk assessment for this instant, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    /// Detected vehicles, unique by `vehicle_id` within the frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vehicles: Vec<VehicleDetection>,

    /// Detected pedestrians, unique by `pedestrian_id` within the frame.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pedestrians: Vec<PedestrianDetection>,
}

impl FrameRecord {
    /// Creates a new frame record with no detections.
    pub fn new(frame_id: u64, timestamp: f64) -> Self {
        Self {
            frame_id,
            timestamp,
            risk_level: None,
            vehicles: Vec::new(),
            pedestrians: Vec::new(),
        }
    }

    /// Sets the risk level.
    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = Some(risk_level);
        self
    }

    /// Appends a vehicle detection.
    pub fn with_vehicle(mut self, vehicle: VehicleDetection) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Appends a pedestrian detection.
    pub fn with_pedestrian(mut self, pedestrian: PedestrianDetection) -> Self {
        self.pedestrians.push(pedestrian);
        self
    }
}

/// A detected vehicle within a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetection {
    /// Identifier, unique within the frame.
    pub vehicle_id: i64,

    /// Bounding box in pixel coordinates.
    pub bbox: BBoxXYWH,

    /// Vehicle class.
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    /// Observed driving behavior.
    pub behavior: Behavior,

    /// Estimated speed in km/h, when annotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl VehicleDetection {
    /// Creates a new vehicle detection.
    pub fn new(vehicle_id: i64, bbox: BBoxXYWH, vehicle_type: VehicleType, behavior: Behavior) -> Self {
        Self {
            vehicle_id,
            bbox,
            vehicle_type,
            behavior,
            speed: None,
        }
    }

    /// Sets the estimated speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// A detected pedestrian within a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PedestrianDetection {
    /// Identifier, unique within the frame.
    pub pedestrian_id: i64,

    /// Bounding box in pixel coordinates.
    pub bbox: BBoxXYWH,

    /// Observed action.
    pub action: PedestrianAction,
}

impl PedestrianDetection {
    /// Creates a new pedestrian detection.
    pub fn new(pedestrian_id: i64, bbox: BBoxXYWH, action: PedestrianAction) -> Self {
        Self {
            pedestrian_id,
            bbox,
            action,
        }
    }
}

/// Camera mounting metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    /// Mounting height in meters, strictly positive.
    pub height: f64,

    /// Mounting angle in degrees.
    pub angle: f64,

    /// Kind of location the camera observes.
    pub location_type: LocationType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder_pattern() {
        let record = VideoRecord::new("crash_001", 30, 120.5, Category::Crash)
            .with_crash(3450, CrashType::RearEnd)
            .with_weather(Weather::Clear)
            .with_frames(vec![
                FrameRecord::new(3400, 113.33).with_risk_level(RiskLevel::High),
                FrameRecord::new(3450, 115.0).with_risk_level(RiskLevel::Critical),
            ]);

        assert!(record.is_crash());
        assert_eq!(record.crash_frame, Some(3450));
        assert_eq!(record.crash_type, Some(CrashType::RearEnd));
        assert_eq!(record.frames.len(), 2);
    }

    #[test]
    fn test_vehicle_serde_type_field() {
        let vehicle = VehicleDetection::new(
            1,
            BBoxXYWH::new(100.0, 200.0, 50.0, 80.0),
            VehicleType::Car,
            Behavior::Normal,
        )
        .with_speed(45.5);

        let json = serde_json::to_value(&vehicle).expect("serialize vehicle");
        assert_eq!(json["type"], "car");
        assert_eq!(json["behavior"], "normal");
        assert_eq!(json["speed"], 45.5);

        let back: VehicleDetection = serde_json::from_value(json).expect("parse vehicle");
        assert_eq!(back, vehicle);
    }

    #[test]
    fn test_normal_record_omits_crash_fields() {
        let record = VideoRecord::new("normal_001", 25, 60.0, Category::Normal);
        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(!json.contains("crash_frame"));
        assert!(!json.contains("crash_type"));
    }
}
