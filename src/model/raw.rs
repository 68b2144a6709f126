//! Loosely-typed wire mirror of the annotation JSON.
//!
//! These structs accept whatever a well-formed JSON document carries: every
//! field is optional, enums arrive as free-form strings, and bounding boxes
//! arrive as arbitrary JSON arrays. The validator turns a [`RawAnnotation`]
//! into a checked [`VideoRecord`](super::VideoRecord), reporting every
//! contract violation instead of panicking or failing at parse time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::TcasError;

/// Raw per-video annotation as read from disk.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAnnotation {
    #[serde(default)]
    pub video_id: Option<String>,

    /// Accepted as any JSON number; the validator requires a positive integer.
    #[serde(default)]
    pub fps: Option<f64>,

    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub crash_frame: Option<i64>,

    #[serde(default)]
    pub crash_type: Option<String>,

    #[serde(default)]
    pub weather: Option<String>,

    #[serde(default)]
    pub time_of_day: Option<String>,

    #[serde(default)]
    pub camera_info: Option<RawCameraInfo>,

    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

/// Raw frame-level annotation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub frame_id: Option<i64>,

    #[serde(default)]
    pub timestamp: Option<f64>,

    #[serde(default)]
    pub risk_level: Option<String>,

    #[serde(default)]
    pub vehicles: Vec<RawVehicle>,

    #[serde(default)]
    pub pedestrians: Vec<RawPedestrian>,
}

/// Raw vehicle detection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawVehicle {
    #[serde(default)]
    pub vehicle_id: Option<i64>,

    /// Kept as raw JSON values so that a box with the wrong arity or
    /// non-numeric entries is a reported schema issue, not a parse failure.
    #[serde(default)]
    pub bbox: Option<Vec<Value>>,

    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,

    #[serde(default)]
    pub behavior: Option<String>,

    #[serde(default)]
    pub speed: Option<f64>,
}

/// Raw pedestrian detection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPedestrian {
    #[serde(default)]
    pub pedestrian_id: Option<i64>,

    #[serde(default)]
    pub bbox: Option<Vec<Value>>,

    #[serde(default)]
    pub action: Option<String>,
}

/// Raw camera metadata.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCameraInfo {
    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub angle: Option<f64>,

    #[serde(default)]
    pub location_type: Option<String>,
}

/// Reads a raw annotation from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not well-formed JSON.
pub fn read_annotation(path: &Path) -> Result<RawAnnotation, TcasError> {
    let file = File::open(path).map_err(TcasError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TcasError::AnnotationParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a raw annotation from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<RawAnnotation, serde_json::Error> {
    serde_json::from_str(json)
}
