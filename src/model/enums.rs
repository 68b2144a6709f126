//! Closed enumerations for annotation fields.
//!
//! Annotation JSON carries these values as free-form strings; they are
//! decoded into closed enums at the validation boundary. Unknown strings are
//! a validation error, never silently accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The top-level category of a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crash,
    Normal,
}

impl Category {
    /// Parses a wire string; `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "crash" => Some(Self::Crash),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crash => "crash",
            Self::Normal => "normal",
        }
    }
}

/// The kind of crash in a crash-category video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrashType {
    RearEnd,
    SideImpact,
    HeadOn,
    Pedestrian,
    VehicleObject,
}

impl CrashType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rear-end" => Some(Self::RearEnd),
            "side-impact" => Some(Self::SideImpact),
            "head-on" => Some(Self::HeadOn),
            "pedestrian" => Some(Self::Pedestrian),
            "vehicle-object" => Some(Self::VehicleObject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RearEnd => "rear-end",
            Self::SideImpact => "side-impact",
            Self::HeadOn => "head-on",
            Self::Pedestrian => "pedestrian",
            Self::VehicleObject => "vehicle-object",
        }
    }
}

/// Weather conditions during recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rainy,
    Foggy,
    Snowy,
}

impl Weather {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "clear" => Some(Self::Clear),
            "rainy" => Some(Self::Rainy),
            "foggy" => Some(Self::Foggy),
            "snowy" => Some(Self::Snowy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rainy => "rainy",
            Self::Foggy => "foggy",
            Self::Snowy => "snowy",
        }
    }
}

/// Lighting conditions during recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
    Dawn,
    Dusk,
}

impl TimeOfDay {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "night" => Some(Self::Night),
            "dawn" => Some(Self::Dawn),
            "dusk" => Some(Self::Dusk),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::Dawn => "dawn",
            Self::Dusk => "dusk",
        }
    }
}

/// Per-frame risk assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// The class of a detected vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Truck,
    Bus,
    Motorcycle,
    Bicycle,
}

impl VehicleType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "car" => Some(Self::Car),
            "truck" => Some(Self::Truck),
            "bus" => Some(Self::Bus),
            "motorcycle" => Some(Self::Motorcycle),
            "bicycle" => Some(Self::Bicycle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Bus => "bus",
            Self::Motorcycle => "motorcycle",
            Self::Bicycle => "bicycle",
        }
    }
}

/// Observed driving behavior of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Normal,
    Aggressive,
    Erratic,
    Stopping,
    Turning,
}

impl Behavior {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "aggressive" => Some(Self::Aggressive),
            "erratic" => Some(Self::Erratic),
            "stopping" => Some(Self::Stopping),
            "turning" => Some(Self::Turning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Aggressive => "aggressive",
            Self::Erratic => "erratic",
            Self::Stopping => "stopping",
            Self::Turning => "turning",
        }
    }
}

/// Observed action of a pedestrian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PedestrianAction {
    Standing,
    Walking,
    Running,
    Crossing,
}

impl PedestrianAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standing" => Some(Self::Standing),
            "walking" => Some(Self::Walking),
            "running" => Some(Self::Running),
            "crossing" => Some(Self::Crossing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Crossing => "crossing",
        }
    }
}

/// The kind of location the camera was recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Intersection,
    Highway,
    Urban,
    Rural,
    Parking,
}

impl LocationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intersection" => Some(Self::Intersection),
            "highway" => Some(Self::Highway),
            "urban" => Some(Self::Urban),
            "rural" => Some(Self::Rural),
            "parking" => Some(Self::Parking),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Highway => "highway",
            Self::Urban => "urban",
            Self::Rural => "rural",
            Self::Parking => "parking",
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_via_as_str!(
    Category,
    CrashType,
    Weather,
    TimeOfDay,
    RiskLevel,
    VehicleType,
    Behavior,
    PedestrianAction,
    LocationType,
);
