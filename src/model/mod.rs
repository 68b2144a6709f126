//! Core dataset model for the TCAS index.
//!
//! This module defines the typed representation of per-video annotations.
//! Annotation JSON is first read into the permissive [`raw`] mirror, then
//! checked by the [`validation`](crate::validation) module into the
//! strongly-typed records defined here.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Newtype ids and closed enums prevent mixing up
//!    identifiers and silently accepting unknown label values.
//!
//! 2. **Decode at the boundary**: free-form wire strings become closed
//!    enums during validation; validated records cannot hold out-of-set
//!    values.
//!
//! 3. **Permissive raw layer**: the [`raw`] types allow "invalid" data to be
//!    represented (missing fields, malformed boxes), so that validation can
//!    report issues rather than fail at parse time.

mod bbox;
mod enums;
mod ids;
pub mod raw;
mod record;

// Re-export core types for convenient access
pub use bbox::BBoxXYWH;
pub use enums::{
    Behavior, Category, CrashType, LocationType, PedestrianAction, RiskLevel, TimeOfDay,
    VehicleType, Weather,
};
pub use ids::VideoId;
pub use record::{CameraInfo, FrameRecord, PedestrianDetection, VehicleDetection, VideoRecord};
