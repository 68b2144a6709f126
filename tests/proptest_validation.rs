//! Property tests for the schema validator.

use proptest::prelude::*;

use tcas_index::model::raw::from_json_str;
use tcas_index::model::{
    BBoxXYWH, Behavior, Category, CrashType, FrameRecord, VehicleDetection, VehicleType,
    VideoRecord,
};
use tcas_index::validation::{validate_annotation, IssueCode};

fn arb_bbox() -> impl Strategy<Value = BBoxXYWH> {
    (0.0..1000.0, 0.0..1000.0, 1.0..200.0, 1.0..200.0)
        .prop_map(|(x, y, w, h)| BBoxXYWH::new(x, y, w, h))
}

fn arb_vehicle_type() -> impl Strategy<Value = VehicleType> {
    prop::sample::select(vec![
        VehicleType::Car,
        VehicleType::Truck,
        VehicleType::Bus,
        VehicleType::Motorcycle,
        VehicleType::Bicycle,
    ])
}

fn arb_behavior() -> impl Strategy<Value = Behavior> {
    prop::sample::select(vec![
        Behavior::Normal,
        Behavior::Aggressive,
        Behavior::Erratic,
        Behavior::Stopping,
        Behavior::Turning,
    ])
}

fn arb_crash_type() -> impl Strategy<Value = CrashType> {
    prop::sample::select(vec![
        CrashType::RearEnd,
        CrashType::SideImpact,
        CrashType::HeadOn,
        CrashType::Pedestrian,
        CrashType::VehicleObject,
    ])
}

fn arb_vehicles() -> impl Strategy<Value = Vec<VehicleDetection>> {
    prop::collection::vec(
        (arb_bbox(), arb_vehicle_type(), arb_behavior(), prop::option::of(0.0..200.0)),
        0..3,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (bbox, vehicle_type, behavior, speed))| VehicleDetection {
                vehicle_id: i as i64,
                bbox,
                vehicle_type,
                behavior,
                speed,
            })
            .collect()
    })
}

/// A structurally valid record: strictly increasing frame ids, timestamps
/// non-decreasing and bounded by the duration, crash fields iff crash.
fn arb_valid_record() -> impl Strategy<Value = VideoRecord> {
    (
        any::<bool>(),
        1u32..=120,
        10.0f64..600.0,
        prop::collection::vec((1u64..500, arb_vehicles()), 0..5),
        0u64..100_000,
        arb_crash_type(),
    )
        .prop_map(|(is_crash, fps, duration, frame_parts, crash_frame, crash_type)| {
            let n = frame_parts.len();
            let mut frames = Vec::with_capacity(n);
            let mut frame_id = 0u64;
            for (i, (gap, vehicles)) in frame_parts.into_iter().enumerate() {
                frame_id += gap;
                let timestamp = duration * (i as f64 + 1.0) / (n as f64 + 1.0);
                frames.push(FrameRecord {
                    frame_id,
                    timestamp,
                    risk_level: None,
                    vehicles,
                    pedestrians: Vec::new(),
                });
            }

            let (id, category) = if is_crash {
                ("crash_001", Category::Crash)
            } else {
                ("normal_001", Category::Normal)
            };

            let mut record = VideoRecord::new(id, fps, duration, category).with_frames(frames);
            if is_crash {
                record = record.with_crash(crash_frame, crash_type);
            }
            record
        })
}

proptest! {
    /// Serializing a valid record and validating it back is lossless.
    #[test]
    fn valid_records_validate_to_themselves(record in arb_valid_record()) {
        let json = serde_json::to_string(&record).expect("serialize record");
        let raw = from_json_str(&json).expect("parse raw annotation");

        let validated = validate_annotation(&raw).expect("valid record stays valid");
        prop_assert_eq!(validated, record);
    }

    /// Any bbox without strictly positive width is a BBoxShape error.
    #[test]
    fn non_positive_width_is_always_flagged(
        x in -100.0..100.0f64,
        y in -100.0..100.0f64,
        w in -50.0..=0.0f64,
        h in 1.0..50.0f64,
    ) {
        let json = format!(
            r#"{{"video_id": "normal_001", "fps": 30, "duration": 10.0, "category": "normal",
                "frames": [{{"frame_id": 0, "timestamp": 0.0, "vehicles": [
                    {{"vehicle_id": 1, "bbox": [{}, {}, {}, {}], "type": "car", "behavior": "normal"}}
                ]}}]}}"#,
            x, y, w, h
        );
        let raw = from_json_str(&json).expect("parse raw annotation");

        let report = validate_annotation(&raw).expect_err("bad bbox rejected");
        prop_assert!(report.has_code(IssueCode::BBoxShape));
    }

    /// Frames listed out of order are always a FrameOrder error.
    #[test]
    fn descending_frame_ids_are_always_flagged(
        first in 100u64..1000,
        delta in 1u64..100,
    ) {
        let second = first - delta;
        let json = format!(
            r#"{{"video_id": "normal_001", "fps": 30, "duration": 100.0, "category": "normal",
                "frames": [
                    {{"frame_id": {}, "timestamp": 1.0}},
                    {{"frame_id": {}, "timestamp": 2.0}}
                ]}}"#,
            first, second
        );
        let raw = from_json_str(&json).expect("parse raw annotation");

        let report = validate_annotation(&raw).expect_err("out-of-order rejected");
        prop_assert!(report.has_code(IssueCode::FrameOrder));
    }

    /// Unknown category strings are never silently accepted.
    #[test]
    fn unknown_categories_are_rejected(word in "[a-z]{3,12}") {
        prop_assume!(word != "crash" && word != "normal");

        let json = format!(
            r#"{{"video_id": "normal_001", "fps": 30, "duration": 10.0, "category": "{}"}}"#,
            word
        );
        let raw = from_json_str(&json).expect("parse raw annotation");

        let report = validate_annotation(&raw).expect_err("unknown category rejected");
        prop_assert!(report.has_code(IssueCode::InvalidEnum));
    }
}
