use std::fs;
use std::path::Path;

/// Writes a split file under `<root>/metadata/`.
pub fn write_split(root: &Path, split: &str, ids: &[&str]) {
    let dir = root.join("metadata");
    fs::create_dir_all(&dir).expect("create metadata dir");

    let mut contents = String::new();
    for id in ids {
        contents.push_str(id);
        contents.push('\n');
    }
    fs::write(dir.join(format!("{}_split.txt", split)), contents).expect("write split file");
}

/// Writes an annotation JSON under the crash/normal shard derived from the id.
pub fn write_annotation(root: &Path, id: &str, json: &str) {
    let shard = if id.starts_with("crash_") { "crash" } else { "normal" };
    let dir = root.join("annotations").join(shard);
    fs::create_dir_all(&dir).expect("create annotations dir");
    fs::write(dir.join(format!("{}.json", id)), json).expect("write annotation file");
}

/// Minimal valid crash annotation.
pub fn crash_json(id: &str, fps: u32, duration: f64, crash_frame: u64, crash_type: &str) -> String {
    format!(
        r#"{{"video_id": "{}", "fps": {}, "duration": {}, "category": "crash",
            "crash_frame": {}, "crash_type": "{}"}}"#,
        id, fps, duration, crash_frame, crash_type
    )
}

/// Minimal valid normal annotation.
pub fn normal_json(id: &str, fps: u32, duration: f64) -> String {
    format!(
        r#"{{"video_id": "{}", "fps": {}, "duration": {}, "category": "normal"}}"#,
        id, fps, duration
    )
}
