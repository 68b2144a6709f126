//! Read-only queries over a built [`DatasetIndex`].
//!
//! Absent lookups are normal outcomes here, not errors: annotation is
//! sparse, so a frame with no [`FrameRecord`] and a normal video with no
//! time-to-accident both answer `None`.

use crate::index::DatasetIndex;
use crate::model::{FrameRecord, VideoId, VideoRecord};

impl DatasetIndex {
    /// Looks up a video record by id.
    pub fn get(&self, video_id: &VideoId) -> Option<&VideoRecord> {
        self.lookup(video_id).map(|idx| &self.records()[idx])
    }

    /// Looks up the annotation for a specific frame of a video.
    ///
    /// `None` means the frame has no annotation (or the video is unknown);
    /// with sparse annotation that is an expected outcome.
    pub fn frame_annotation(&self, video_id: &VideoId, frame_id: u64) -> Option<&FrameRecord> {
        let record = self.get(video_id)?;
        // Frames are validated to be strictly increasing in frame_id.
        let idx = record
            .frames
            .binary_search_by_key(&frame_id, |f| f.frame_id)
            .ok()?;
        Some(&record.frames[idx])
    }

    /// Lazily filters the catalog with a caller-supplied predicate.
    ///
    /// Evaluation happens during iteration, in split-file order. The
    /// sequence is restartable: call `filter` again for a fresh pass.
    pub fn filter<P>(&self, predicate: P) -> impl Iterator<Item = &VideoRecord>
    where
        P: Fn(&VideoRecord) -> bool,
    {
        self.records().iter().filter(move |r| predicate(r))
    }

    /// Iterates the crash-category videos, in split-file order.
    pub fn crash_videos(&self) -> impl Iterator<Item = &VideoRecord> {
        self.filter(|r| r.is_crash())
    }

    /// Returns whether the video contains a crash; `None` for unknown ids.
    pub fn is_crash(&self, video_id: &VideoId) -> Option<bool> {
        self.get(video_id).map(VideoRecord::is_crash)
    }

    /// Returns the annotated crash frame; `None` for normal videos or
    /// unknown ids.
    pub fn crash_frame(&self, video_id: &VideoId) -> Option<u64> {
        self.get(video_id)?.crash_frame
    }

    /// Signed time-to-accident in seconds from `current_frame`, computed as
    /// `(crash_frame - current_frame) / fps`.
    ///
    /// `None` (undefined) for normal videos and unknown ids. The value is
    /// never clamped: a negative result means `current_frame` is past the
    /// crash, and callers decide whether that is meaningful.
    pub fn time_to_accident(&self, video_id: &VideoId, current_frame: u64) -> Option<f64> {
        let record = self.get(video_id)?;
        let crash_frame = record.crash_frame?;
        Some((crash_frame as f64 - current_frame as f64) / record.fps as f64)
    }
}
