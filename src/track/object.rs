use std::path::{Path, PathBuf};

use crate::{
    animation::curve::{Curve, InterpMode},
    foundation::core::{Fps, FrameIndex},
    track::bbox::BBox,
    track::data,
    track::timeline::{BoxTimeline, Bracket, frame_to_time},
};

/// Interpolate between two samples at normalized times `t1` and `t2`.
///
/// The fraction is `(target - t1) / (t2 - t1)`; coincident (or inverted) time
/// keys return `left` unmodified.
pub fn interpolate_boxes(t1: f64, t2: f64, left: BBox, right: BBox, target: f64) -> BBox {
    if t2 <= t1 {
        return left;
    }
    BBox::lerp(left, right, (target - t1) / (t2 - t1))
}

#[derive(Clone, Debug)]
/// A tracked object's bounding box animated over time.
///
/// Owns the sparse timeline of externally-tracked samples and the five
/// user-authored adjustment curves layered on top of it. The timeline is
/// keyed by normalized time in the tracking data's own time base; queries go
/// through the same frame-to-time mapping, scaled by the current time-scale
/// factor.
///
/// The read path ([`TrackedBox::get_box`] and friends) takes `&self` and
/// mutates nothing, so an aggregate that is loaded once may be queried from
/// many render workers concurrently.
pub struct TrackedBox {
    /// Whether the tracked object should be rendered at all.
    pub visible: bool,
    /// X-direction displacement added to the box center.
    pub delta_x: Curve,
    /// Y-direction displacement added to the box center.
    pub delta_y: Curve,
    /// Width multiplier.
    pub scale_x: Curve,
    /// Height multiplier.
    pub scale_y: Curve,
    /// Rotation offset in degrees, added to the tracked angle.
    pub rotation: Curve,
    pub(crate) base_fps: Fps,
    pub(crate) time_scale: f64,
    pub(crate) samples: BoxTimeline,
    pub(crate) source_path: Option<PathBuf>,
}

impl Default for TrackedBox {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackedBox {
    /// Empty aggregate with neutral curves, base rate 24/1, and scale 1.0.
    pub fn new() -> Self {
        Self {
            visible: true,
            delta_x: Curve::new(0.0, InterpMode::Linear),
            delta_y: Curve::new(0.0, InterpMode::Linear),
            scale_x: Curve::new(1.0, InterpMode::Linear),
            scale_y: Curve::new(1.0, InterpMode::Linear),
            rotation: Curve::new(0.0, InterpMode::Linear),
            base_fps: Fps { num: 24, den: 1 },
            time_scale: 1.0,
            samples: BoxTimeline::new(),
            source_path: None,
        }
    }

    /// Frame rate the tracking data was produced at.
    pub fn base_fps(&self) -> Fps {
        self.base_fps
    }

    /// Record the frame rate the tracking data assumes.
    pub fn set_base_fps(&mut self, fps: Fps) {
        self.base_fps = fps;
    }

    /// Current time-scale factor applied to queries.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Update the time-scale factor consulted by subsequent queries.
    ///
    /// Stored timeline keys are not re-keyed; only the frame-to-time mapping
    /// of later `get_box` calls changes. Non-positive or non-finite factors
    /// are ignored.
    pub fn scale_points(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(scale, "ignoring invalid time scale");
            return;
        }
        self.time_scale = scale;
    }

    /// Path of the tracker data file the timeline was loaded from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Insert or overwrite the sample for `frame`.
    pub fn add_box(&mut self, frame: FrameIndex, cx: f64, cy: f64, width: f64, height: f64, angle: f64) {
        let t = frame_to_time(frame, self.base_fps, 1.0);
        self.samples.insert(t, BBox::new(cx, cy, width, height, angle));
    }

    /// Remove the sample for `frame`; no-op when absent.
    pub fn remove_box(&mut self, frame: FrameIndex) {
        let t = frame_to_time(frame, self.base_fps, 1.0);
        self.samples.remove(t);
    }

    /// True iff a sample is stored exactly at `frame`.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        let t = frame_to_time(frame, self.base_fps, 1.0);
        self.samples.contains(t)
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Empty the timeline and forget the recorded source path.
    ///
    /// Frame rate, time scale, visibility, and the adjustment curves are user
    /// state and survive a clear.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.source_path = None;
    }

    /// Effective bounding box at `frame`.
    ///
    /// Resolves a base sample from the timeline (sentinel when empty, nearest
    /// sample at an exact hit or outside the stored range, linear
    /// interpolation between the bracketing samples otherwise), then composes
    /// the five adjustment curves on top. The curves apply on every call,
    /// including over the sentinel box. Always returns a value; a pure
    /// function of the aggregate's current state and `frame`.
    #[tracing::instrument(skip(self))]
    pub fn get_box(&self, frame: FrameIndex) -> BBox {
        let t = frame_to_time(frame, self.base_fps, self.time_scale);
        let base = match self.samples.bracket(t) {
            Bracket::Empty => BBox::default(),
            Bracket::Nearest(sample) => *sample,
            Bracket::Between { t1, left, t2, right } => {
                interpolate_boxes(t1, t2, *left, *right, t)
            }
        };
        self.apply_curves(base, frame)
    }

    /// Populate the timeline from a tracker data file.
    ///
    /// Records are merged into the timeline in order (overwriting by time
    /// key) and the path is recorded for later reference; call
    /// [`TrackedBox::clear`] first for a from-scratch load. Failures (missing
    /// file, corrupt data) are reported as `false` and logged; the aggregate
    /// is left unchanged. Never panics or propagates an error into the
    /// render path.
    #[tracing::instrument(skip(self))]
    pub fn load_box_data(&mut self, path: &Path) -> bool {
        let records = match data::read_records(path) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "failed to load tracker data");
                return false;
            }
        };

        for r in &records {
            self.add_box(r.frame, r.cx, r.cy, r.width, r.height, r.angle);
        }
        self.source_path = Some(path.to_path_buf());
        tracing::debug!(count = records.len(), "loaded tracker data");
        true
    }

    fn apply_curves(&self, base: BBox, frame: FrameIndex) -> BBox {
        BBox {
            cx: base.cx + self.delta_x.value_at(frame),
            cy: base.cy + self.delta_y.value_at(frame),
            width: base.width * self.scale_x.value_at(frame),
            height: base.height * self.scale_y.value_at(frame),
            angle: base.angle + self.rotation.value_at(frame),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/object.rs"]
mod tests;
